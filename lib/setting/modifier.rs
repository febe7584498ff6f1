//! Modifiers applied to expanded values, as in `$(PRODUCT_NAME:quote)`.
//!
//! | Modifier            | Result                                            |
//! |---------------------|---------------------------------------------------|
//! | `quote`             | Quoted for use in a shell command.                |
//! | `upper`, `lower`    | Changed case.                                     |
//! | `dir`               | The containing directory.                         |
//! | `file`              | The last path component.                          |
//! | `base`              | The last path component without its extension.    |
//! | `suffix`            | The extension, including the dot.                 |
//! | `standardizepath`   | Lexically normalized path.                        |
//! | `identifier`        | A C identifier.                                   |
//! | `rfc1034identifier` | Only alphanumerics, `-` and `.`.                  |
//! | `default=VALUE`     | `VALUE` if the value is empty.                    |

use crate::path;

const KNOWN: &[&str] = &[
	"quote",
	"upper",
	"lower",
	"dir",
	"file",
	"base",
	"suffix",
	"standardizepath",
	"identifier",
	"rfc1034identifier",
];

/// Apply a modifier to a value.
///
/// Returns `None` for unknown modifiers.
pub fn apply(modifier: &str, value: String) -> Option<String> {
	if let Some(default) = modifier.strip_prefix("default=") {
		return Some(if value.is_empty() {
			default.to_string()
		} else {
			value
		});
	}

	if !KNOWN.contains(&modifier) {
		return None;
	}

	if value.is_empty() {
		return Some(value);
	}

	Some(match modifier {
		"quote" => shlex::try_quote(&value)
			.map(|q| q.into_owned())
			.unwrap_or_default(),
		"upper" => value.to_uppercase(),
		"lower" => value.to_lowercase(),
		"dir" => path::dir_name(&value).to_string(),
		"file" => path::base_name(&value).to_string(),
		"base" => path::base_name_without_extension(&value).to_string(),
		"suffix" => match path::extension(&value) {
			"" => String::new(),
			ext => format!(".{}", ext),
		},
		"standardizepath" => path::normalize(&value),
		"identifier" => identifier(&value),
		_ => rfc1034_identifier(&value),
	})
}

fn identifier(value: &str) -> String {
	let mut result = String::with_capacity(value.len() + 1);
	if value.starts_with(|c: char| c.is_ascii_digit()) {
		result.push('_');
	}
	result.extend(value.chars().map(|c| {
		if c.is_ascii_alphanumeric() {
			c
		} else {
			'_'
		}
	}));
	result
}

fn rfc1034_identifier(value: &str) -> String {
	value
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || c == '.' {
				c
			} else {
				'-'
			}
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::apply;

	fn m(modifier: &str, value: &str) -> Option<String> {
		apply(modifier, value.to_string())
	}

	#[test]
	#[rustfmt::skip]
	fn test_modifiers() {
		assert_eq!(m("identifier", "3D Touch"), Some("_3D_Touch".to_string()));
		assert_eq!(m("identifier", "under_score"), Some("under_score".to_string()));
		assert_eq!(m("rfc1034identifier", "com.example.My_App"), Some("com.example.My-App".to_string()));
		assert_eq!(m("quote", "simple"), Some("simple".to_string()));
		assert_eq!(m("suffix", "Makefile"), Some("".to_string()));
		assert_eq!(m("dir", "file.c"), Some(".".to_string()));
		assert_eq!(m("default=x", ""), Some("x".to_string()));
		assert_eq!(m("nope", "value"), None);
		assert_eq!(m("nope", ""), None);
	}
}
