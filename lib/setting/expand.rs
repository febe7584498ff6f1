//! Expansion of `$(...)` references in setting values.
//!
//! Supported forms are `$(NAME)`, `${NAME}`, `$NAME` and `$$` for a literal
//! `$`. Inside parentheses or braces, references are expanded before the
//! name is looked up, so `$(LINK_FILE_LIST_$(variant)_$(arch))` works. The
//! name may be followed by `:`-separated modifiers, see
//! [`modifier`][super::modifier].
//!
//! Expansion never fails. Undefined settings, unknown modifiers and cycles
//! all expand to nothing.

use super::modifier;
use super::scope::SettingScope;
use log::trace;
use memchr::memchr;

/// The maximum nesting of settings referring to other settings.
pub const MAX_DEPTH: usize = 64;

/// Resolve the setting `key` and expand its value.
pub fn resolve<S: SettingScope + ?Sized>(key: &str, scope: &S) -> String {
	let mut s = String::new();
	resolve_to(key, 0, scope, &mut s, None);
	s
}

/// Expand all references in `template`.
pub fn expand<S: SettingScope + ?Sized>(template: &str, scope: &S) -> String {
	let mut s = String::new();
	expand_to(template, scope, &mut s, None);
	s
}

/// The chain of settings currently being expanded.
struct RecursionProtection<'a> {
	parent: Option<&'a RecursionProtection<'a>>,
	key: &'a str,
	level: usize,
	depth: usize,
}

fn is_being_expanded(key: &str, level: usize, mut prot: Option<&RecursionProtection>) -> bool {
	while let Some(p) = prot {
		if p.key == key && p.level == level {
			return true;
		}
		prot = p.parent;
	}
	false
}

fn resolve_to<S: SettingScope + ?Sized>(
	key: &str,
	from: usize,
	scope: &S,
	result: &mut String,
	prot: Option<&RecursionProtection>,
) {
	let (level, setting) = match scope.lookup_setting(key, from) {
		Some(found) => found,
		None => return,
	};
	if is_being_expanded(key, level, prot) {
		trace!("Cycle while expanding `{}', expanding to nothing", key);
		return;
	}
	let depth = prot.map_or(0, |p| p.depth + 1);
	if depth >= MAX_DEPTH {
		trace!("Expansion of `{}' nested too deeply, expanding to nothing", key);
		return;
	}
	expand_to(
		setting.value(),
		scope,
		result,
		Some(&RecursionProtection {
			parent: prot,
			key,
			level,
			depth,
		}),
	);
}

fn is_name_char(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_'
}

// Finds the `close` that matches an already opened `open`.
fn find_closing(src: &str, open: u8, close: u8) -> Option<usize> {
	let mut depth = 0usize;
	for (i, c) in src.bytes().enumerate() {
		if c == open {
			depth += 1;
		} else if c == close {
			if depth == 0 {
				return Some(i);
			}
			depth -= 1;
		}
	}
	None
}

fn expand_to<S: SettingScope + ?Sized>(
	mut value: &str,
	scope: &S,
	result: &mut String,
	prot: Option<&RecursionProtection>,
) {
	while let Some(i) = memchr(b'$', value.as_bytes()) {
		result.push_str(&value[..i]);
		let rest = &value[i + 1..];
		match rest.bytes().next() {
			Some(b'$') => {
				result.push('$');
				value = &rest[1..];
			}
			Some(open @ b'(') | Some(open @ b'{') => {
				let close = if open == b'(' { b')' } else { b'}' };
				match find_closing(&rest[1..], open, close) {
					Some(end) => {
						expand_group(&rest[1..end + 1], scope, result, prot);
						value = &rest[end + 2..];
					}
					None => {
						// Unterminated, keep it literally.
						result.push('$');
						value = rest;
					}
				}
			}
			Some(c) if is_name_char(c) => {
				let end = rest
					.bytes()
					.position(|c| !is_name_char(c))
					.unwrap_or_else(|| rest.len());
				expand_group(&rest[..end], scope, result, prot);
				value = &rest[end..];
			}
			_ => {
				result.push('$');
				value = rest;
			}
		}
	}
	result.push_str(value);
}

// Expands the inside of `$(...)`: a name, optionally followed by modifiers.
fn expand_group<S: SettingScope + ?Sized>(
	group: &str,
	scope: &S,
	result: &mut String,
	prot: Option<&RecursionProtection>,
) {
	let mut nested = String::new();
	let group = if memchr(b'$', group.as_bytes()).is_some() {
		expand_to(group, scope, &mut nested, prot);
		nested.as_str()
	} else {
		group
	};

	let (key, modifiers) = match group.find(':') {
		Some(n) => (&group[..n], Some(&group[n + 1..])),
		None => (group, None),
	};

	let mut value = String::new();
	if key == "inherited" {
		// The same setting, but only from the levels below the one it was
		// found in.
		if let Some(p) = prot {
			resolve_to(p.key, p.level + 1, scope, &mut value, prot);
		}
	} else {
		resolve_to(key, 0, scope, &mut value, prot);
	}

	let mut modifiers = modifiers;
	while let Some(m) = modifiers {
		// The value of `default=` is the rest of the group, colons included.
		let (m, rest) = match m.find(':') {
			Some(n) if !m.starts_with("default=") => (&m[..n], Some(&m[n + 1..])),
			_ => (m, None),
		};
		modifiers = rest;
		value = match modifier::apply(m, value) {
			Some(v) => v,
			None => {
				trace!("Unknown modifier `{}' in `$({})', expanding to nothing", m, group);
				return;
			}
		};
	}

	result.push_str(&value);
}
