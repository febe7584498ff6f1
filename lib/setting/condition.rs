//! Conditions under which a setting applies, and the context they are
//! matched against.

use glob::Pattern;
use indexmap::map::IndexMap;
use std::fmt;

/// The active values of the condition dimensions (`sdk`, `arch`, `variant`,
/// `config`, ...) for one resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
	values: IndexMap<String, String>,
}

impl Context {
	/// Create a context without any dimensions.
	pub fn new() -> Self {
		Context {
			values: IndexMap::new(),
		}
	}

	/// Builder-style [`set`][Self::set].
	pub fn with(mut self, dimension: &str, value: &str) -> Self {
		self.set(dimension, value);
		self
	}

	/// Set the value of a dimension, replacing any previous value.
	pub fn set(&mut self, dimension: &str, value: &str) {
		self.values.insert(dimension.to_string(), value.to_string());
	}

	/// The value of a dimension, if it is part of this context.
	pub fn get(&self, dimension: &str) -> Option<&str> {
		self.values.get(dimension).map(|v| v.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// One `dimension=pattern` clause of a [`Condition`].
#[derive(Clone, Debug, PartialEq)]
struct Clause {
	dimension: String,
	pattern: String,
	/// `None` if `pattern` isn't a valid glob, in which case it is compared
	/// literally.
	compiled: Option<Pattern>,
}

impl Clause {
	fn new(dimension: &str, pattern: &str) -> Self {
		Clause {
			dimension: dimension.to_string(),
			pattern: pattern.to_string(),
			compiled: Pattern::new(pattern).ok(),
		}
	}

	fn is_wildcard(&self) -> bool {
		self.pattern == "*"
	}

	fn matches(&self, context: &Context) -> bool {
		match context.get(&self.dimension) {
			None => self.is_wildcard(),
			Some(value) => match &self.compiled {
				Some(pattern) => pattern.matches(value),
				None => self.pattern == value,
			},
		}
	}
}

/// A set of `dimension=pattern` clauses which all need to match.
///
/// An empty condition always matches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Condition {
	clauses: Vec<Clause>,
}

impl Condition {
	/// The condition which always matches.
	pub fn always() -> Self {
		Condition {
			clauses: Vec::new(),
		}
	}

	/// Builder-style [`add`][Self::add].
	pub fn with(mut self, dimension: &str, pattern: &str) -> Self {
		self.add(dimension, pattern);
		self
	}

	/// Add a clause.
	pub fn add(&mut self, dimension: &str, pattern: &str) {
		self.clauses.push(Clause::new(dimension, pattern));
	}

	pub fn is_empty(&self) -> bool {
		self.clauses.is_empty()
	}

	/// Check if every clause matches the context.
	///
	/// A dimension which is missing from the context only matches `*`.
	pub fn matches(&self, context: &Context) -> bool {
		self.clauses.iter().all(|c| c.matches(context))
	}

	/// The number of clauses that are not just `*`.
	///
	/// When several conditional variants of a setting match, the one with the
	/// highest specificity wins.
	pub fn specificity(&self) -> usize {
		self.clauses.iter().filter(|c| !c.is_wildcard()).count()
	}

	/// Split a conditional key like `OTHER_LDFLAGS[sdk=macosx*][arch=x86_64]`
	/// into the key and its condition.
	///
	/// A key with malformed brackets is returned as-is, unconditionally.
	pub fn parse_key(key: &str) -> (&str, Condition) {
		let open = match key.find('[') {
			Some(n) => n,
			None => return (key, Condition::always()),
		};

		let mut condition = Condition::always();
		let mut rest = &key[open..];
		while !rest.is_empty() {
			let clause = match (rest.starts_with('['), rest.find(']')) {
				(true, Some(close)) => &rest[1..close],
				_ => return (key, Condition::always()),
			};
			match clause.find('=') {
				Some(eq) => condition.add(clause[..eq].trim(), clause[eq + 1..].trim()),
				None => return (key, Condition::always()),
			}
			rest = &rest[clause.len() + 2..];
		}

		(&key[..open], condition)
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for clause in &self.clauses {
			write!(f, "[{}={}]", clause.dimension, clause.pattern)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn macos_x86() -> Context {
		Context::new()
			.with("sdk", "macosx10.15")
			.with("arch", "x86_64")
			.with("variant", "normal")
	}

	#[test]
	fn empty_condition_always_matches() {
		assert!(Condition::always().matches(&Context::new()));
		assert!(Condition::always().matches(&macos_x86()));
	}

	#[test]
	fn glob_patterns() {
		let context = macos_x86();
		assert!(Condition::always().with("sdk", "macosx*").matches(&context));
		assert!(Condition::always().with("arch", "x86_6?").matches(&context));
		assert!(!Condition::always().with("sdk", "iphoneos*").matches(&context));
		assert!(!Condition::always()
			.with("sdk", "macosx*")
			.with("arch", "arm64")
			.matches(&context));
	}

	#[test]
	fn missing_dimension() {
		let context = macos_x86();
		assert!(Condition::always().with("config", "*").matches(&context));
		assert!(!Condition::always().with("config", "Debug").matches(&context));
	}

	#[test]
	fn specificity() {
		assert_eq!(Condition::always().specificity(), 0);
		assert_eq!(Condition::always().with("sdk", "*").specificity(), 0);
		assert_eq!(
			Condition::always()
				.with("sdk", "macosx*")
				.with("arch", "*")
				.with("variant", "normal")
				.specificity(),
			2
		);
	}

	#[test]
	fn parse_key() {
		let (key, condition) = Condition::parse_key("OTHER_LDFLAGS");
		assert_eq!(key, "OTHER_LDFLAGS");
		assert!(condition.is_empty());

		let (key, condition) = Condition::parse_key("OTHER_LDFLAGS[sdk=macosx*][arch=x86_64]");
		assert_eq!(key, "OTHER_LDFLAGS");
		assert_eq!(condition.to_string(), "[sdk=macosx*][arch=x86_64]");
		assert!(condition.matches(&macos_x86()));

		let (key, condition) = Condition::parse_key("BROKEN[sdk");
		assert_eq!(key, "BROKEN[sdk");
		assert!(condition.is_empty());
	}
}
