//! Settings and levels of settings.

use super::condition::{Condition, Context};

/// A single, possibly conditional, `key = value` assignment.
///
/// The value is an unexpanded template, which may refer to other settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Setting {
	key: String,
	condition: Condition,
	value: String,
}

impl Setting {
	/// An unconditional setting.
	pub fn new(key: &str, value: &str) -> Self {
		Setting {
			key: key.to_string(),
			condition: Condition::always(),
			value: value.to_string(),
		}
	}

	/// A setting which only applies when `condition` matches.
	pub fn conditional(key: &str, condition: Condition, value: &str) -> Self {
		Setting {
			key: key.to_string(),
			condition,
			value: value.to_string(),
		}
	}

	/// Parse a setting from a (possibly conditional) key, like
	/// `OTHER_LDFLAGS[arch=arm64]`, and a value.
	pub fn parse(key: &str, value: &str) -> Self {
		let (key, condition) = Condition::parse_key(key);
		Setting::conditional(key, condition, value)
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn condition(&self) -> &Condition {
		&self.condition
	}

	pub fn value(&self) -> &str {
		&self.value
	}
}

/// An ordered group of settings, such as "project settings" or "command
/// line overrides".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Level {
	settings: Vec<Setting>,
}

impl Level {
	pub fn new() -> Self {
		Level {
			settings: Vec::new(),
		}
	}

	/// Create a level from unconditional `(key, value)` pairs.
	pub fn from_pairs<'a, I>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		pairs
			.into_iter()
			.map(|(key, value)| Setting::parse(key, value))
			.collect()
	}

	/// Append a setting.
	pub fn push(&mut self, setting: Setting) {
		self.settings.push(setting);
	}

	/// Append an unconditional setting.
	pub fn set(&mut self, key: &str, value: &str) {
		self.push(Setting::new(key, value));
	}

	pub fn settings(&self) -> &[Setting] {
		&self.settings
	}

	pub fn is_empty(&self) -> bool {
		self.settings.is_empty()
	}

	/// Find the setting for `key` that applies in `context`.
	///
	/// If several settings for the key match, the most specific condition
	/// wins. Between equally specific ones, the first one wins.
	pub fn lookup(&self, key: &str, context: &Context) -> Option<&Setting> {
		let mut best: Option<(&Setting, usize)> = None;
		for setting in &self.settings {
			if setting.key != key || !setting.condition.matches(context) {
				continue;
			}
			let specificity = setting.condition.specificity();
			if best.map_or(true, |(_, b)| specificity > b) {
				best = Some((setting, specificity));
			}
		}
		best.map(|(setting, _)| setting)
	}
}

impl std::iter::FromIterator<Setting> for Level {
	fn from_iter<I: IntoIterator<Item = Setting>>(iter: I) -> Self {
		Level {
			settings: iter.into_iter().collect(),
		}
	}
}

impl Extend<Setting> for Level {
	fn extend<I: IntoIterator<Item = Setting>>(&mut self, iter: I) {
		self.settings.extend(iter);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn first_unconditional_wins() {
		let level = Level::from_pairs(vec![("CC", "clang"), ("CC", "gcc")]);
		assert_eq!(level.lookup("CC", &Context::new()).unwrap().value(), "clang");
		assert!(level.lookup("LD", &Context::new()).is_none());
	}

	#[test]
	fn most_specific_wins() {
		let level = Level::from_pairs(vec![
			("FLAGS", "-generic"),
			("FLAGS[sdk=*]", "-any-sdk"),
			("FLAGS[sdk=macosx*]", "-macos"),
			("FLAGS[sdk=macosx*][arch=arm64]", "-macos-arm"),
			("FLAGS[sdk=macosx*][arch=*]", "-macos-any-arch"),
			("FLAGS[arch=x86_64]", "-intel"),
		]);

		let context = Context::new().with("sdk", "macosx11.0").with("arch", "arm64");
		assert_eq!(level.lookup("FLAGS", &context).unwrap().value(), "-macos-arm");

		// `-macos` and `-intel` are equally specific: declaration order decides.
		let context = Context::new().with("sdk", "macosx11.0").with("arch", "x86_64");
		assert_eq!(level.lookup("FLAGS", &context).unwrap().value(), "-macos");

		let context = Context::new().with("sdk", "iphoneos14.0");
		assert_eq!(level.lookup("FLAGS", &context).unwrap().value(), "-generic");
	}
}
