//! The stack of setting levels used to resolve settings for one target.

use super::condition::Context;
use super::expand::{expand, resolve};
use super::level::Level;
use super::scope::SettingScope;

/// An ordered stack of [`Level`]s, highest precedence first, together with
/// the [`Context`] their conditions are matched against.
///
/// Typically, from top to bottom: command line overrides, action settings,
/// target settings, project settings, and specification defaults.
///
/// Resolution is a pure function of the levels and the context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
	levels: Vec<Level>,
	context: Context,
}

impl Environment {
	/// Create an environment from levels ordered highest precedence first.
	pub fn new(levels: Vec<Level>, context: Context) -> Self {
		Environment { levels, context }
	}

	pub fn levels(&self) -> &[Level] {
		&self.levels
	}

	pub fn context(&self) -> &Context {
		&self.context
	}

	pub fn level_mut(&mut self, index: usize) -> Option<&mut Level> {
		self.levels.get_mut(index)
	}

	/// Insert a level at `index`. Index 0 is the highest precedence.
	pub fn insert_level(&mut self, index: usize, level: Level) {
		let index = index.min(self.levels.len());
		self.levels.insert(index, level);
	}

	/// Add a level with lower precedence than all existing levels.
	pub fn push_level(&mut self, level: Level) {
		self.levels.push(level);
	}

	/// Builder-style [`push_level`][Self::push_level].
	pub fn with_level(mut self, level: Level) -> Self {
		self.push_level(level);
		self
	}

	/// Check if any level defines `key` in the current context.
	pub fn is_defined(&self, key: &str) -> bool {
		self.lookup_setting(key, 0).is_some()
	}

	/// Resolve a setting to its fully expanded value.
	///
	/// Undefined settings, and settings which (indirectly) refer to
	/// themselves, resolve to an empty string.
	pub fn resolve(&self, key: &str) -> String {
		resolve(key, self)
	}

	/// Expand all `$(...)` references in a template.
	pub fn expand(&self, template: &str) -> String {
		expand(template, self)
	}
}
