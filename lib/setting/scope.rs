//! Setting lookup through stacks of levels.

use super::condition::Context;
use super::environment::Environment;
use super::expand::{expand, resolve};
use super::level::{Level, Setting};

/// Something settings can be looked up in, level by level.
///
/// Levels are numbered from 0 (highest precedence) upwards.
pub trait SettingScope {
	/// The context conditions are matched against.
	fn context(&self) -> &Context;

	/// The number of levels.
	fn depth(&self) -> usize;

	/// Find the applicable setting for `key`, skipping the levels before
	/// `from`.
	///
	/// Returns the number of the level it was found in.
	fn lookup_setting(&self, key: &str, from: usize) -> Option<(usize, &Setting)>;
}

impl SettingScope for Environment {
	fn context(&self) -> &Context {
		self.context()
	}

	fn depth(&self) -> usize {
		self.levels().len()
	}

	fn lookup_setting(&self, key: &str, from: usize) -> Option<(usize, &Setting)> {
		let context = self.context();
		self.levels()
			.iter()
			.enumerate()
			.skip(from)
			.find_map(|(i, level)| level.lookup(key, context).map(|setting| (i, setting)))
	}
}

/// Another scope with an extra level on top, below, or both, without
/// copying any of its levels.
///
/// Used for short-lived bindings, like `$(value)` while expanding the
/// command line arguments of a tool option, and for the levels a tool adds
/// around the environment of a target.
#[derive(Debug)]
pub struct Overlay<'a, S: ?Sized = Environment> {
	pub top: Option<&'a Level>,
	pub base: &'a S,
	pub bottom: Option<&'a Level>,
}

impl<'a, S: ?Sized> Clone for Overlay<'a, S> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, S: ?Sized> Copy for Overlay<'a, S> {}

impl<'a, S: SettingScope + ?Sized> Overlay<'a, S> {
	pub fn new(top: &'a Level, base: &'a S) -> Self {
		Overlay {
			top: Some(top),
			base,
			bottom: None,
		}
	}

	/// `base` between `top` and `bottom`.
	pub fn around(top: &'a Level, base: &'a S, bottom: &'a Level) -> Self {
		Overlay {
			top: Some(top),
			base,
			bottom: Some(bottom),
		}
	}

	/// See [`Environment::resolve`].
	pub fn resolve(&self, key: &str) -> String {
		resolve(key, self)
	}

	/// See [`Environment::expand`].
	pub fn expand(&self, template: &str) -> String {
		expand(template, self)
	}
}

impl<'a, S: SettingScope + ?Sized> SettingScope for Overlay<'a, S> {
	fn context(&self) -> &Context {
		self.base.context()
	}

	fn depth(&self) -> usize {
		usize::from(self.top.is_some()) + self.base.depth() + usize::from(self.bottom.is_some())
	}

	fn lookup_setting(&self, key: &str, from: usize) -> Option<(usize, &Setting)> {
		let context = self.base.context();
		let offset = usize::from(self.top.is_some());
		if let (Some(top), 0) = (self.top, from) {
			if let Some(setting) = top.lookup(key, context) {
				return Some((0, setting));
			}
		}
		let found = self
			.base
			.lookup_setting(key, from.saturating_sub(offset))
			.map(|(i, setting)| (i + offset, setting));
		if found.is_some() {
			return found;
		}
		let index = offset + self.base.depth();
		match self.bottom {
			Some(bottom) if from <= index => bottom.lookup(key, context).map(|s| (index, s)),
			_ => None,
		}
	}
}
