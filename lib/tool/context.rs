//! The per-target list of invocations that resolvers append to.

use super::invocation::{AuxiliaryFile, Invocation};
use log::debug;

/// The invocations planned for one target, in the order they were appended.
///
/// Owned by a single target. Appending requires `&mut`, so the plan of one
/// target is always built by one thread at a time.
#[derive(Debug, Default, Clone)]
pub struct ToolContext {
	working_directory: String,
	invocations: Vec<Invocation>,
}

impl ToolContext {
	pub fn new(working_directory: &str) -> Self {
		ToolContext {
			working_directory: working_directory.to_string(),
			invocations: Vec::new(),
		}
	}

	/// The directory relative paths in this target are resolved against.
	pub fn working_directory(&self) -> &str {
		&self.working_directory
	}

	/// Append an invocation.
	pub fn push(&mut self, invocation: Invocation) {
		debug!(
			"Planned {}: {:?}",
			invocation.executable.path(),
			invocation.outputs
		);
		self.invocations.push(invocation);
	}

	pub fn invocations(&self) -> &[Invocation] {
		&self.invocations
	}

	pub fn into_invocations(self) -> Vec<Invocation> {
		self.invocations
	}

	/// All auxiliary files of all invocations, in order.
	pub fn auxiliary_files(&self) -> impl Iterator<Item = &AuxiliaryFile> {
		self.invocations.iter().flat_map(|i| i.auxiliary_files.iter())
	}
}
