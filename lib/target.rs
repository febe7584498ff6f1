//! What resolvers get to know about the target being planned.

use crate::registry::{FileType, SpecRegistry};
use crate::setting::Environment;

/// The resolved settings of one target.
#[derive(Debug, Clone, Default)]
pub struct TargetEnvironment {
	pub name: String,
	/// All setting levels of the target, for its current context.
	pub environment: Environment,
	/// Where to look up specifications, in order.
	pub spec_domains: Vec<String>,
	/// Relative paths are relative to this directory, usually the project
	/// directory.
	pub working_directory: String,
}

impl TargetEnvironment {
	pub fn new(
		name: &str,
		environment: Environment,
		spec_domains: Vec<String>,
		working_directory: &str,
	) -> Self {
		TargetEnvironment {
			name: name.to_string(),
			environment,
			spec_domains,
			working_directory: working_directory.to_string(),
		}
	}
}

/// Everything needed to create the resolvers for a build phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseEnvironment<'a> {
	pub registry: &'a SpecRegistry,
	pub target: &'a TargetEnvironment,
}

impl<'a> PhaseEnvironment<'a> {
	pub fn new(registry: &'a SpecRegistry, target: &'a TargetEnvironment) -> Self {
		PhaseEnvironment { registry, target }
	}

	/// A file of this phase, with its type looked up by extension.
	pub fn file(&self, path: &str) -> PhaseFile {
		PhaseFile::new(path, self.registry.file_type_for_path(path).cloned())
	}
}

/// A file that is an input of a build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseFile {
	pub path: String,
	pub file_type: Option<FileType>,
}

impl PhaseFile {
	pub fn new(path: &str, file_type: Option<FileType>) -> Self {
		PhaseFile {
			path: path.to_string(),
			file_type,
		}
	}

	pub fn is_framework_wrapper(&self) -> bool {
		self.file_type
			.as_ref()
			.map_or(false, |t| t.is_framework_wrapper)
	}
}
