//! The planned tool executions produced by resolvers.

use indexmap::map::IndexMap;
use raw_string::RawString;

/// The program an [`Invocation`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
	/// An external program, by path or by name.
	External(String),
	/// A tool built into the executor, like `builtin-copy`.
	Builtin(String),
}

impl Executable {
	/// Names starting with `builtin-` are builtin, anything else is external.
	pub fn determine(name: &str) -> Executable {
		if name.starts_with("builtin-") {
			Executable::Builtin(name.to_string())
		} else {
			Executable::External(name.to_string())
		}
	}

	pub fn path(&self) -> &str {
		match self {
			Executable::External(s) | Executable::Builtin(s) => s,
		}
	}

	pub fn is_builtin(&self) -> bool {
		match self {
			Executable::Builtin(_) => true,
			Executable::External(_) => false,
		}
	}
}

impl Default for Executable {
	fn default() -> Self {
		Executable::External(String::new())
	}
}

/// A file to write before the owning [`Invocation`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryFile {
	pub path: String,
	pub contents: RawString,
	/// Make the file executable after writing it.
	pub executable: bool,
}

impl AuxiliaryFile {
	pub fn new(path: String, contents: RawString) -> Self {
		AuxiliaryFile {
			path,
			contents,
			executable: false,
		}
	}
}

/// The format of a file with extra dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyFormat {
	/// Written by `ld -dependency_info`.
	Binary,
	/// Everything inside the directory is a dependency.
	Directory,
	/// A Makefile-formatted file, as written by `cc -MD`.
	Makefile,
}

/// Where extra dependencies will be found after the tool has run.
///
/// The file is never read during planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyInfo {
	pub format: DependencyFormat,
	pub path: String,
}

impl DependencyInfo {
	pub fn new(format: DependencyFormat, path: String) -> Self {
		DependencyInfo { format, path }
	}
}

/// A single planned execution of a tool.
///
/// Ordering between invocations is determined by the executor from the
/// inputs and outputs, not by their position in a [`ToolContext`][super::ToolContext].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
	pub executable: Executable,
	/// The arguments, not including the executable itself.
	pub arguments: Vec<String>,
	/// Environment variables to set, in order.
	pub environment: IndexMap<String, String>,
	pub working_directory: String,
	pub inputs: Vec<String>,
	pub outputs: Vec<String>,
	/// Inputs which only order this invocation, and are not checked for
	/// changes.
	pub phony_inputs: Vec<String>,
	pub auxiliary_files: Vec<AuxiliaryFile>,
	pub dependency_info: Vec<DependencyInfo>,
	/// The message to show when running this invocation.
	pub log_message: String,
	/// This invocation creates (part of) the structure of the product, like
	/// a directory or a symlink inside a bundle. Such invocations run before
	/// anything else writes into the product.
	pub creates_product_structure: bool,
}
