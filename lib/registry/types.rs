//! The records stored in a [`SpecRegistry`][super::SpecRegistry].

use crate::setting::Condition;
use indexmap::map::IndexMap;
use std::fmt;

/// The kind of a tool specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKind {
	Tool,
	Compiler,
	Linker,
}

impl fmt::Display for SpecKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match self {
			SpecKind::Tool => "tool",
			SpecKind::Compiler => "compiler",
			SpecKind::Linker => "linker",
		})
	}
}

/// A file type, as far as planning is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
	pub identifier: String,
	/// Extensions (without dot) of files of this type.
	pub extensions: Vec<String>,
	/// Whether this is a bundle that is linked with `-framework`.
	pub is_framework_wrapper: bool,
}

impl FileType {
	pub fn new(identifier: &str, extensions: &[&str]) -> Self {
		FileType {
			identifier: identifier.to_string(),
			extensions: extensions.iter().map(|e| e.to_string()).collect(),
			is_framework_wrapper: false,
		}
	}

	/// A file type for framework bundles.
	pub fn framework_wrapper(identifier: &str, extensions: &[&str]) -> Self {
		FileType {
			is_framework_wrapper: true,
			..FileType::new(identifier, extensions)
		}
	}
}

/// The type of the value of a [`ToolOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
	String,
	/// Whitespace separated, with shell-style quoting.
	StringList,
	/// `YES` or `NO`. Empty means `NO`.
	Boolean,
	/// A path, made absolute relative to the working directory.
	Path,
	/// Like [`StringList`][Self::StringList], but every element is a path.
	PathList,
	/// One of a fixed set of values.
	Enumeration,
}

impl OptionType {
	pub fn is_list(self) -> bool {
		self == OptionType::StringList || self == OptionType::PathList
	}

	pub fn is_path(self) -> bool {
		self == OptionType::Path || self == OptionType::PathList
	}
}

/// A build setting a tool understands, and how it ends up on the command
/// line.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOption {
	/// The name of the build setting.
	pub name: String,
	pub kind: OptionType,
	/// The value if no level defines the setting. May contain references.
	pub default_value: Option<String>,
	/// Put in front of the value (or alone, for booleans).
	pub command_line_flag: Option<String>,
	/// Argument templates, with `$(value)` bound to the value.
	///
	/// Used once for every element of list values.
	pub command_line_args: Vec<String>,
	/// Argument templates for specific values. Takes precedence over
	/// `command_line_args` and `command_line_flag`.
	pub command_line_args_by_value: IndexMap<String, Vec<String>>,
	/// Only applies when this matches the context.
	pub condition: Condition,
	/// Only applies to these file types, if not empty.
	pub file_types: Vec<String>,
	/// Also export the value as this environment variable.
	pub environment_variable: Option<String>,
	/// Emit arguments even for an empty value.
	pub force: bool,
}

impl ToolOption {
	pub fn new(name: &str, kind: OptionType) -> Self {
		ToolOption {
			name: name.to_string(),
			kind,
			default_value: None,
			command_line_flag: None,
			command_line_args: Vec::new(),
			command_line_args_by_value: IndexMap::new(),
			condition: Condition::always(),
			file_types: Vec::new(),
			environment_variable: None,
			force: false,
		}
	}
}

/// A fully resolved tool, compiler or linker specification.
///
/// All `BasedOn` inheritance has already been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
	pub identifier: String,
	pub domain: String,
	pub kind: SpecKind,
	pub name: Option<String>,
	/// Template for the executable, like `$(LD)`.
	pub exec_path: Option<String>,
	/// The executable to use if `exec_path` expands to nothing.
	pub default_exec_path: Option<String>,
	/// Command line template. See [`tool::tokens`][crate::tool::tokens].
	pub command_line: Option<String>,
	/// Template for the log message.
	pub rule_format: Option<String>,
	/// Output path templates, for tools that process files one by one.
	pub outputs: Vec<String>,
	/// Options, in the order their arguments appear on the command line.
	pub options: Vec<ToolOption>,
	/// Environment variable templates exported to the tool.
	pub environment_variables: IndexMap<String, String>,
	/// Settings defaults, below all other levels.
	pub default_settings: IndexMap<String, String>,
	pub supports_input_file_list: bool,
	/// Inputs are directories of which all contents are dependencies.
	pub deeply_stat_input_directories: bool,
	/// Template for the path of the `ld -dependency_info` file.
	pub dependency_info_file: Option<String>,
	/// Template for the path of a Makefile-style dependency file.
	pub dependency_file: Option<String>,
}

impl ToolSpec {
	pub fn new(domain: &str, identifier: &str, kind: SpecKind) -> Self {
		ToolSpec {
			identifier: identifier.to_string(),
			domain: domain.to_string(),
			kind,
			name: None,
			exec_path: None,
			default_exec_path: None,
			command_line: None,
			rule_format: None,
			outputs: Vec::new(),
			options: Vec::new(),
			environment_variables: IndexMap::new(),
			default_settings: IndexMap::new(),
			supports_input_file_list: false,
			deeply_stat_input_directories: false,
			dependency_info_file: None,
			dependency_file: None,
		}
	}

	/// The name used in log messages: the `name`, or else the identifier.
	pub fn display_name(&self) -> &str {
		self.name.as_ref().unwrap_or(&self.identifier)
	}
}

/// A specification as loaded, before inheritance is applied.
///
/// Every `None` (or empty) field is inherited from the specification this
/// one is based on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDefinition {
	pub identifier: String,
	pub domain: String,
	pub kind: SpecKind,
	/// `identifier` or `domain:identifier`.
	pub based_on: Option<String>,
	pub name: Option<String>,
	pub exec_path: Option<String>,
	pub default_exec_path: Option<String>,
	pub command_line: Option<String>,
	pub rule_format: Option<String>,
	pub outputs: Option<Vec<String>>,
	/// Merged with the base options by name.
	pub options: Vec<ToolOption>,
	/// Merged with the base variables.
	pub environment_variables: IndexMap<String, String>,
	/// Merged with the base defaults.
	pub default_settings: IndexMap<String, String>,
	pub supports_input_file_list: Option<bool>,
	pub deeply_stat_input_directories: Option<bool>,
	pub dependency_info_file: Option<String>,
	pub dependency_file: Option<String>,
}

impl SpecDefinition {
	pub fn new(domain: &str, identifier: &str, kind: SpecKind) -> Self {
		SpecDefinition {
			identifier: identifier.to_string(),
			domain: domain.to_string(),
			kind,
			based_on: None,
			name: None,
			exec_path: None,
			default_exec_path: None,
			command_line: None,
			rule_format: None,
			outputs: None,
			options: Vec::new(),
			environment_variables: IndexMap::new(),
			default_settings: IndexMap::new(),
			supports_input_file_list: None,
			deeply_stat_input_directories: None,
			dependency_info_file: None,
			dependency_file: None,
		}
	}

	/// Builder-style setter for [`based_on`][Self::based_on].
	pub fn based_on(mut self, base: &str) -> Self {
		self.based_on = Some(base.to_string());
		self
	}
}
