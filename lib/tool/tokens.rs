//! Expanding the command line template of a tool.
//!
//! A command line template is a list of words. These words are replaced:
//!
//!  - `[exec-path]`: nothing, the executable is not an argument.
//!  - `[options]`: the arguments from the [`OptionsResult`].
//!  - `[special-args]`: the arguments given by the resolver.
//!  - `[input]`, `[inputs]`: the first, or all, inputs.
//!  - `[output]`: the first output.
//!
//! Any other word is expanded in the tool environment, and dropped if it
//! expands to nothing.

use super::environment::ToolEnvironment;
use super::options::{split_list, OptionsResult};

/// The template used by tools without a command line template.
pub const DEFAULT_COMMAND_LINE: &str = "[exec-path] [options] [special-args]";

/// The executable, arguments and log message of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExpansion {
	pub executable: String,
	pub arguments: Vec<String>,
	pub log_message: String,
}

/// Expand the command line and log message of a tool.
///
/// The executable is `executable`, if given and not empty. Otherwise it is
/// the expanded executable path of the tool, or its default executable, or
/// finally its identifier.
pub fn expand_tool(
	tool: &ToolEnvironment,
	options: &OptionsResult,
	executable: Option<&str>,
	special_arguments: &[String],
) -> ToolExpansion {
	let spec = tool.spec();

	let executable = executable
		.filter(|e| !e.is_empty())
		.map(String::from)
		.or_else(|| expand_non_empty(tool, spec.exec_path.as_ref()))
		.or_else(|| expand_non_empty(tool, spec.default_exec_path.as_ref()))
		.unwrap_or_else(|| spec.identifier.clone());

	let template = spec
		.command_line
		.as_ref()
		.map_or(DEFAULT_COMMAND_LINE, String::as_str);

	let mut arguments = Vec::new();
	for word in split_list(template) {
		match word.as_str() {
			"[exec-path]" => {}
			"[options]" => arguments.extend_from_slice(&options.arguments),
			"[special-args]" => arguments.extend_from_slice(special_arguments),
			"[input]" => arguments.extend(tool.inputs().first().cloned()),
			"[inputs]" => arguments.extend_from_slice(tool.inputs()),
			"[output]" => arguments.extend(tool.outputs().first().cloned()),
			_ => {
				let expanded = tool.expand(&word);
				if !expanded.is_empty() {
					arguments.push(expanded);
				}
			}
		}
	}

	let log_message = expand_non_empty(tool, spec.rule_format.as_ref()).unwrap_or_else(|| {
		match tool.outputs().first() {
			Some(output) => format!("{} {}", spec.display_name(), output),
			None => spec.display_name().to_string(),
		}
	});

	ToolExpansion {
		executable,
		arguments,
		log_message,
	}
}

fn expand_non_empty(tool: &ToolEnvironment, template: Option<&String>) -> Option<String> {
	template
		.map(|t| tool.expand(t))
		.filter(|e| !e.is_empty())
}
