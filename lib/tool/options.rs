//! Turning the options of a tool into command line arguments.

use super::environment::ToolEnvironment;
use crate::path;
use crate::registry::{FileType, OptionType, ToolOption};
use crate::setting::{Level, Overlay};
use indexmap::map::IndexMap;

/// The arguments and environment variables produced by the options of a
/// tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsResult {
	/// In the order the options were declared.
	pub arguments: Vec<String>,
	/// The expanded environment variables of the tool, followed by those
	/// exported by options.
	pub environment: IndexMap<String, String>,
}

impl OptionsResult {
	/// Evaluate all options of the tool, in declaration order.
	///
	/// Options with a condition that doesn't match the context, or with a
	/// list of file types that doesn't contain `file_type`, are skipped.
	pub fn create(
		tool: &ToolEnvironment,
		working_directory: &str,
		file_type: Option<&FileType>,
	) -> OptionsResult {
		let mut result = OptionsResult::default();

		for (name, template) in &tool.spec().environment_variables {
			result.environment.insert(name.clone(), tool.expand(template));
		}

		for option in &tool.spec().options {
			if !option.condition.matches(tool.context()) {
				continue;
			}
			if !option.file_types.is_empty() {
				match file_type {
					Some(t) if option.file_types.contains(&t.identifier) => {}
					_ => continue,
				}
			}
			result.add(option, tool, working_directory);
		}

		result
	}

	fn add(&mut self, option: &ToolOption, tool: &ToolEnvironment, working_directory: &str) {
		let mut value = tool.resolve(&option.name);

		let mut values = if option.kind == OptionType::Boolean {
			value = if is_true(&value) { "YES" } else { "NO" }.to_string();
			vec![value.clone()]
		} else if option.kind.is_list() {
			split_list(&value)
		} else if value.is_empty() {
			Vec::new()
		} else {
			vec![value.clone()]
		};

		if option.kind.is_path() {
			for v in &mut values {
				*v = path::resolve_relative(v, working_directory);
			}
			value = values.join(" ");
		}

		if let Some(templates) = option.command_line_args_by_value.get(&value) {
			for template in templates {
				self.push_expanded(template, &value, tool);
			}
		} else {
			let skip = values.is_empty() || (option.kind == OptionType::Boolean && value == "NO");
			if skip && !option.force {
				return;
			}
			if values.is_empty() {
				values.push(String::new());
			}
			if !option.command_line_args.is_empty() {
				for v in &values {
					for template in &option.command_line_args {
						self.push_expanded(template, v, tool);
					}
				}
			} else if let Some(flag) = &option.command_line_flag {
				if option.kind == OptionType::Boolean {
					self.arguments.push(flag.clone());
				} else {
					for v in &values {
						self.arguments.push(flag.clone());
						if !v.is_empty() {
							self.arguments.push(v.clone());
						}
					}
				}
			}
		}

		if let Some(variable) = &option.environment_variable {
			self.environment.insert(variable.clone(), value);
		}
	}

	// Expands one argument template, with `$(value)` bound to `value`.
	fn push_expanded(&mut self, template: &str, value: &str, tool: &ToolEnvironment) {
		let mut binding = Level::new();
		binding.set("value", &value.replace('$', "$$"));
		let argument = Overlay::new(&binding, &tool.scope()).expand(template);
		if !argument.is_empty() {
			self.arguments.push(argument);
		}
	}
}

fn is_true(value: &str) -> bool {
	value.eq_ignore_ascii_case("YES") || value.eq_ignore_ascii_case("TRUE") || value == "1"
}

/// Split a list value the way a shell would, or on whitespace if the
/// quoting is broken.
pub fn split_list(value: &str) -> Vec<String> {
	shlex::split(value)
		.unwrap_or_else(|| value.split_whitespace().map(String::from).collect())
}
