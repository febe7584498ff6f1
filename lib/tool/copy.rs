//! Copying files into the product, like resources and embedded frameworks.

use super::context::ToolContext;
use super::environment::ToolEnvironment;
use super::invocation::{Executable, Invocation};
use super::options::OptionsResult;
use super::resolver::lookup;
use super::tokens::expand_tool;
use crate::error::LookupError;
use crate::path;
use crate::registry::{SpecKind, ToolSpec};
use crate::setting::Environment;
use crate::target::{PhaseEnvironment, PhaseFile};

pub const IDENTIFIER: &str = "com.apple.compilers.pbxcp";

/// Used when the specification doesn't name an executable.
pub const DEFAULT_EXECUTABLE: &str = "builtin-copy";

#[derive(Debug, Clone, Copy)]
pub struct CopyResolver<'a> {
	spec: &'a ToolSpec,
}

impl<'a> CopyResolver<'a> {
	/// Find the copy tool, which is usually declared as a compiler.
	pub fn create(phase: &PhaseEnvironment<'a>) -> Result<Self, LookupError> {
		let spec = lookup(phase, IDENTIFIER, &[SpecKind::Compiler, SpecKind::Tool])?;
		Ok(CopyResolver { spec })
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// Plan copying all `files` into `output_directory`, with a single
	/// invocation.
	///
	/// Every file ends up as `<output_directory>/<file name>`. A non-empty
	/// `log_message` replaces the default one.
	pub fn resolve(
		&self,
		context: &mut ToolContext,
		environment: &Environment,
		files: &[PhaseFile],
		output_directory: &str,
		log_message: &str,
	) {
		let working_directory = context.working_directory().to_string();
		let output_directory = path::resolve_relative(output_directory, &working_directory);
		let inputs: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
		let outputs: Vec<String> = inputs
			.iter()
			.map(|i| format!("{}/{}", output_directory, path::base_name(i)))
			.collect();
		let tool = ToolEnvironment::create(
			self.spec,
			environment,
			&working_directory,
			&inputs,
			&outputs,
		);

		let file_type = files.first().and_then(|f| f.file_type.as_ref());
		let options = OptionsResult::create(&tool, &working_directory, file_type);

		let mut special = tool.inputs().to_vec();
		special.push(output_directory.clone());

		let executable = if self.spec.exec_path.is_none() && self.spec.default_exec_path.is_none() {
			Some(DEFAULT_EXECUTABLE)
		} else {
			None
		};
		let expansion = expand_tool(&tool, &options, executable, &special);

		let log_message = if log_message.is_empty() {
			format!("PBXCp {} {}", tool.inputs().join(" "), output_directory)
		} else {
			log_message.to_string()
		};

		context.push(Invocation {
			executable: Executable::determine(&expansion.executable),
			arguments: expansion.arguments,
			environment: options.environment,
			working_directory,
			inputs: tool.inputs().to_vec(),
			outputs: tool.outputs().to_vec(),
			log_message,
			..Invocation::default()
		});
	}
}
