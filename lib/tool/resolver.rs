//! The generic tool resolver, and looking up the specifications of
//! resolvers.

use super::context::ToolContext;
use super::environment::ToolEnvironment;
use super::invocation::{DependencyFormat, DependencyInfo, Executable, Invocation};
use super::options::OptionsResult;
use super::tokens::expand_tool;
use crate::error::LookupError;
use crate::path;
use crate::registry::{FileType, SpecKind, ToolSpec};
use crate::setting::Environment;
use crate::target::{PhaseEnvironment, PhaseFile};
use log::warn;

/// Look up a specification of one of the `kinds`, trying them in order.
///
/// Logs a warning when it can't be found.
pub fn lookup<'a>(
	phase: &PhaseEnvironment<'a>,
	identifier: &str,
	kinds: &[SpecKind],
) -> Result<&'a ToolSpec, LookupError> {
	let domains = &phase.target.spec_domains;
	let found = kinds
		.iter()
		.find_map(|&kind| phase.registry.spec(kind, identifier, &domains[..]));
	found.ok_or_else(|| {
		let error = LookupError {
			kind: if kinds.len() == 1 { Some(kinds[0]) } else { None },
			identifier: identifier.to_string(),
			domains: domains.clone(),
		};
		warn!("{}", error);
		error
	})
}

/// Resolves invocations of any tool, compiler or linker without special
/// needs.
#[derive(Debug, Clone, Copy)]
pub struct ToolResolver<'a> {
	spec: &'a ToolSpec,
}

impl<'a> ToolResolver<'a> {
	/// Find the tool (or else the compiler, or else the linker) with this
	/// identifier.
	pub fn create(phase: &PhaseEnvironment<'a>, identifier: &str) -> Result<Self, LookupError> {
		let spec = lookup(
			phase,
			identifier,
			&[SpecKind::Tool, SpecKind::Compiler, SpecKind::Linker],
		)?;
		Ok(ToolResolver::new(spec))
	}

	pub fn new(spec: &'a ToolSpec) -> Self {
		ToolResolver { spec }
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// Plan one invocation processing `files` into `output_directory`.
	///
	/// The outputs are the output templates of the tool. A non-empty
	/// `log_message` replaces the one of the tool.
	pub fn resolve_files(
		&self,
		context: &mut ToolContext,
		environment: &Environment,
		files: &[PhaseFile],
		output_directory: &str,
		log_message: &str,
	) {
		let working_directory = context.working_directory().to_string();
		let tool = ToolEnvironment::create_for_files(
			self.spec,
			environment,
			&working_directory,
			files,
			output_directory,
		);
		let file_type = files.first().and_then(|f| f.file_type.as_ref());
		let mut invocation = self.invocation(&tool, &working_directory, file_type, log_message);

		if self.spec.deeply_stat_input_directories {
			for input in tool.inputs() {
				invocation
					.dependency_info
					.push(DependencyInfo::new(DependencyFormat::Directory, input.clone()));
			}
		}

		context.push(invocation);
	}

	/// Plan one invocation with the given inputs and outputs.
	pub fn resolve(
		&self,
		context: &mut ToolContext,
		environment: &Environment,
		inputs: &[String],
		outputs: &[String],
		log_message: &str,
	) {
		let working_directory = context.working_directory().to_string();
		let tool = ToolEnvironment::create(
			self.spec,
			environment,
			&working_directory,
			inputs,
			outputs,
		);
		let invocation = self.invocation(&tool, &working_directory, None, log_message);
		context.push(invocation);
	}

	fn invocation(
		&self,
		tool: &ToolEnvironment,
		working_directory: &str,
		file_type: Option<&FileType>,
		log_message: &str,
	) -> Invocation {
		let options = OptionsResult::create(tool, working_directory, file_type);
		let expansion = expand_tool(tool, &options, None, &[]);

		let mut dependency_info = Vec::new();
		if let Some(template) = &self.spec.dependency_file {
			let file = tool.expand(template);
			if !file.is_empty() {
				dependency_info.push(DependencyInfo::new(
					DependencyFormat::Makefile,
					path::resolve_relative(&file, working_directory),
				));
			}
		}

		Invocation {
			executable: Executable::determine(&expansion.executable),
			arguments: expansion.arguments,
			environment: options.environment,
			working_directory: working_directory.to_string(),
			inputs: tool.inputs().to_vec(),
			outputs: tool.outputs().to_vec(),
			dependency_info,
			log_message: if log_message.is_empty() {
				expansion.log_message
			} else {
				log_message.to_string()
			},
			..Invocation::default()
		}
	}
}
