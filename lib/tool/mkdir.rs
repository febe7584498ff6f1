//! Creating directories.

use super::context::ToolContext;
use super::invocation::{Executable, Invocation};
use super::resolver::lookup;
use crate::error::LookupError;
use crate::path;
use crate::registry::{SpecKind, ToolSpec};
use crate::target::PhaseEnvironment;

pub const IDENTIFIER: &str = "com.apple.tools.mkdir";

const EXECUTABLE: &str = "/bin/mkdir";

#[derive(Debug, Clone, Copy)]
pub struct MakeDirectoryResolver<'a> {
	spec: &'a ToolSpec,
}

impl<'a> MakeDirectoryResolver<'a> {
	pub fn create(phase: &PhaseEnvironment<'a>) -> Result<Self, LookupError> {
		let spec = lookup(phase, IDENTIFIER, &[SpecKind::Tool])?;
		Ok(MakeDirectoryResolver { spec })
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// Plan creating `directory` and its parents.
	pub fn resolve(
		&self,
		context: &mut ToolContext,
		directory: &str,
		creates_product_structure: bool,
	) {
		let directory = path::resolve_relative(directory, context.working_directory());
		let working_directory = context.working_directory().to_string();
		context.push(Invocation {
			executable: Executable::determine(EXECUTABLE),
			arguments: vec!["-p".to_string(), directory.clone()],
			working_directory,
			log_message: format!("MkDir {}", directory),
			outputs: vec![directory],
			creates_product_structure,
			..Invocation::default()
		});
	}
}
