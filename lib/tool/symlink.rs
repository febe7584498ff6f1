//! Creating symbolic links, like the `Versions/Current` link of a framework.

use super::context::ToolContext;
use super::invocation::{Executable, Invocation};
use super::resolver::lookup;
use crate::error::LookupError;
use crate::path;
use crate::registry::{SpecKind, ToolSpec};
use crate::target::PhaseEnvironment;

pub const IDENTIFIER: &str = "com.apple.tools.symlink";

const EXECUTABLE: &str = "/bin/ln";

#[derive(Debug, Clone, Copy)]
pub struct SymlinkResolver<'a> {
	spec: &'a ToolSpec,
}

impl<'a> SymlinkResolver<'a> {
	pub fn create(phase: &PhaseEnvironment<'a>) -> Result<Self, LookupError> {
		let spec = lookup(phase, IDENTIFIER, &[SpecKind::Tool])?;
		Ok(SymlinkResolver { spec })
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// Plan creating a symbolic link at `link_path`, pointing to
	/// `target_path`.
	///
	/// The target is passed to `ln` as given, so relative targets stay
	/// relative to the link.
	pub fn resolve(
		&self,
		context: &mut ToolContext,
		working_directory: &str,
		link_path: &str,
		target_path: &str,
		creates_product_structure: bool,
	) {
		let link = path::resolve_relative(link_path, working_directory);
		let target = path::resolve_relative(target_path, working_directory);
		context.push(Invocation {
			executable: Executable::determine(EXECUTABLE),
			arguments: vec!["-sfh".to_string(), target_path.to_string(), link_path.to_string()],
			working_directory: working_directory.to_string(),
			phony_inputs: vec![target],
			outputs: vec![link],
			log_message: format!("SymLink {} {}", target_path, link_path),
			creates_product_structure,
			..Invocation::default()
		});
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::registry::{SpecDefinition, SpecRegistry};
	use crate::setting::Environment;
	use crate::target::TargetEnvironment;

	#[test]
	fn symlink() {
		let registry = SpecRegistry::load(
			&[SpecDefinition::new("default", IDENTIFIER, SpecKind::Tool)],
			Vec::new(),
		)
		.unwrap();
		let target = TargetEnvironment::new(
			"Foo",
			Environment::default(),
			vec!["default".to_string()],
			"/build",
		);
		let phase = PhaseEnvironment::new(&registry, &target);
		let resolver = SymlinkResolver::create(&phase).unwrap();
		let mut context = ToolContext::new("/build");
		resolver.resolve(
			&mut context,
			"/build/Foo.framework",
			"Versions/Current",
			"A",
			true,
		);
		let invocation = &context.invocations()[0];
		assert_eq!(invocation.executable, Executable::External("/bin/ln".to_string()));
		assert_eq!(invocation.arguments, ["-sfh", "A", "Versions/Current"]);
		assert_eq!(invocation.phony_inputs, ["/build/Foo.framework/A"]);
		assert_eq!(invocation.outputs, ["/build/Foo.framework/Versions/Current"]);
		assert!(invocation.inputs.is_empty());
		assert_eq!(invocation.log_message, "SymLink A Versions/Current");
		assert!(invocation.creates_product_structure);
	}

	#[test]
	fn missing_tool() {
		let registry = SpecRegistry::default();
		let target = TargetEnvironment::default();
		let phase = PhaseEnvironment::new(&registry, &target);
		let error = SymlinkResolver::create(&phase).unwrap_err();
		assert_eq!(error.kind, Some(SpecKind::Tool));
		assert_eq!(error.identifier, IDENTIFIER);
	}
}
