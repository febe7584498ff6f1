//! The specification registry: every known tool, compiler, linker and file
//! type, looked up by identifier in an ordered list of domains.
//!
//! > [`SpecDefinition`]s → [`SpecRegistry::load()`] → [`ToolSpec`]s
//!
//! The registry is built once and is immutable afterwards. It is passed
//! explicitly to everything that needs it, and can be shared between
//! threads.

mod flatten;
mod types;

pub use self::types::{
	FileType, OptionType, SpecDefinition, SpecKind, ToolOption, ToolSpec,
};

use crate::error::SpecError;
use crate::path;
use indexmap::map::IndexMap;
use log::debug;

/// All loaded specifications.
#[derive(Debug, Default)]
pub struct SpecRegistry {
	/// The flattened specifications. The index in this vector is their ID.
	specs: Vec<ToolSpec>,
	/// `(kind, domain, identifier)` to index in `specs`.
	index: IndexMap<(SpecKind, String, String), usize>,
	file_types: Vec<FileType>,
}

impl SpecRegistry {
	/// Flatten the definitions and build a registry.
	pub fn load(
		definitions: &[SpecDefinition],
		file_types: Vec<FileType>,
	) -> Result<SpecRegistry, SpecError> {
		let specs = flatten::flatten(definitions)?;
		let index = specs
			.iter()
			.enumerate()
			.map(|(i, spec)| ((spec.kind, spec.domain.clone(), spec.identifier.clone()), i))
			.collect();
		debug!(
			"Loaded {} specifications and {} file types",
			specs.len(),
			file_types.len()
		);
		Ok(SpecRegistry {
			specs,
			index,
			file_types,
		})
	}

	/// All specifications, in load order.
	pub fn specs(&self) -> &[ToolSpec] {
		&self.specs
	}

	/// Look up a specification of the given kind.
	///
	/// The domains are searched in order; the first one which contains the
	/// identifier wins.
	pub fn spec<S: AsRef<str>>(
		&self,
		kind: SpecKind,
		identifier: &str,
		domains: &[S],
	) -> Option<&ToolSpec> {
		domains.iter().find_map(|domain| {
			self.index
				.get(&(kind, domain.as_ref().to_string(), identifier.to_string()))
				.map(|&i| &self.specs[i])
		})
	}

	pub fn tool<S: AsRef<str>>(&self, identifier: &str, domains: &[S]) -> Option<&ToolSpec> {
		self.spec(SpecKind::Tool, identifier, domains)
	}

	pub fn compiler<S: AsRef<str>>(&self, identifier: &str, domains: &[S]) -> Option<&ToolSpec> {
		self.spec(SpecKind::Compiler, identifier, domains)
	}

	pub fn linker<S: AsRef<str>>(&self, identifier: &str, domains: &[S]) -> Option<&ToolSpec> {
		self.spec(SpecKind::Linker, identifier, domains)
	}

	pub fn file_type(&self, identifier: &str) -> Option<&FileType> {
		self.file_types.iter().find(|t| t.identifier == identifier)
	}

	/// Find the file type of a path by its extension (ignoring case).
	pub fn file_type_for_path(&self, path: &str) -> Option<&FileType> {
		let extension = path::extension(path);
		if extension.is_empty() {
			return None;
		}
		self.file_types.iter().find(|t| {
			t.extensions
				.iter()
				.any(|e| e.eq_ignore_ascii_case(extension))
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn registry() -> SpecRegistry {
		let mut default_ld = SpecDefinition::new("default", "ld", SpecKind::Linker);
		default_ld.name = Some("default ld".to_string());
		let macos_ld = SpecDefinition::new("macosx", "ld", SpecKind::Linker).based_on("default:ld");
		let touch = SpecDefinition::new("default", "touch", SpecKind::Tool);
		SpecRegistry::load(
			&[default_ld, macos_ld, touch],
			vec![
				FileType::new("compiled.mach-o.dylib", &["dylib"]),
				FileType::framework_wrapper("wrapper.framework", &["framework"]),
			],
		)
		.unwrap()
	}

	#[test]
	fn domain_order() {
		let registry = registry();
		let spec = registry.linker("ld", &["macosx", "default"]).unwrap();
		assert_eq!(spec.domain, "macosx");
		assert_eq!(spec.name.as_ref().unwrap(), "default ld");
		let spec = registry.linker("ld", &["iphoneos", "default"]).unwrap();
		assert_eq!(spec.domain, "default");
		assert!(registry.linker("ld", &["iphoneos"]).is_none());
	}

	#[test]
	fn kinds_are_separate() {
		let registry = registry();
		assert!(registry.tool("touch", &["default"]).is_some());
		assert!(registry.linker("touch", &["default"]).is_none());
		assert!(registry.tool("ld", &["default"]).is_none());
	}

	#[test]
	fn file_types() {
		let registry = registry();
		assert!(registry.file_type_for_path("/F/Foo.framework").unwrap().is_framework_wrapper);
		assert_eq!(
			registry.file_type_for_path("libz.DYLIB").unwrap().identifier,
			"compiled.mach-o.dylib"
		);
		assert!(registry.file_type_for_path("README").is_none());
		assert!(registry.file_type("wrapper.framework").is_some());
	}
}
