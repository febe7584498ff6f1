//! The linker resolver: `ld`, `libtool` and `lipo`.

use super::context::ToolContext;
use super::environment::ToolEnvironment;
use super::invocation::{AuxiliaryFile, DependencyFormat, DependencyInfo, Executable, Invocation};
use super::options::OptionsResult;
use super::resolver::lookup;
use super::tokens::expand_tool;
use crate::error::LookupError;
use crate::path;
use crate::registry::{SpecKind, ToolSpec};
use crate::setting::Environment;
use crate::target::{PhaseEnvironment, PhaseFile};
use indexmap::set::IndexSet;
use raw_string::RawString;

/// The primary linker.
pub const LINKER: &str = "com.apple.pbx.linkers.ld";
/// The static library archiver.
pub const LIBTOOL: &str = "com.apple.pbx.linkers.libtool";
/// The combiner of single-architecture binaries.
pub const LIPO: &str = "com.apple.xcode.linkers.lipo";

/// The file list is written here, and given to the linker with `-filelist`.
const FILE_LIST: &str = "$(LINK_FILE_LIST_$(variant)_$(arch))";

/// Resolves link steps.
#[derive(Debug, Clone, Copy)]
pub struct LinkerResolver<'a> {
	spec: &'a ToolSpec,
}

impl<'a> LinkerResolver<'a> {
	/// Find the linker with this identifier.
	pub fn create(phase: &PhaseEnvironment<'a>, identifier: &str) -> Result<Self, LookupError> {
		let spec = lookup(phase, identifier, &[SpecKind::Linker])?;
		Ok(LinkerResolver::new(spec))
	}

	pub fn new(spec: &'a ToolSpec) -> Self {
		LinkerResolver { spec }
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// Plan linking `input_files` and `input_libraries` into `output`.
	///
	/// `additional_arguments` come before all other special arguments.
	/// `executable` overrides the executable of the linker.
	#[allow(clippy::too_many_arguments)]
	pub fn resolve(
		&self,
		context: &mut ToolContext,
		environment: &Environment,
		input_files: &[PhaseFile],
		input_libraries: &[PhaseFile],
		output: &str,
		additional_arguments: &[String],
		executable: Option<&str>,
	) {
		let identifier = self.spec.identifier.as_str();
		let working_directory = context.working_directory().to_string();
		let inputs: Vec<String> = input_files.iter().map(|f| f.path.clone()).collect();
		let tool = ToolEnvironment::create(
			self.spec,
			environment,
			&working_directory,
			&inputs,
			&[output.to_string()],
		);

		let mut special = additional_arguments.to_vec();
		let mut auxiliary_files = Vec::new();
		let mut dependency_info = Vec::new();

		// Inputs, through a file list if possible.
		let file_list = if self.spec.supports_input_file_list || identifier == LIBTOOL {
			tool.expand(FILE_LIST)
		} else {
			String::new()
		};
		if file_list.is_empty() {
			special.extend_from_slice(tool.inputs());
		} else {
			let file_list = path::resolve_relative(&file_list, &working_directory);
			let mut contents = RawString::new();
			for input in tool.inputs() {
				contents.push_str(input.as_str());
				contents.push(b'\n');
			}
			auxiliary_files.push(AuxiliaryFile::new(file_list.clone(), contents));
			special.push("-filelist".to_string());
			special.push(file_list);
		}

		let libraries: Vec<String> = input_libraries
			.iter()
			.map(|l| path::resolve_relative(&l.path, &working_directory))
			.collect();

		// Library search paths.
		let search_paths: IndexSet<&str> = input_libraries
			.iter()
			.zip(&libraries)
			.filter(|(library, _)| !library.is_framework_wrapper())
			.map(|(_, p)| path::dir_name(p))
			.collect();
		for dir in search_paths {
			special.push(format!("-L{}", dir));
		}

		// Framework search path.
		if !(identifier == LIBTOOL && tool.resolve("MACH_O_TYPE") == "staticlib") {
			special.push(format!("-F{}", tool.resolve("BUILT_PRODUCTS_DIR")));
		}

		// The libraries themselves.
		for (library, p) in input_libraries.iter().zip(&libraries) {
			let name = path::base_name_without_extension(p);
			if library.is_framework_wrapper() {
				special.push("-framework".to_string());
				special.push(name.to_string());
			} else {
				let name = if name.starts_with("lib") { &name[3..] } else { name };
				special.push(format!("-l{}", name));
			}
		}

		if identifier == LINKER {
			if let Some(template) = &self.spec.dependency_info_file {
				let file = tool.expand(template);
				if !file.is_empty() {
					let file = path::resolve_relative(&file, &working_directory);
					special.push("-Xlinker".to_string());
					special.push("-dependency_info".to_string());
					special.push("-Xlinker".to_string());
					special.push(file.clone());
					dependency_info.push(DependencyInfo::new(DependencyFormat::Binary, file));
				}
			}
		}

		let file_type = input_files.first().and_then(|f| f.file_type.as_ref());
		let options = OptionsResult::create(&tool, &working_directory, file_type);
		let mut expansion = expand_tool(&tool, &options, executable, &special);

		// The lipo specification passes `-arch_only`, which lipo doesn't
		// understand.
		if identifier == LIPO {
			expansion.arguments.retain(|a| a != "-arch_only");
		}

		let mut invocation_inputs = tool.inputs().to_vec();
		invocation_inputs.extend(libraries);

		context.push(Invocation {
			executable: Executable::determine(&expansion.executable),
			arguments: expansion.arguments,
			environment: options.environment,
			working_directory,
			inputs: invocation_inputs,
			outputs: tool.outputs().to_vec(),
			auxiliary_files,
			dependency_info,
			log_message: expansion.log_message,
			..Invocation::default()
		});
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::registry::{FileType, OptionType, SpecDefinition, SpecRegistry, ToolOption};
	use crate::setting::{Context, Level};
	use crate::target::TargetEnvironment;

	fn registry() -> SpecRegistry {
		let mut ld = SpecDefinition::new("default", LINKER, SpecKind::Linker);
		ld.name = Some("Ld".to_string());
		ld.exec_path = Some("$(LD)".to_string());
		ld.supports_input_file_list = Some(true);
		ld.dependency_info_file =
			Some("$(OBJECT_FILE_DIR)/$(PRODUCT_NAME)_dependency_info.dat".to_string());
		ld.command_line = Some("[exec-path] [options] [special-args] -o $(OutputPath)".to_string());
		ld.rule_format = Some("Ld $(OutputPath) $(variant) $(arch)".to_string());
		let mut archs = ToolOption::new("ARCHS", OptionType::StringList);
		archs.command_line_flag = Some("-arch".to_string());
		ld.options = vec![archs];

		let mut direct =
			SpecDefinition::new("default", "com.example.ld", SpecKind::Linker).based_on(LINKER);
		direct.supports_input_file_list = Some(false);

		let mut libtool = SpecDefinition::new("default", LIBTOOL, SpecKind::Linker);
		libtool.exec_path = Some("libtool".to_string());
		libtool.command_line = Some(
			"[exec-path] -static -arch_only $(arch) [special-args] -o [output]".to_string(),
		);
		libtool.dependency_info_file =
			Some("$(OBJECT_FILE_DIR)/libtool_dependency_info.dat".to_string());

		let mut lipo = SpecDefinition::new("default", LIPO, SpecKind::Linker);
		lipo.exec_path = Some("lipo".to_string());
		lipo.command_line = Some(
			"[exec-path] -create [inputs] -arch_only $(arch) -output [output]".to_string(),
		);

		SpecRegistry::load(
			&[ld, direct, libtool, lipo],
			vec![
				FileType::new("compiled.mach-o.objfile", &["o"]),
				FileType::new("archive.ar", &["a"]),
				FileType::new("compiled.mach-o.dylib", &["dylib"]),
				FileType::framework_wrapper("wrapper.framework", &["framework"]),
			],
		)
		.unwrap()
	}

	fn target(settings: Vec<(&str, &str)>) -> TargetEnvironment {
		let mut level = Level::from_pairs(vec![
			("LD", "/usr/bin/clang"),
			("BUILT_PRODUCTS_DIR", "/build/Release"),
			("OBJECT_FILE_DIR", "/build/App.build/Objects"),
			("PRODUCT_NAME", "App"),
			("LINK_FILE_LIST_normal_arm64", "/build/App.build/App.LinkFileList"),
		]);
		level.extend(Level::from_pairs(settings).settings().iter().cloned());
		TargetEnvironment::new(
			"App",
			Environment::new(
				vec![level],
				Context::new().with("variant", "normal").with("arch", "arm64"),
			),
			vec!["default".to_string()],
			"/project",
		)
	}

	fn link(identifier: &str, target: &TargetEnvironment, libraries: &[&str]) -> Invocation {
		let registry = registry();
		let phase = PhaseEnvironment::new(&registry, target);
		let resolver = LinkerResolver::create(&phase, identifier).unwrap();
		let files = vec![phase.file("a.o"), phase.file("b.o")];
		let libraries: Vec<PhaseFile> = libraries.iter().map(|l| phase.file(l)).collect();
		let mut context = ToolContext::new(&target.working_directory);
		resolver.resolve(
			&mut context,
			&target.environment,
			&files,
			&libraries,
			"prog",
			&[],
			None,
		);
		context.into_invocations().remove(0)
	}

	#[test]
	fn link_with_file_list() {
		let target = target(vec![("ARCHS", "arm64")]);
		let invocation = link(LINKER, &target, &["/libs/libfoo.a"]);
		assert_eq!(invocation.executable, Executable::External("/usr/bin/clang".to_string()));
		#[rustfmt::skip]
		assert_eq!(invocation.arguments, [
			"-arch", "arm64",
			"-filelist", "/build/App.build/App.LinkFileList",
			"-L/libs",
			"-F/build/Release",
			"-lfoo",
			"-Xlinker", "-dependency_info", "-Xlinker", "/build/App.build/Objects/App_dependency_info.dat",
			"-o", "/project/prog",
		]);
		assert_eq!(invocation.outputs, ["/project/prog"]);
		assert_eq!(invocation.inputs, ["/project/a.o", "/project/b.o", "/libs/libfoo.a"]);
		assert_eq!(invocation.auxiliary_files.len(), 1);
		assert_eq!(invocation.auxiliary_files[0].path, "/build/App.build/App.LinkFileList");
		assert_eq!(
			invocation.auxiliary_files[0].contents,
			RawString::from_bytes(b"/project/a.o\n/project/b.o\n".to_vec())
		);
		assert_eq!(
			invocation.dependency_info,
			[DependencyInfo::new(
				DependencyFormat::Binary,
				"/build/App.build/Objects/App_dependency_info.dat".to_string()
			)]
		);
		assert_eq!(invocation.log_message, "Ld /project/prog normal arm64");
	}

	#[test]
	fn direct_inputs_and_library_names() {
		let target = target(vec![]);
		let invocation = link(
			"com.example.ld",
			&target,
			&["/a/libx.a", "/b/liby.dylib", "/a/libz.a", "/F/Foo.framework", "/c/bar.a"],
		);
		#[rustfmt::skip]
		assert_eq!(invocation.arguments, [
			"/project/a.o", "/project/b.o",
			"-L/a", "-L/b", "-L/c",
			"-F/build/Release",
			"-lx", "-ly", "-lz", "-framework", "Foo", "-lbar",
			"-o", "/project/prog",
		]);
		assert!(invocation.auxiliary_files.is_empty());
		// Not the primary linker.
		assert!(invocation.dependency_info.is_empty());
	}

	#[test]
	fn file_list_path_may_be_empty() {
		let mut target = target(vec![]);
		target.environment.insert_level(
			0,
			Level::from_pairs(vec![("LINK_FILE_LIST_normal_arm64", "")]),
		);
		let invocation = link(LINKER, &target, &[]);
		assert_eq!(
			&invocation.arguments[..3],
			["/project/a.o", "/project/b.o", "-F/build/Release"]
		);
		assert!(invocation.auxiliary_files.is_empty());
	}

	#[test]
	fn libtool() {
		let target = target(vec![("MACH_O_TYPE", "staticlib")]);
		let invocation = link(LIBTOOL, &target, &["/libs/libfoo.a"]);
		#[rustfmt::skip]
		assert_eq!(invocation.arguments, [
			"-static", "-arch_only", "arm64",
			"-filelist", "/build/App.build/App.LinkFileList",
			"-L/libs",
			"-lfoo",
			"-o", "/project/prog",
		]);
		assert_eq!(invocation.auxiliary_files.len(), 1);
		assert!(invocation.dependency_info.is_empty());

		let target = self::target(vec![("MACH_O_TYPE", "mh_dylib")]);
		let invocation = link(LIBTOOL, &target, &[]);
		assert!(invocation.arguments.contains(&"-F/build/Release".to_string()));
	}

	#[test]
	fn lipo_drops_arch_only() {
		let target = target(vec![]);
		let invocation = link(LIPO, &target, &[]);
		#[rustfmt::skip]
		assert_eq!(invocation.arguments, [
			"-create", "/project/a.o", "/project/b.o", "arm64", "-output", "/project/prog",
		]);
		assert_eq!(invocation.executable, Executable::External("lipo".to_string()));
	}

	#[test]
	fn deterministic() {
		let target = target(vec![("ARCHS", "arm64 x86_64")]);
		let a = link(LINKER, &target, &["/libs/libfoo.a", "/F/Foo.framework"]);
		let b = link(LINKER, &target, &["/libs/libfoo.a", "/F/Foo.framework"]);
		assert_eq!(a, b);
	}
}
