//! The settings environment of a single tool invocation.

use crate::path;
use crate::registry::ToolSpec;
use crate::setting::{Context, Environment, Level, Overlay};
use crate::target::PhaseFile;

/// A target's [`Environment`] with two extra levels: the paths of the
/// inputs and outputs of this invocation on top, and the defaults of the
/// tool at the bottom.
///
/// The environment of the target is borrowed, not copied. The extra levels
/// are layered around it with an [`Overlay`] on every lookup.
///
/// The tool level defines these settings, for both `Input` and `Output`:
///
///  - `InputPath`: the first path.
///  - `InputFileName`, `InputFileBase` and `InputFileSuffix`: its last
///    component, without extension, and only the extension (with the dot).
///  - `InputPaths`: all paths, shell quoted and separated by spaces.
///  - `InputPath_0`, `InputPath_1`, ...: every path by index.
///
/// Also `InputFileRelativePath` (the first input as it was given),
/// `OutputDir` and `TempFilesDir`.
///
/// The bottom level has the default settings of the tool, the defaults of
/// its options, and every dimension of the context (like `arch`), in that
/// order.
#[derive(Debug, Clone)]
pub struct ToolEnvironment<'a> {
	spec: &'a ToolSpec,
	base: &'a Environment,
	tool_level: Level,
	defaults: Level,
	inputs: Vec<String>,
	outputs: Vec<String>,
}

impl<'a> ToolEnvironment<'a> {
	/// Create the environment for a tool with known inputs and outputs.
	///
	/// Relative paths are resolved against `working_directory`.
	pub fn create(
		spec: &'a ToolSpec,
		environment: &'a Environment,
		working_directory: &str,
		inputs: &[String],
		outputs: &[String],
	) -> Self {
		let resolved_inputs = resolve_all(inputs, working_directory);
		let outputs = resolve_all(outputs, working_directory);

		let mut level = input_level(&resolved_inputs, inputs);
		define_paths(&mut level, "Output", &outputs);
		let output_dir = outputs.first().map_or("", |o| path::dir_name(o));
		level.set("OutputDir", &literal(output_dir));

		Self::with_tool_level(spec, environment, level, resolved_inputs, outputs)
	}

	/// Create the environment for a tool processing files into a directory.
	///
	/// The outputs are the output templates of the tool, expanded in this
	/// environment (so they can refer to `$(InputFileBase)` and
	/// `$(OutputDir)`).
	pub fn create_for_files(
		spec: &'a ToolSpec,
		environment: &'a Environment,
		working_directory: &str,
		files: &[PhaseFile],
		output_directory: &str,
	) -> Self {
		let inputs: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
		let resolved_inputs = resolve_all(&inputs, working_directory);
		let output_directory = path::resolve_relative(output_directory, working_directory);

		let mut level = input_level(&resolved_inputs, &inputs);
		level.set("OutputDir", &literal(&output_directory));

		let mut tool = Self::with_tool_level(
			spec,
			environment,
			level.clone(),
			resolved_inputs,
			Vec::new(),
		);

		let outputs: Vec<String> = spec
			.outputs
			.iter()
			.map(|template| tool.expand(template))
			.filter(|output| !output.is_empty())
			.map(|output| path::resolve_relative(&output, working_directory))
			.collect();

		define_paths(&mut level, "Output", &outputs);
		tool.tool_level = level;
		tool.outputs = outputs;
		tool
	}

	fn with_tool_level(
		spec: &'a ToolSpec,
		base: &'a Environment,
		tool_level: Level,
		inputs: Vec<String>,
		outputs: Vec<String>,
	) -> Self {
		let mut defaults = Level::new();
		for (key, value) in &spec.default_settings {
			defaults.set(key, value);
		}
		for option in &spec.options {
			if let Some(value) = &option.default_value {
				defaults.set(&option.name, value);
			}
		}
		for (dimension, value) in base.context().iter() {
			defaults.set(dimension, &literal(value));
		}

		ToolEnvironment {
			spec,
			base,
			tool_level,
			defaults,
			inputs,
			outputs,
		}
	}

	pub fn spec(&self) -> &'a ToolSpec {
		self.spec
	}

	/// The environment of the target, without the levels of the tool.
	pub fn base(&self) -> &'a Environment {
		self.base
	}

	pub fn context(&self) -> &'a Context {
		self.base.context()
	}

	/// All levels: the tool level, those of the target, and the defaults.
	pub fn scope(&self) -> Overlay<'_> {
		Overlay::around(&self.tool_level, self.base, &self.defaults)
	}

	/// The inputs, resolved against the working directory.
	pub fn inputs(&self) -> &[String] {
		&self.inputs
	}

	/// The outputs, resolved against the working directory.
	pub fn outputs(&self) -> &[String] {
		&self.outputs
	}

	pub fn resolve(&self, key: &str) -> String {
		self.scope().resolve(key)
	}

	pub fn expand(&self, template: &str) -> String {
		self.scope().expand(template)
	}
}

fn resolve_all(paths: &[String], working_directory: &str) -> Vec<String> {
	paths
		.iter()
		.map(|p| path::resolve_relative(p, working_directory))
		.collect()
}

/// Escape a value so it expands to itself.
fn literal(value: &str) -> String {
	value.replace('$', "$$")
}

fn input_level(inputs: &[String], given: &[String]) -> Level {
	let mut level = Level::new();
	define_paths(&mut level, "Input", inputs);
	let relative = given.first().map_or("", String::as_str);
	level.set("InputFileRelativePath", &literal(relative));
	level.set("TempFilesDir", "$(TEMP_FILES_DIR)");
	level
}

fn define_paths(level: &mut Level, prefix: &str, paths: &[String]) {
	let first = paths.first().map_or("", String::as_str);
	let extension = path::extension(first);
	let suffix = if extension.is_empty() {
		String::new()
	} else {
		format!(".{}", extension)
	};
	let all = shlex::try_join(paths.iter().map(String::as_str))
		.unwrap_or_else(|_| paths.join(" "));

	level.set(&format!("{}Path", prefix), &literal(first));
	level.set(&format!("{}FileName", prefix), &literal(path::base_name(first)));
	level.set(
		&format!("{}FileBase", prefix),
		&literal(path::base_name_without_extension(first)),
	);
	level.set(&format!("{}FileSuffix", prefix), &literal(&suffix));
	level.set(&format!("{}Paths", prefix), &literal(&all));
	for (i, p) in paths.iter().enumerate() {
		level.set(&format!("{}Path_{}", prefix, i), &literal(p));
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::registry::{OptionType, SpecKind, ToolOption};
	use crate::setting::scope::SettingScope;

	fn strings(s: &[&str]) -> Vec<String> {
		s.iter().map(|s| s.to_string()).collect()
	}

	fn environment() -> Environment {
		Environment::new(
			vec![Level::from_pairs(vec![
				("TEMP_FILES_DIR", "/tmp/App.build"),
				("OPTIMIZE", "-O2"),
			])],
			Context::new().with("arch", "arm64"),
		)
	}

	#[test]
	fn inputs_and_outputs() {
		let spec = ToolSpec::new("default", "cc", SpecKind::Compiler);
		let env = environment();
		let tool = ToolEnvironment::create(
			&spec,
			&env,
			"/src",
			&strings(&["main.c", "/abs/util.c", "odd$name.c"]),
			&strings(&["../build/main.o"]),
		);
		assert_eq!(tool.inputs(), &strings(&["/src/main.c", "/abs/util.c", "/src/odd$name.c"])[..]);
		assert_eq!(tool.outputs(), &strings(&["/build/main.o"])[..]);
		assert_eq!(tool.resolve("InputPath"), "/src/main.c");
		assert_eq!(tool.resolve("InputFileName"), "main.c");
		assert_eq!(tool.resolve("InputFileBase"), "main");
		assert_eq!(tool.resolve("InputFileSuffix"), ".c");
		assert_eq!(tool.resolve("InputFileRelativePath"), "main.c");
		assert_eq!(tool.resolve("InputPath_1"), "/abs/util.c");
		assert_eq!(tool.resolve("InputPath_2"), "/src/odd$name.c");
		assert_eq!(
			tool.resolve("InputPaths"),
			"/src/main.c /abs/util.c '/src/odd$name.c'"
		);
		assert_eq!(tool.resolve("OutputPath"), "/build/main.o");
		assert_eq!(tool.resolve("OutputDir"), "/build");
		assert_eq!(tool.resolve("TempFilesDir"), "/tmp/App.build");
		assert_eq!(tool.resolve("arch"), "arm64");
		assert_eq!(tool.resolve("OPTIMIZE"), "-O2");
	}

	#[test]
	fn defaults_are_at_the_bottom() {
		let mut spec = ToolSpec::new("default", "cc", SpecKind::Compiler);
		let mut option = ToolOption::new("OPTIMIZE", OptionType::String);
		option.default_value = Some("-O0".to_string());
		spec.options.push(option);
		let mut option = ToolOption::new("WARNINGS", OptionType::String);
		option.default_value = Some("-Wall".to_string());
		spec.options.push(option);
		let env = environment();
		let tool = ToolEnvironment::create(&spec, &env, "/src", &[], &[]);
		assert_eq!(tool.resolve("OPTIMIZE"), "-O2");
		assert_eq!(tool.resolve("WARNINGS"), "-Wall");
		assert_eq!(tool.resolve("InputPath"), "");
	}

	#[test]
	fn outputs_from_templates() {
		let mut spec = ToolSpec::new("default", "cc", SpecKind::Compiler);
		spec.outputs = strings(&["$(OutputDir)/$(InputFileBase).o", "$(NOTHING)"]);
		let env = environment();
		let files = vec![PhaseFile::new("main.c", None)];
		let tool = ToolEnvironment::create_for_files(&spec, &env, "/src", &files, "objects");
		assert_eq!(tool.outputs(), &strings(&["/src/objects/main.o"])[..]);
		assert_eq!(tool.resolve("OutputPath"), "/src/objects/main.o");
		assert_eq!(tool.resolve("OutputFileName"), "main.o");
		assert_eq!(tool.resolve("OutputDir"), "/src/objects");
	}

	#[test]
	fn target_levels_are_borrowed() {
		let mut spec = ToolSpec::new("default", "cc", SpecKind::Compiler);
		spec.default_settings.insert("OTHER_CFLAGS".to_string(), "-O0".to_string());
		let mut env = environment();
		env.insert_level(0, Level::from_pairs(vec![("OTHER_CFLAGS", "$(inherited) -g")]));
		let tool = ToolEnvironment::create(&spec, &env, "/src", &strings(&["a.c"]), &[]);
		assert!(std::ptr::eq(tool.base(), &env));
		assert_eq!(tool.scope().depth(), env.levels().len() + 2);
		assert_eq!(tool.resolve("OTHER_CFLAGS"), "-O0 -g");
		assert_eq!(tool.expand("$(InputFileBase) $(OTHER_CFLAGS)"), "a -O0 -g");
		// The target's own view is unchanged.
		assert_eq!(env.resolve("OTHER_CFLAGS"), " -g");
		assert_eq!(env.resolve("InputPath"), "");
	}
}
