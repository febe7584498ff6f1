//! Applying `BasedOn` inheritance, once, when the registry is loaded.

use super::types::{SpecDefinition, ToolSpec};
use crate::error::SpecError;
use indexmap::map::IndexMap;

/// Flatten every definition into a [`ToolSpec`], in the same order.
pub fn flatten(definitions: &[SpecDefinition]) -> Result<Vec<ToolSpec>, SpecError> {
	let mut by_domain = IndexMap::<(&str, &str), usize>::new();
	let mut by_identifier = IndexMap::<&str, Vec<usize>>::new();

	for (i, def) in definitions.iter().enumerate() {
		if by_domain
			.insert((def.domain.as_str(), def.identifier.as_str()), i)
			.is_some()
		{
			return Err(SpecError::Duplicate {
				domain: def.domain.clone(),
				identifier: def.identifier.clone(),
			});
		}
		by_identifier
			.entry(def.identifier.as_str())
			.or_insert_with(Vec::new)
			.push(i);
	}

	// Finds the definition `definitions[index]` is based on.
	let find_base = |index: usize, based_on: &str| -> Option<usize> {
		let def = &definitions[index];
		if let Some((domain, identifier)) = split_domain(based_on) {
			return by_domain.get(&(domain, identifier)).copied();
		}
		by_domain
			.get(&(def.domain.as_str(), based_on))
			.copied()
			.filter(|&i| i != index)
			.or_else(|| {
				by_identifier
					.get(based_on)
					.and_then(|candidates| candidates.iter().copied().find(|&i| i != index))
			})
	};

	let mut specs = Vec::with_capacity(definitions.len());

	for (index, leaf) in definitions.iter().enumerate() {
		// Walk up to the root, without recursion.
		let mut chain = vec![index];
		let mut current = leaf;
		while let Some(based_on) = &current.based_on {
			let base = find_base(chain[chain.len() - 1], based_on).ok_or_else(|| {
				SpecError::UnknownBase {
					identifier: leaf.identifier.clone(),
					based_on: based_on.clone(),
				}
			})?;
			if chain.contains(&base) {
				return Err(SpecError::InheritanceCycle {
					identifier: leaf.identifier.clone(),
				});
			}
			if definitions[base].kind != current.kind {
				return Err(SpecError::KindMismatch {
					identifier: current.identifier.clone(),
					based_on: based_on.clone(),
				});
			}
			chain.push(base);
			current = &definitions[base];
		}

		// And apply everything from the root down.
		let mut spec = ToolSpec::new(&leaf.domain, &leaf.identifier, leaf.kind);
		for &i in chain.iter().rev() {
			apply(&mut spec, &definitions[i]);
		}
		specs.push(spec);
	}

	Ok(specs)
}

fn split_domain(based_on: &str) -> Option<(&str, &str)> {
	let n = based_on.find(':')?;
	Some((&based_on[..n], &based_on[n + 1..]))
}

fn apply(spec: &mut ToolSpec, def: &SpecDefinition) {
	fn set<T: Clone>(field: &mut Option<T>, value: &Option<T>) {
		if value.is_some() {
			*field = value.clone();
		}
	}

	set(&mut spec.name, &def.name);
	set(&mut spec.exec_path, &def.exec_path);
	set(&mut spec.default_exec_path, &def.default_exec_path);
	set(&mut spec.command_line, &def.command_line);
	set(&mut spec.rule_format, &def.rule_format);
	set(&mut spec.dependency_info_file, &def.dependency_info_file);
	set(&mut spec.dependency_file, &def.dependency_file);

	if let Some(outputs) = &def.outputs {
		spec.outputs = outputs.clone();
	}
	if let Some(b) = def.supports_input_file_list {
		spec.supports_input_file_list = b;
	}
	if let Some(b) = def.deeply_stat_input_directories {
		spec.deeply_stat_input_directories = b;
	}

	for option in &def.options {
		match spec.options.iter_mut().find(|o| o.name == option.name) {
			Some(existing) => *existing = option.clone(),
			None => spec.options.push(option.clone()),
		}
	}
	for (name, value) in &def.environment_variables {
		spec.environment_variables.insert(name.clone(), value.clone());
	}
	for (name, value) in &def.default_settings {
		spec.default_settings.insert(name.clone(), value.clone());
	}
}
