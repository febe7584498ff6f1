//! Planning targets, and checking the plans.

use crate::error::PlanError;
use crate::path;
use crate::tool::{Invocation, ToolContext};
use indexmap::set::IndexSet;
use log::{debug, error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Check that no two invocations produce the same file.
///
/// Outputs are compared after normalization.
pub fn check_outputs(invocations: &[Invocation]) -> Result<(), PlanError> {
	let mut seen = IndexSet::new();
	for output in invocations.iter().flat_map(|i| i.outputs.iter()) {
		if !seen.insert(path::normalize(output)) {
			return Err(PlanError::DuplicateOutput(output.clone()));
		}
	}
	Ok(())
}

/// Plan several targets at once, on at most `jobs` threads.
///
/// `plan` is called once for every target. Every thread keeps taking the
/// next target nobody took yet, until none are left. The contexts are
/// returned in the same order as the targets.
pub fn plan_targets<T, F>(
	targets: &[T],
	jobs: usize,
	plan: F,
) -> Result<Vec<ToolContext>, PlanError>
where
	T: Sync,
	F: Fn(&T) -> ToolContext + Sync,
{
	let n_threads = jobs.max(1).min(targets.len());
	debug!("Planning {} targets on {} threads", targets.len(), n_threads);

	let next = AtomicUsize::new(0);
	let slots: Mutex<Vec<Option<ToolContext>>> = Mutex::new(targets.iter().map(|_| None).collect());

	let (plan, next, shared) = (&plan, &next, &slots);
	let finished = crossbeam::thread::scope(|scope| {
		for _ in 0..n_threads {
			scope.spawn(move |_| loop {
				let i = next.fetch_add(1, Ordering::Relaxed);
				let target = match targets.get(i) {
					Some(target) => target,
					None => break,
				};
				let context = plan(target);
				if let Ok(mut slots) = shared.lock() {
					slots[i] = Some(context);
				}
			});
		}
	});

	// A target without a context is one whose planning panicked.
	let slots = slots.into_inner().map_err(|_| PlanError::Panicked(None))?;
	let contexts = slots
		.into_iter()
		.enumerate()
		.map(|(i, context)| {
			context.ok_or_else(|| {
				error!("Planning target #{} panicked", i);
				PlanError::Panicked(Some(i))
			})
		})
		.collect::<Result<Vec<ToolContext>, PlanError>>()?;
	finished.map_err(|_| PlanError::Panicked(None))?;
	Ok(contexts)
}
