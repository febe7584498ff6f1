//! Errors that can occur while loading specifications and planning targets.
//!
//! Setting expansion itself never fails; see [`setting::expand`][crate::setting::expand].

use crate::registry::SpecKind;
use std::error::Error;
use std::fmt;

/// A tool, compiler or linker could not be found in the active specification
/// domains.
///
/// This is a configuration error: the build phase that needed the resolver
/// can not be planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
	/// What was looked for. `None` if any kind of tool would have done.
	pub kind: Option<SpecKind>,
	/// The identifier that was looked up.
	pub identifier: String,
	/// The domains that were searched, in order.
	pub domains: Vec<String>,
}

impl fmt::Display for LookupError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.kind {
			Some(kind) => write!(f, "could not find {} {}", kind, self.identifier)?,
			None => write!(f, "could not find tool {}", self.identifier)?,
		}
		if !self.domains.is_empty() {
			write!(f, " (searched: {})", self.domains.join(", "))?;
		}
		Ok(())
	}
}

impl Error for LookupError {}

/// An error while flattening specification definitions into a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
	/// Two specifications with the same identifier in the same domain.
	Duplicate { domain: String, identifier: String },
	/// `BasedOn` refers to a specification which doesn't exist.
	UnknownBase { identifier: String, based_on: String },
	/// A specification is (indirectly) based on itself.
	InheritanceCycle { identifier: String },
	/// A specification is based on one of a different kind.
	KindMismatch { identifier: String, based_on: String },
}

impl fmt::Display for SpecError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			SpecError::Duplicate { domain, identifier } => {
				write!(f, "Duplicate specification {} in domain {}", identifier, domain)
			}
			SpecError::UnknownBase {
				identifier,
				based_on,
			} => write!(f, "Specification {} is based on unknown {}", identifier, based_on),
			SpecError::InheritanceCycle { identifier } => {
				write!(f, "Specification {} is based on itself", identifier)
			}
			SpecError::KindMismatch {
				identifier,
				based_on,
			} => write!(
				f,
				"Specification {} is based on {} of a different kind",
				identifier, based_on
			),
		}
	}
}

impl Error for SpecError {}

/// An error in a finished (or failed) plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
	/// Two invocations declare the same output.
	DuplicateOutput(String),
	/// Planning a target panicked. Contains the index of the target, if known.
	Panicked(Option<usize>),
}

impl fmt::Display for PlanError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			PlanError::DuplicateOutput(path) => {
				write!(f, "Multiple invocations produce {}", path)
			}
			PlanError::Panicked(Some(index)) => write!(f, "Planning target #{} panicked", index),
			PlanError::Panicked(None) => write!(f, "Planning panicked"),
		}
	}
}

impl Error for PlanError {}
