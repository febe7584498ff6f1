//! This library crate plans builds of Xcode-style projects: it turns build
//! settings and tool specifications into the invocations a build executor
//! has to run. It never runs anything itself.
//!
//! # Build settings
//!
//! The [`setting`] module resolves build settings through an ordered stack
//! of levels (overrides, target, project, defaults, ...), with conditional
//! settings like `OTHER_LDFLAGS[arch=arm64]` and `$(...)` expansion
//! including modifiers and `$(inherited)`.
//!
//! # Specifications
//!
//! The [`registry`] module holds the specifications of all tools, compilers
//! and linkers, with `BasedOn` inheritance flattened when they are loaded,
//! and the known file types.
//!
//! # Resolvers
//!
//! The [`tool`] module contains the resolvers. Each turns a specification,
//! the settings of a target, and a set of files into an
//! [`Invocation`](tool::Invocation), which it appends to a
//! [`ToolContext`](tool::ToolContext):
//!
//! - [`ToolResolver`](tool::ToolResolver) for any tool without special needs,
//! - [`LinkerResolver`](tool::LinkerResolver) for `ld`, `libtool` and `lipo`,
//! - [`CopyResolver`](tool::CopyResolver),
//!   [`SymlinkResolver`](tool::SymlinkResolver) and
//!   [`MakeDirectoryResolver`](tool::MakeDirectoryResolver) for assembling
//!   products.
//!
//! # Planning
//!
//! The [`plan`] module plans several [targets](target) concurrently, and
//! checks the resulting plans.

pub mod error;
pub mod path;
pub mod plan;
pub mod registry;
pub mod setting;
pub mod target;
pub mod tool;
