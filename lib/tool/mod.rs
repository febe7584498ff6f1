//! Resolvers: turning tool specifications and settings into invocations.
//!
//! > [`ToolSpec`][crate::registry::ToolSpec] + [`Environment`][crate::setting::Environment]
//! > → [`ToolEnvironment`] → [`OptionsResult`] → [`expand_tool()`]
//! > → [`Invocation`] in a [`ToolContext`]
//!
//! Resolvers are created from a [`PhaseEnvironment`][crate::target::PhaseEnvironment].
//! Creating one fails with a [`LookupError`][crate::error::LookupError] if
//! its specification can't be found. Resolving never fails.

mod context;
mod environment;
mod invocation;
mod options;
mod resolver;

pub mod copy;
pub mod linker;
pub mod mkdir;
pub mod symlink;
pub mod tokens;

pub use self::context::ToolContext;
pub use self::copy::CopyResolver;
pub use self::environment::ToolEnvironment;
pub use self::invocation::{
	AuxiliaryFile, DependencyFormat, DependencyInfo, Executable, Invocation,
};
pub use self::linker::LinkerResolver;
pub use self::mkdir::MakeDirectoryResolver;
pub use self::options::{split_list, OptionsResult};
pub use self::resolver::{lookup, ToolResolver};
pub use self::symlink::SymlinkResolver;
pub use self::tokens::{expand_tool, ToolExpansion};
