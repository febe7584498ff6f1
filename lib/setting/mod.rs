//! Build settings: levels of conditional `key = value` assignments, and
//! their resolution and expansion.
//!
//! > [`Level`]s + [`Context`] → [`Environment`] → [`resolve()`][Environment::resolve]

mod condition;
mod environment;
mod level;

pub mod expand;
pub mod modifier;
pub mod scope;

pub use self::condition::{Condition, Context};
pub use self::environment::Environment;
pub use self::level::{Level, Setting};
pub use self::scope::{Overlay, SettingScope};
