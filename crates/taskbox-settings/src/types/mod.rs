//! Settings type definitions.
//!
//! Both records use camelCase JSON and `#[serde(default)]`, so partial JSON
//! deserializes with the missing fields at their defaults.

mod config;
mod preferences;

pub use config::*;
pub use preferences::*;
