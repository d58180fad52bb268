//! Task and project record types.
//!
//! All records use `#[serde(rename_all = "camelCase")]`: that is the shape
//! persisted in the store and written by task export. Optional fields carry
//! `#[serde(default)]` so older or hand-edited records still load.

mod project;
mod task;

pub use project::*;
pub use task::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Used with `#[serde(default)]`: a missing key stays `None`, while `null`
/// becomes `Some(None)` so a patch can clear the field.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Normalize an optional reference: empty strings mean "no reference".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
