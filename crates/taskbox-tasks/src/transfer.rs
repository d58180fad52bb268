//! Task export and import as a JSON array.

use chrono::NaiveDate;
use serde_json::Value;
use taskbox_core::Task;

use crate::errors::{Result, TaskError};

/// Pretty-printed JSON array of `tasks`, in the given order.
pub fn export_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Download name for an export made on `date`: `taskbox-tasks-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("taskbox-tasks-{}.json", date.format("%Y-%m-%d"))
}

/// Decode an import payload into tasks.
///
/// The whole payload is validated before anything is returned, so a failed
/// import never yields a partial collection.
pub fn parse_import(json: &str) -> Result<Vec<Task>> {
    let value: Value = serde_json::from_str(json).map_err(TaskError::ImportParse)?;
    let Value::Array(items) = value else {
        return Err(TaskError::ImportShape {
            found: json_kind(&value),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| TaskError::ImportRecord { index, source })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
