//! Record ID generation.
//!
//! IDs are UUID v7 (time-ordered) with an entity prefix, e.g.
//! `task-0192f1c4-...`. Imported records may carry any string ID; nothing
//! downstream depends on the prefix.

use uuid::Uuid;

/// Generate a prefixed UUID v7 ID.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carries_prefix() {
        let id = generate_id("task");
        assert!(id.starts_with("task-"));
        assert_eq!(id.len(), "task-".len() + 36);
    }

    #[test]
    fn ids_are_unique() {
        let a = generate_id("project");
        let b = generate_id("project");
        assert_ne!(a, b);
    }
}
