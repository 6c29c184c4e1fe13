//! The todo entity.

use serde::{Deserialize, Serialize};

fn id_is_zero(id: &i64) -> bool {
    *id == 0
}

/// A single todo record.
///
/// `id` is assigned by the store; it defaults to zero on incoming bodies and
/// is omitted from JSON until assigned. `name` is required, `done` defaults
/// to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Store-assigned identity.
    #[serde(default, skip_serializing_if = "id_is_zero")]
    pub id: i64,
    /// Human-readable task name.
    pub name: String,
    /// Completion flag.
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserialize_defaults_id_and_done() {
        let todo: Todo = serde_json::from_value(json!({"name": "buy milk"})).unwrap();
        assert_eq!(todo.id, 0);
        assert_eq!(todo.name, "buy milk");
        assert!(!todo.done);
    }

    #[test]
    fn deserialize_requires_name() {
        let result = serde_json::from_value::<Todo>(json!({"done": true}));
        assert!(result.is_err());
    }

    #[test]
    fn serialize_omits_unassigned_id() {
        let todo = Todo {
            id: 0,
            name: "walk dog".to_string(),
            done: false,
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value, json!({"name": "walk dog", "done": false}));
    }

    #[test]
    fn serialize_keeps_assigned_id() {
        let todo = Todo {
            id: 7,
            name: "walk dog".to_string(),
            done: true,
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value, json!({"id": 7, "name": "walk dog", "done": true}));
    }
}
