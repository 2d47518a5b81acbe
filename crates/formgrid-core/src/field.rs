//! Persisted field model, as understood by the field store.

use serde::{Deserialize, Serialize};

/// Hard cap on a persisted field name, in characters.
pub const FIELD_NAME_MAX: usize = 20;

/// One option of a persisted choice field.
///
/// Structurally identical to the editing-time
/// [`ChoiceOption`](crate::element::ChoiceOption); only the wire shape
/// differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// A stored form field.
///
/// `id` is absent until the store assigns one. `fieldOption` is always
/// present on the wire, as an empty list when the type carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning collection, assigned by the caller.
    pub cat_id: i64,
    pub field_type: String,
    pub label: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub field_option: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Ordinal within the save batch.
    #[serde(default)]
    pub sequence: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Field {
        Field {
            id: None,
            cat_id: 7,
            field_type: "text".to_string(),
            label: "First name".to_string(),
            name: "tex123".to_string(),
            placeholder: None,
            required: false,
            default_value: None,
            field_option: Vec::new(),
            min: None,
            max: None,
            x: 0,
            y: 0,
            w: 6,
            h: 2,
            sequence: 0,
        }
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("catId").is_some());
        assert!(json.get("fieldType").is_some());
        assert!(json.get("fieldOption").is_some());
        assert!(json.get("cat_id").is_none());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("placeholder").is_none());
        assert!(json.get("defaultValue").is_none());
        assert!(json.get("min").is_none());
        assert!(json.get("max").is_none());
    }

    #[test]
    fn test_empty_option_list_is_explicit() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fieldOption"], serde_json::json!([]));
    }

    #[test]
    fn test_deserialize_without_optionals() {
        let json = r#"{
            "catId": 3,
            "fieldType": "number",
            "label": "Age",
            "name": "num42",
            "required": true,
            "x": 0, "y": 0, "w": 6, "h": 2
        }"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.id, None);
        assert_eq!(field.cat_id, 3);
        assert!(field.field_option.is_empty());
        assert_eq!(field.sequence, 0);
    }
}
