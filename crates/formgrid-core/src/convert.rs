//! Conversion between editing-time elements and persisted fields.

use crate::element::{
    ChoiceOption, Element, ElementId, FieldKind, FieldRef, GridRect, NumberBounds,
};
use crate::field::{Field, FieldOption, FIELD_NAME_MAX};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Build an element from a stored field.
///
/// Type names outside the closed set recover to `text`; this is a policy,
/// not an error, and never fails a load.
pub fn field_to_element(field: &Field) -> Element {
    let kind = FieldKind::from_wire(&field.field_type).unwrap_or_else(|| {
        log::warn!(
            "unknown field type '{}' on field '{}', defaulting to text",
            field.field_type,
            field.name
        );
        FieldKind::Text
    });

    let bounds = if field.min.is_some() || field.max.is_some() {
        Some(NumberBounds {
            min: field.min,
            max: field.max,
        })
    } else {
        None
    };

    Element {
        id: new_element_id(),
        field_ref: field.id.map(FieldRef::Persisted).unwrap_or(FieldRef::New),
        kind,
        label: field.label.clone(),
        name: if field.name.is_empty() {
            None
        } else {
            Some(field.name.clone())
        },
        placeholder: field.placeholder.clone(),
        required: field.required,
        default_value: field.default_value.clone(),
        options: field
            .field_option
            .iter()
            .map(|option| ChoiceOption::new(option.label.clone(), option.value.clone()))
            .collect(),
        bounds,
        rect: GridRect::new(field.x, field.y, field.w, field.h),
    }
}

/// Build the stored representation of an element.
///
/// `cat_id` is the owning collection, supplied by the caller; `sequence` is
/// the element's ordinal within the batch being sent.
pub fn element_to_field(element: &Element, cat_id: i64, sequence: i64) -> Field {
    let (min, max) = match (element.kind, element.bounds) {
        (FieldKind::Number, Some(bounds)) => (bounds.min, bounds.max),
        _ => (None, None),
    };

    let field_option = if element.kind.has_options() {
        element
            .options
            .iter()
            .map(|option| FieldOption {
                label: option.label.clone(),
                value: option.value.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Field {
        id: element.field_ref.persisted_id(),
        cat_id,
        field_type: element.kind.wire_name().to_string(),
        label: element.label.clone(),
        name: resolved_name(element),
        placeholder: element.placeholder.clone().filter(|s| !s.is_empty()),
        required: element.required,
        default_value: element.default_value.clone().filter(|s| !s.is_empty()),
        field_option,
        min,
        max,
        x: element.rect.x,
        y: element.rect.y,
        w: element.rect.w,
        h: element.rect.h,
        sequence,
    }
}

fn new_element_id() -> ElementId {
    Uuid::new_v4()
}

/// Resolve the persisted name: a non-empty user-set name wins, trimmed and
/// capped; otherwise one is generated.
fn resolved_name(element: &Element) -> String {
    match element.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.chars().take(FIELD_NAME_MAX).collect(),
        _ => generated_name(element.kind),
    }
}

/// Generate a field name: the kind's 3-character prefix plus the current
/// high-resolution timestamp. When the combination exceeds the cap, the
/// timestamp keeps its tail so the fastest-changing digits survive.
fn generated_name(kind: FieldKind) -> String {
    let prefix = kind.name_prefix();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos().to_string())
        .unwrap_or_else(|_| "0".to_string());

    let available = FIELD_NAME_MAX - prefix.len();
    if stamp.len() > available {
        format!("{}{}", prefix, &stamp[stamp.len() - available..])
    } else {
        format!("{}{}", prefix, stamp)
    }
}
