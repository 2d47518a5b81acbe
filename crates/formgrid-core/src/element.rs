//! Editing-time form element model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique session-local identifier for elements.
///
/// Assigned when an element enters the builder (by drop or by load) and
/// never reused; it is not persisted. Whether an element corresponds to a
/// stored field is tracked separately by [`FieldRef`].
pub type ElementId = Uuid;

/// Persistence identity of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRef {
    /// Exists only in the current builder session.
    New,
    /// Backed by a stored field with this id.
    Persisted(i64),
}

impl FieldRef {
    /// The stored field id, if any.
    pub fn persisted_id(&self) -> Option<i64> {
        match self {
            FieldRef::New => None,
            FieldRef::Persisted(id) => Some(*id),
        }
    }

    /// Check whether the element has not been saved yet.
    pub fn is_new(&self) -> bool {
        matches!(self, FieldRef::New)
    }
}

/// The closed set of field kinds a form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    MultilineText,
    Number,
    SingleChoice,
    CheckboxGroup,
    RadioGroup,
    Date,
    DateTime,
}

/// Wire name of the retired suggestion-text kind, still present in stored
/// data; maps to [`FieldKind::SingleChoice`] on load.
pub const LEGACY_SUGGEST_TYPE: &str = "autocomplete";

impl FieldKind {
    /// The type name used by the persisted field model.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::MultilineText => "textarea",
            FieldKind::Number => "number",
            FieldKind::SingleChoice => "select",
            FieldKind::CheckboxGroup => "checkbox",
            FieldKind::RadioGroup => "radio",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
        }
    }

    /// Parse a persisted type name. Returns `None` for names outside the
    /// closed set (callers decide the recovery policy).
    pub fn from_wire(value: &str) -> Option<FieldKind> {
        match value {
            "text" => Some(FieldKind::Text),
            "textarea" => Some(FieldKind::MultilineText),
            "number" => Some(FieldKind::Number),
            "select" => Some(FieldKind::SingleChoice),
            "checkbox" => Some(FieldKind::CheckboxGroup),
            "radio" => Some(FieldKind::RadioGroup),
            "date" => Some(FieldKind::Date),
            "datetime" => Some(FieldKind::DateTime),
            LEGACY_SUGGEST_TYPE => Some(FieldKind::SingleChoice),
            _ => None,
        }
    }

    /// Display name, used as the default label for new elements.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::MultilineText => "Multiline text",
            FieldKind::Number => "Number",
            FieldKind::SingleChoice => "Single choice",
            FieldKind::CheckboxGroup => "Checkbox group",
            FieldKind::RadioGroup => "Radio group",
            FieldKind::Date => "Date",
            FieldKind::DateTime => "Date & time",
        }
    }

    /// Whether this kind carries an option list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleChoice | FieldKind::CheckboxGroup | FieldKind::RadioGroup
        )
    }

    /// Prefix for generated field names: the first 3 characters of the
    /// wire name.
    pub fn name_prefix(&self) -> &'static str {
        &self.wire_name()[..3]
    }

    /// All field kinds, in palette order.
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::Text,
            FieldKind::MultilineText,
            FieldKind::Number,
            FieldKind::SingleChoice,
            FieldKind::CheckboxGroup,
            FieldKind::RadioGroup,
            FieldKind::Date,
            FieldKind::DateTime,
        ]
    }
}

/// An element's footprint on the placement grid, in integer cells.
///
/// `w` and `h` are at least 1; `y` is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    /// Create a rectangle. `w` and `h` are clamped up to 1.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
        }
    }

    /// Whether two rectangles share any cell.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &GridRect) -> bool {
        !(self.x + self.w <= other.x
            || other.x + other.w <= self.x
            || self.y + self.h <= other.y
            || other.y + other.h <= self.y)
    }

    /// First free row below this rectangle.
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
}

/// One selectable option of a choice-kind element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Numeric bounds, meaningful only for [`FieldKind::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One form field under construction, together with its grid footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Session-local identity.
    pub id: ElementId,
    /// Persistence identity.
    pub field_ref: FieldRef,
    /// Field kind.
    pub kind: FieldKind,
    /// Human-visible label.
    pub label: String,
    /// User-set identifier; capped at 20 characters when persisted. When
    /// unset a name is generated at save time.
    pub name: Option<String>,
    /// Placeholder text shown in the rendered input.
    pub placeholder: Option<String>,
    /// Whether the rendered input must be filled.
    pub required: bool,
    /// Prefilled value.
    pub default_value: Option<String>,
    /// Options for choice kinds; empty for every other kind.
    pub options: Vec<ChoiceOption>,
    /// Numeric bounds for number elements.
    pub bounds: Option<NumberBounds>,
    /// Grid footprint.
    pub rect: GridRect,
}

impl Element {
    /// Create a new unsaved element with the default content for its kind.
    ///
    /// Choice kinds are seeded with exactly two options.
    pub fn new(kind: FieldKind, rect: GridRect) -> Self {
        let options = if kind.has_options() {
            vec![
                ChoiceOption::new("Option 1", "option-1"),
                ChoiceOption::new("Option 2", "option-2"),
            ]
        } else {
            Vec::new()
        };
        Self {
            id: Uuid::new_v4(),
            field_ref: FieldRef::New,
            kind,
            label: kind.display_name().to_string(),
            name: None,
            placeholder: None,
            required: false,
            default_value: None,
            options,
            bounds: None,
            rect,
        }
    }
}

/// A partial update from the property panel.
///
/// Only the populated fields are applied; the element's kind, identity, and
/// rectangle are never touched through a patch (the rectangle changes only
/// through layout synchronization).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub options: Option<Vec<ChoiceOption>>,
    pub bounds: Option<NumberBounds>,
}

impl ElementPatch {
    /// Merge this patch into an element.
    pub fn apply(&self, element: &mut Element) {
        if let Some(label) = &self.label {
            element.label = label.clone();
        }
        if let Some(name) = &self.name {
            element.name = Some(name.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            element.placeholder = Some(placeholder.clone());
        }
        if let Some(required) = self.required {
            element.required = required;
        }
        if let Some(default_value) = &self.default_value {
            element.default_value = Some(default_value.clone());
        }
        if let Some(options) = &self.options {
            element.options = options.clone();
        }
        if let Some(bounds) = self.bounds {
            element.bounds = Some(bounds);
        }
    }
}
