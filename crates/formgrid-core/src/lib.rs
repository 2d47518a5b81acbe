//! FormGrid Core Library
//!
//! Platform-agnostic engine for the drag-and-drop form layout builder:
//! element and field models, collision-free grid placement, model
//! conversion, layout synchronization, and the builder controller over an
//! abstract field store.

pub mod builder;
pub mod convert;
pub mod element;
pub mod field;
pub mod layout;
pub mod placement;
pub mod store;

pub use builder::{
    BuilderError, BuilderEvent, BuilderResult, FormBuilder, Notice, PendingAction, PendingKind,
};
pub use convert::{element_to_field, field_to_element};
pub use element::{
    ChoiceOption, Element, ElementId, ElementPatch, FieldKind, FieldRef, GridRect, NumberBounds,
};
pub use field::{Field, FieldOption, FIELD_NAME_MAX};
pub use layout::{apply_layout_changes, LayoutChange};
pub use placement::{
    GridSpec, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_FIELD_SIZE, DEFAULT_MARGIN_PX,
    DEFAULT_ROW_HEIGHT_PX, GRID_COLS,
};
pub use store::{
    BoxFuture, FieldStore, FileFieldStore, MemoryFieldStore, StoreError, StoreResult,
};
