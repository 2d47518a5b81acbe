//! Builder controller: owns the element collection and its workflows.

use crate::convert::{element_to_field, field_to_element};
use crate::element::{Element, ElementId, ElementPatch, FieldKind};
use crate::layout::{apply_layout_changes, LayoutChange};
use crate::placement::{GridSpec, DEFAULT_CANVAS_WIDTH_PX, DEFAULT_FIELD_SIZE};
use crate::store::{FieldStore, StoreError};
use kurbo::Point;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

/// Builder errors.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("cannot save an empty form")]
    EmptyForm,
    #[error("a save for this collection is already outstanding")]
    SaveInProgress,
    #[error("element has not been persisted yet")]
    NotPersisted,
    #[error("no element matches the requested id")]
    UnknownElement,
    #[error("no confirmation is pending")]
    NothingPending,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Which store operation a pending confirmation will perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Update,
    Delete,
}

/// A staged store operation awaiting human confirmation.
///
/// The target is held by id, not by snapshot, so the confirm always sends
/// the element's state at confirmation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub target: ElementId,
}

/// Downstream signals for the embedding UI, drained synchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The whole form was saved and reloaded.
    Saved,
    /// A single stored field was updated.
    Updated,
    /// A single stored field was deleted.
    Deleted,
    /// External views of the field list should refetch.
    RefreshFields,
    /// A store operation failed; the message is the error verbatim.
    Error(String),
}

/// Upstream events from the rendered canvas and palette.
///
/// Drop data travels in the event itself; no drag state is held between
/// events.
#[derive(Debug, Clone)]
pub enum BuilderEvent {
    Drop { kind: FieldKind, position: Point },
    LayoutChanged(Vec<LayoutChange>),
    Select(ElementId),
    ClearSelection,
    Edit { id: ElementId, patch: ElementPatch },
}

/// The form-layout builder.
///
/// Owns the editable element collection (insertion order), at most one
/// selected element, and at most one pending confirmation. All placement,
/// conversion, and layout work is synchronous; only the field store is
/// asynchronous, and collection state changes only after a store call
/// resolves.
pub struct FormBuilder {
    cat_id: i64,
    store: Arc<dyn FieldStore>,
    elements: Vec<Element>,
    /// Mirror of the selected element, consumed by the property panel.
    /// Kept identical to the collection entry with the same id.
    selected: Option<Element>,
    pending: Option<PendingAction>,
    saving: bool,
    notices: VecDeque<Notice>,
    grid: GridSpec,
    canvas_px_width: f64,
}

impl FormBuilder {
    /// Create a builder for one collection.
    pub fn new(cat_id: i64, store: Arc<dyn FieldStore>) -> Self {
        Self {
            cat_id,
            store,
            elements: Vec::new(),
            selected: None,
            pending: None,
            saving: false,
            notices: VecDeque::new(),
            grid: GridSpec::default(),
            canvas_px_width: DEFAULT_CANVAS_WIDTH_PX,
        }
    }

    /// The owning collection id.
    pub fn cat_id(&self) -> i64 {
        self.cat_id
    }

    /// All elements, in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The selection mirror, if any element is selected.
    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_ref()
    }

    /// The staged confirmation, if any.
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Whether a save is outstanding; embedders disable the save control
    /// while this is true.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Report the rendered canvas width so drops map to the right column.
    pub fn set_canvas_width(&mut self, px: f64) {
        self.canvas_px_width = px;
    }

    /// Drain the queued downstream signals.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Dispatch one upstream event.
    pub fn handle_event(&mut self, event: BuilderEvent) {
        match event {
            BuilderEvent::Drop { kind, position } => {
                self.add_from_drop(kind, position);
            }
            BuilderEvent::LayoutChanged(changes) => self.sync_layout(&changes),
            BuilderEvent::Select(id) => {
                self.select(id);
            }
            BuilderEvent::ClearSelection => self.clear_selection(),
            BuilderEvent::Edit { id, patch } => {
                self.update_element(id, &patch);
            }
        }
    }

    /// Place a dropped field kind and append the new element, selected.
    pub fn add_from_drop(&mut self, kind: FieldKind, position: Point) -> ElementId {
        let existing: Vec<_> = self.elements.iter().map(|element| element.rect).collect();
        let rect = self
            .grid
            .place(position, self.canvas_px_width, DEFAULT_FIELD_SIZE, &existing);
        log::debug!("placing dropped {:?} at {:?}", kind, rect);

        let element = Element::new(kind, rect);
        let id = element.id;
        self.selected = Some(element.clone());
        self.elements.push(element);
        id
    }

    /// Select an element. Returns false if the id is unknown.
    pub fn select(&mut self, id: ElementId) -> bool {
        match self.elements.iter().find(|element| element.id == id) {
            Some(element) => {
                self.selected = Some(element.clone());
                true
            }
            None => false,
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Merge a property-panel patch into an element (and its mirror).
    /// Returns false if the id is unknown.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|element| element.id == id) else {
            return false;
        };
        patch.apply(element);
        let updated = element.clone();
        if self.selected.as_ref().is_some_and(|mirror| mirror.id == id) {
            self.selected = Some(updated);
        }
        true
    }

    /// Remove an element from the collection. Returns false if the id is
    /// unknown. No store call is made; deleting persisted fields goes
    /// through the confirmation workflow.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| element.id != id);
        if self.elements.len() == before {
            return false;
        }
        if self.selected.as_ref().is_some_and(|mirror| mirror.id == id) {
            self.selected = None;
        }
        if self.pending.is_some_and(|pending| pending.target == id) {
            self.pending = None;
        }
        true
    }

    /// Absorb renderer-reported move/resize changes.
    pub fn sync_layout(&mut self, changes: &[LayoutChange]) {
        apply_layout_changes(&mut self.elements, changes);
        let selected_id = self.selected.as_ref().map(|mirror| mirror.id);
        if let Some(id) = selected_id {
            if changes.iter().any(|change| change.id == id) {
                self.select(id);
            }
        }
    }

    /// Stage an update confirmation for a persisted element.
    pub fn request_field_update(&mut self, id: ElementId) -> BuilderResult<()> {
        self.stage_pending(id, PendingKind::Update)
    }

    /// Stage a delete confirmation for a persisted element.
    pub fn request_field_delete(&mut self, id: ElementId) -> BuilderResult<()> {
        self.stage_pending(id, PendingKind::Delete)
    }

    fn stage_pending(&mut self, id: ElementId, kind: PendingKind) -> BuilderResult<()> {
        let element = self
            .elements
            .iter()
            .find(|element| element.id == id)
            .ok_or(BuilderError::UnknownElement)?;
        if element.field_ref.is_new() {
            return Err(BuilderError::NotPersisted);
        }
        self.pending = Some(PendingAction { kind, target: id });
        Ok(())
    }

    /// Drop the staged confirmation without a store call.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Perform the staged store operation.
    ///
    /// On failure the local collection and the staged confirmation are left
    /// untouched so the human can retry; on success the collection is
    /// mutated in place (no reload, unsaved elements survive) and a
    /// refresh signal is emitted for external field lists.
    pub async fn confirm_pending(&mut self) -> BuilderResult<()> {
        let pending = self.pending.ok_or(BuilderError::NothingPending)?;
        let Some(index) = self
            .elements
            .iter()
            .position(|element| element.id == pending.target)
        else {
            self.pending = None;
            return Err(BuilderError::UnknownElement);
        };
        let field = element_to_field(&self.elements[index], self.cat_id, index as i64);

        match pending.kind {
            PendingKind::Update => {
                if let Err(error) = self.store.update_field(&field).await {
                    self.notices.push_back(Notice::Error(error.to_string()));
                    return Err(error.into());
                }
                if self
                    .selected
                    .as_ref()
                    .is_some_and(|mirror| mirror.id == pending.target)
                {
                    self.select(pending.target);
                }
                self.notices.push_back(Notice::Updated);
            }
            PendingKind::Delete => {
                if let Err(error) = self.store.delete_field(&field).await {
                    self.notices.push_back(Notice::Error(error.to_string()));
                    return Err(error.into());
                }
                self.elements.remove(index);
                if self
                    .selected
                    .as_ref()
                    .is_some_and(|mirror| mirror.id == pending.target)
                {
                    self.selected = None;
                }
                self.notices.push_back(Notice::Deleted);
            }
        }
        self.pending = None;
        self.notices.push_back(Notice::RefreshFields);
        Ok(())
    }

    /// Send the whole collection as one batch create, then reload it from
    /// the store so unsaved elements pick up their assigned ids.
    ///
    /// Rejected while a previous save is outstanding; a second concurrent
    /// batch create would double-insert the collection.
    pub async fn save(&mut self) -> BuilderResult<()> {
        if self.saving {
            return Err(BuilderError::SaveInProgress);
        }
        if self.elements.is_empty() {
            return Err(BuilderError::EmptyForm);
        }

        let fields: Vec<_> = self
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| element_to_field(element, self.cat_id, index as i64))
            .collect();

        self.saving = true;
        let created = self.store.create_fields(self.cat_id, &fields).await;
        if let Err(error) = created {
            self.saving = false;
            self.notices.push_back(Notice::Error(error.to_string()));
            return Err(error.into());
        }

        let listed = self.store.list_fields(self.cat_id).await;
        self.saving = false;
        match listed {
            Ok(stored) => {
                self.elements = stored.iter().map(field_to_element).collect();
                self.selected = None;
                self.pending = None;
                self.notices.push_back(Notice::Saved);
                Ok(())
            }
            Err(error) => {
                self.notices.push_back(Notice::Error(error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Replace the collection with the stored fields.
    pub async fn load(&mut self) -> BuilderResult<()> {
        let stored = self.store.list_fields(self.cat_id).await?;
        self.elements = stored.iter().map(field_to_element).collect();
        self.selected = None;
        self.pending = None;
        Ok(())
    }

    /// Discard every element. No store call is made.
    pub fn clear_all(&mut self) {
        self.elements.clear();
        self.selected = None;
        self.pending = None;
    }
}
