//! Absorbs rectangle changes reported by the rendered grid.

use crate::element::{Element, ElementId, GridRect};

/// One element's new footprint after direct manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutChange {
    pub id: ElementId,
    pub rect: GridRect,
}

/// Overwrite the rectangles of the matching elements.
///
/// Only the four rectangle fields change; everything else is untouched. The
/// renderer has already enforced non-overlap and in-bounds placement during
/// the drag, so no validation happens here. Changes for unknown ids are
/// skipped.
pub fn apply_layout_changes(elements: &mut [Element], changes: &[LayoutChange]) {
    for change in changes {
        match elements.iter_mut().find(|element| element.id == change.id) {
            Some(element) => element.rect = change.rect,
            None => log::debug!("layout change for unknown element {}", change.id),
        }
    }
}
