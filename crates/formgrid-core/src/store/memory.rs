//! In-memory field store implementation.

use super::{BoxFuture, FieldStore, StoreError, StoreResult};
use crate::field::Field;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

/// In-memory field store for testing and ephemeral use.
pub struct MemoryFieldStore {
    collections: RwLock<HashMap<i64, Vec<Field>>>,
    next_id: AtomicI64,
}

impl Default for MemoryFieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFieldStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl FieldStore for MemoryFieldStore {
    fn list_fields(&self, cat_id: i64) -> BoxFuture<'_, StoreResult<Vec<Field>>> {
        Box::pin(async move {
            let collections = self
                .collections
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(collections.get(&cat_id).cloned().unwrap_or_default())
        })
    }

    fn create_fields(&self, cat_id: i64, fields: &[Field]) -> BoxFuture<'_, StoreResult<()>> {
        let fields = fields.to_vec();
        Box::pin(async move {
            let mut collections = self
                .collections
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let stored = collections.entry(cat_id).or_default();
            for mut field in fields {
                if field.id.is_none() {
                    field.id = Some(self.assign_id());
                }
                field.cat_id = cat_id;
                stored.push(field);
            }
            Ok(())
        })
    }

    fn update_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>> {
        let field = field.clone();
        Box::pin(async move {
            let mut collections = self
                .collections
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let stored = collections
                .get_mut(&field.cat_id)
                .ok_or_else(|| StoreError::NotFound(format!("collection {}", field.cat_id)))?;
            let slot = stored
                .iter_mut()
                .find(|candidate| candidate.id == field.id)
                .ok_or_else(|| StoreError::NotFound(field.name.clone()))?;
            *slot = field;
            Ok(())
        })
    }

    fn delete_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>> {
        let cat_id = field.cat_id;
        let id = field.id;
        let name = field.name.clone();
        Box::pin(async move {
            let id = id.ok_or(StoreError::NotFound(name))?;
            let mut collections = self
                .collections
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            if let Some(stored) = collections.get_mut(&cat_id) {
                stored.retain(|candidate| candidate.id != Some(id));
            }
            Ok(())
        })
    }
}
