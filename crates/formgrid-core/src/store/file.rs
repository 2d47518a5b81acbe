//! File-based field store for native platforms.

use super::{BoxFuture, FieldStore, StoreError, StoreResult};
use crate::field::Field;
use std::fs;
use std::path::PathBuf;

/// File-based field store.
///
/// Stores each collection as a JSON file in a base directory.
pub struct FileFieldStore {
    /// Base directory for collection files.
    base_path: PathBuf,
}

impl FileFieldStore {
    /// Create a new file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StoreError::Io(format!("Failed to create store directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/formgrid/collections/`
    /// On Windows: `%LOCALAPPDATA%\formgrid\collections\`
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;

        let path = base.join("formgrid").join("collections");
        Self::new(path)
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn collection_path(&self, cat_id: i64) -> PathBuf {
        self.base_path.join(format!("collection-{}.json", cat_id))
    }

    fn read_collection(&self, cat_id: i64) -> StoreResult<Vec<Field>> {
        let path = self.collection_path(cat_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_collection(&self, cat_id: i64, fields: &[Field]) -> StoreResult<()> {
        let path = self.collection_path(cat_id);
        let json = serde_json::to_string_pretty(fields)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

impl FieldStore for FileFieldStore {
    fn list_fields(&self, cat_id: i64) -> BoxFuture<'_, StoreResult<Vec<Field>>> {
        Box::pin(async move { self.read_collection(cat_id) })
    }

    fn create_fields(&self, cat_id: i64, fields: &[Field]) -> BoxFuture<'_, StoreResult<()>> {
        let fields = fields.to_vec();
        Box::pin(async move {
            let mut stored = self.read_collection(cat_id)?;
            let mut next_id = stored
                .iter()
                .filter_map(|field| field.id)
                .max()
                .unwrap_or(0)
                + 1;
            for mut field in fields {
                if field.id.is_none() {
                    field.id = Some(next_id);
                    next_id += 1;
                }
                field.cat_id = cat_id;
                stored.push(field);
            }
            self.write_collection(cat_id, &stored)
        })
    }

    fn update_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>> {
        let field = field.clone();
        Box::pin(async move {
            let mut stored = self.read_collection(field.cat_id)?;
            let slot = stored
                .iter_mut()
                .find(|candidate| candidate.id == field.id && field.id.is_some())
                .ok_or_else(|| StoreError::NotFound(field.name.clone()))?;
            let cat_id = field.cat_id;
            *slot = field;
            self.write_collection(cat_id, &stored)
        })
    }

    fn delete_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>> {
        let cat_id = field.cat_id;
        let id = field.id;
        let name = field.name.clone();
        Box::pin(async move {
            let id = id.ok_or(StoreError::NotFound(name))?;
            let mut stored = self.read_collection(cat_id)?;
            stored.retain(|candidate| candidate.id != Some(id));
            self.write_collection(cat_id, &stored)
        })
    }
}
