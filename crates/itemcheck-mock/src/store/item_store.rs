//! In-memory item collection backed by a YAML file.

use super::error::StoreError;
use super::persistence::{load_items, save_items};
use itemcheck_criteria::{Field, Record, REQUIRED_FIELDS};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Thread-safe item store.
///
/// Writers build the next collection, persist it, and only then swap it in,
/// so a failed save leaves both the file and memory untouched.
pub struct ItemStore {
    path: PathBuf,
    items: RwLock<Vec<Record>>,
}

impl ItemStore {
    /// Open the store, loading whatever `path` currently holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = load_items(&path);
        info!("Item store opened at {:?} with {} items", path, items.len());
        Self {
            path,
            items: RwLock::new(items),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every item in insertion order.
    pub fn list(&self) -> Vec<Record> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn get(&self, id: i64) -> Result<Record, StoreError> {
        self.items
            .read()
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Append a new item after validating required fields and id uniqueness.
    pub fn create(&self, candidate: Record) -> Result<Record, StoreError> {
        let missing = candidate.missing_fields(&REQUIRED_FIELDS);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
            return Err(StoreError::Validation(format!(
                "missing required fields: {}",
                names.join(", ")
            )));
        }
        let id = candidate
            .id()
            .ok_or_else(|| StoreError::Validation("id must be an integer".to_string()))?;

        let mut items = self.items.write();
        if items.iter().any(|item| item.id() == Some(id)) {
            debug!("Rejected duplicate item id {}", id);
            return Err(StoreError::Conflict(id));
        }

        let mut next = items.clone();
        next.push(candidate.clone());
        self.persist(&next)?;
        *items = next;

        info!("Created item {}", id);
        Ok(candidate)
    }

    /// Merge `partial` onto the item with `id`.
    pub fn update(&self, id: i64, partial: Record) -> Result<Record, StoreError> {
        let mut items = self.items.write();
        let position = items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or(StoreError::NotFound(id))?;

        if let Some(new_id) = partial.as_map().get(Field::Id.name()) {
            let new_id = new_id
                .as_i64()
                .ok_or_else(|| StoreError::Validation("id must be an integer".to_string()))?;
            if new_id != id && items.iter().any(|item| item.id() == Some(new_id)) {
                return Err(StoreError::Conflict(new_id));
            }
        }

        let mut next = items.clone();
        next[position].merge(&partial);
        let updated = next[position].clone();
        self.persist(&next)?;
        *items = next;

        info!("Updated item {}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut items = self.items.write();
        let position = items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or(StoreError::NotFound(id))?;

        let mut next = items.clone();
        next.remove(position);
        self.persist(&next)?;
        *items = next;

        info!("Deleted item {}", id);
        Ok(())
    }

    // Blocking file I/O under the write lock; writers are serialized on it.
    fn persist(&self, items: &[Record]) -> Result<(), StoreError> {
        save_items(&self.path, items).inspect_err(|e| error!("{}", e))
    }
}
