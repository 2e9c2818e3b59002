//! YAML persistence for the item collection.
//!
//! The file holds a single mapping with an `items` sequence. Every save
//! rewrites the whole file through a temp file and rename.

use super::error::StoreError;
use itemcheck_criteria::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// On-disk layout.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsDocument {
    #[serde(default)]
    pub items: Vec<Record>,
}

#[derive(Serialize)]
struct ItemsDocumentRef<'a> {
    items: &'a [Record],
}

/// Load items from `path`.
///
/// A missing, unreadable or corrupt file yields an empty collection.
/// Later records that repeat an earlier `id` are dropped.
pub fn load_items(path: &Path) -> Vec<Record> {
    if !path.exists() {
        debug!("Data file {:?} does not exist, starting empty", path);
        return Vec::new();
    }

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read data file {:?}: {}, starting empty", path, e);
            return Vec::new();
        }
    };

    match serde_yaml::from_str::<Option<ItemsDocument>>(&contents) {
        Ok(doc) => {
            let items = dedup_ids(doc.unwrap_or_default().items, path);
            info!("Loaded {} items from {:?}", items.len(), path);
            items
        }
        Err(e) => {
            warn!("Data file {:?} is corrupt: {}, starting empty", path, e);
            Vec::new()
        }
    }
}

fn dedup_ids(items: Vec<Record>, path: &Path) -> Vec<Record> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match item.id() {
            Some(id) if !seen.insert(id) => {
                warn!("Data file {:?} repeats item id {}, keeping the first", path, id);
                false
            }
            _ => true,
        })
        .collect()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Overwrite `path` with the full collection.
pub fn save_items(path: &Path, items: &[Record]) -> Result<(), StoreError> {
    let persist_err = |message: String| StoreError::Persist {
        path: path.display().to_string(),
        message,
    };

    let yaml = serde_yaml::to_string(&ItemsDocumentRef { items })
        .map_err(|e| persist_err(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, yaml).map_err(|e| persist_err(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| persist_err(e.to_string()))?;

    debug!("Saved {} items to {:?}", items.len(), path);
    Ok(())
}
