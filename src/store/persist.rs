//! JSON data-file persistence for [`MemoryStore`]
//!
//! The file holds a single JSON array of records. Saves write a sibling
//! temporary file and rename it over the target, so a crash mid-save never
//! leaves a half-written data file behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::Record;

use super::errors::StoreResult;
use super::memory::MemoryStore;

/// Loads a store from a data file
pub fn load_json<E>(path: &Path) -> StoreResult<MemoryStore<E>>
where
    E: Record + DeserializeOwned,
{
    let content = fs::read_to_string(path)?;
    let records: Vec<E> = serde_json::from_str(&content)?;
    MemoryStore::from_records(records)
}

/// Writes every record of a store to a data file
pub fn save_json<E>(store: &MemoryStore<E>, path: &Path) -> StoreResult<()>
where
    E: Record + Serialize,
{
    let records = store.all()?;
    let body = serde_json::to_vec_pretty(&records)?;

    let tmp = temp_path(path);
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
