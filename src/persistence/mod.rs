//! Flat save-blob persistence
//!
//! Progress is a single JSON object. Loading merges the stored keys over
//! the defaults one key at a time, so blobs written by older builds pick
//! up new fields and blobs written by newer builds keep their unknown
//! keys intact for the next save. Anything unreadable falls back to the
//! defaults without interrupting play.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sim::mode::Mode;
use crate::sim::roster::CharacterId;

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveBlob {
    pub coins: u64,
    pub gems: u64,
    pub mode: Mode,
    pub level: u32,
    pub unlocked: Vec<CharacterId>,
    pub selected: CharacterId,
    pub mobile: bool,
    /// Keys this build does not know about; carried through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for SaveBlob {
    fn default() -> Self {
        Self {
            coins: 0,
            gems: 0,
            mode: Mode::Endless,
            level: 1,
            unlocked: vec![CharacterId::Striker],
            selected: CharacterId::Striker,
            mobile: false,
            extra: serde_json::Map::new(),
        }
    }
}

/// Raw blob storage. The merge and fallback logic lives in [`load`] so
/// every backend behaves the same.
pub trait SaveStore {
    fn load_raw(&self) -> Option<String>;
    fn save_raw(&mut self, raw: &str);
}

/// Save file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaveStore for FileStore {
    fn load_raw(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("failed to read save {}: {err}", self.path.display());
                None
            }
        }
    }

    fn save_raw(&mut self, raw: &str) {
        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            log::warn!("failed to create save dir {}: {err}", parent.display());
            return;
        }
        if let Err(err) = fs::write(&self.path, raw) {
            log::warn!("failed to write save {}: {err}", self.path.display());
        }
    }
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl SaveStore for MemoryStore {
    fn load_raw(&self) -> Option<String> {
        self.slot.clone()
    }

    fn save_raw(&mut self, raw: &str) {
        self.slot = Some(raw.to_owned());
    }
}

/// Load a blob, merging stored keys over `defaults` per key. Any parse
/// or shape problem yields the defaults.
pub fn load(store: &dyn SaveStore, defaults: &SaveBlob) -> SaveBlob {
    let Some(raw) = store.load_raw() else {
        return defaults.clone();
    };
    let stored: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("discarding corrupt save: {err}");
            return defaults.clone();
        }
    };
    let serde_json::Value::Object(stored) = stored else {
        log::warn!("discarding save: not a JSON object");
        return defaults.clone();
    };

    // to_value on a plain struct cannot fail; guard anyway rather than
    // panic in the save path.
    let mut merged = match serde_json::to_value(defaults) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return defaults.clone(),
    };
    for (key, value) in stored {
        merged.insert(key, value);
    }
    match serde_json::from_value(serde_json::Value::Object(merged)) {
        Ok(blob) => blob,
        Err(err) => {
            log::warn!("discarding save with bad field: {err}");
            defaults.clone()
        }
    }
}

/// Serialize and hand the blob to the store.
pub fn save(store: &mut dyn SaveStore, blob: &SaveBlob) {
    match serde_json::to_string(blob) {
        Ok(raw) => store.save_raw(&raw),
        Err(err) => log::warn!("failed to serialize save: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::default();
        let blob = SaveBlob {
            coins: 120,
            gems: 3,
            mode: Mode::Arena,
            level: 7,
            unlocked: vec![CharacterId::Striker, CharacterId::Archon],
            selected: CharacterId::Archon,
            mobile: true,
            ..Default::default()
        };
        save(&mut store, &blob);
        assert_eq!(load(&store, &SaveBlob::default()), blob);
    }

    #[test]
    fn test_missing_store_yields_defaults() {
        let store = MemoryStore::default();
        assert_eq!(load(&store, &SaveBlob::default()), SaveBlob::default());
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        let mut store = MemoryStore::default();
        store.save_raw(r#"{"coins": 55, "mode": "bossRush"}"#);

        let blob = load(&store, &SaveBlob::default());
        assert_eq!(blob.coins, 55);
        assert_eq!(blob.mode, Mode::BossRush);
        // Untouched keys come from the defaults.
        assert_eq!(blob.level, 1);
        assert_eq!(blob.selected, CharacterId::Striker);
    }

    #[test]
    fn test_corrupt_blob_yields_defaults() {
        for raw in ["{not json", "[1,2,3]", r#"{"coins": "plenty"}"#] {
            let mut store = MemoryStore::default();
            store.save_raw(raw);
            assert_eq!(load(&store, &SaveBlob::default()), SaveBlob::default());
        }
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let mut store = MemoryStore::default();
        store.save_raw(r#"{"coins": 9, "futureFlag": true}"#);

        let blob = load(&store, &SaveBlob::default());
        assert_eq!(blob.extra.get("futureFlag"), Some(&serde_json::json!(true)));

        save(&mut store, &blob);
        let raw = store.load_raw().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["futureFlag"], serde_json::json!(true));
        assert_eq!(value["coins"], serde_json::json!(9));
    }

    #[test]
    fn test_file_store_persists_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saves").join("slot.json");

        let mut store = FileStore::new(&path);
        assert!(store.load_raw().is_none());

        let blob = SaveBlob {
            coins: 42,
            ..Default::default()
        };
        save(&mut store, &blob);

        let reopened = FileStore::new(&path);
        assert_eq!(load(&reopened, &SaveBlob::default()).coins, 42);
    }
}
