//! Persistence for named profiles: one JSON document mapping profile name to
//! an immutable snapshot of the session plus its precomputed share link.

pub mod fragment;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::LayoutItem;

/// A named, immutable snapshot taken at save time. `share_url` is baked in
/// when the profile is saved and never recomputed afterwards, so it keeps
/// pointing at the origin/path the deployment had back then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub streams: Vec<String>,
    #[serde(default)]
    pub layout: Vec<LayoutItem>,
    #[serde(rename = "shareUrl", default)]
    pub share_url: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access profile store: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile store is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed keyed store for profiles. The whole store is one JSON object;
/// every operation reads it, mutates the map, and writes it back.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProfileStore { path: path.into() }
    }

    /// Default store location: `~/.config/multiwatch/profiles.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".config/multiwatch/profiles.json")
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or overwrite one profile.
    pub fn save(&self, name: &str, profile: &Profile) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(name.to_string(), profile.clone());
        self.write_map(&map)
    }

    /// Fetch one profile; `Ok(None)` means the name is unknown.
    pub fn load(&self, name: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.read_map()?.remove(name))
    }

    /// All stored names, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_map()?.into_keys().collect())
    }

    /// Remove one profile; returns whether it existed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let mut map = self.read_map()?;
        let existed = map.remove(name).is_some();
        if existed {
            self.write_map(&map)?;
        }
        Ok(existed)
    }

    fn read_map(&self) -> Result<BTreeMap<String, Profile>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_map(&self, map: &BTreeMap<String, Profile>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(map)?)?;
        Ok(())
    }
}
