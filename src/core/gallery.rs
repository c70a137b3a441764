use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{GalleryError, ImportError};
use super::grid::Grid;

/// How saving a name that already exists behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryPolicy {
    /// Replace the grid of the existing entry, keeping its position.
    #[default]
    Overwrite,
    /// Always append; the newest entry of a name wins on load.
    Append,
}

impl GalleryPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Some(Self::Overwrite),
            "append" => Some(Self::Append),
            _ => None,
        }
    }
}

/// A saved grid snapshot ("pixelplate").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub name: String,
    pub data: Grid,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGallery {
    List(Vec<GalleryEntry>),
    // Older stores keep a name -> grid object.
    Map(BTreeMap<String, Grid>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    policy: GalleryPolicy,
}

impl Gallery {
    pub fn new(policy: GalleryPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> GalleryPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn save(&mut self, name: &str, grid: &Grid) -> Result<(), GalleryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::EmptyName);
        }

        // Same entry `load` returns: the newest with this name.
        if self.policy == GalleryPolicy::Overwrite {
            if let Some(entry) = self.entries.iter_mut().rev().find(|e| e.name == name) {
                entry.data = grid.clone();
                return Ok(());
            }
        }

        self.entries.push(GalleryEntry {
            name: name.to_string(),
            data: grid.clone(),
        });
        Ok(())
    }

    pub fn load(&self, name: &str) -> Option<&Grid> {
        let name = name.trim();
        self.entries
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| &e.data)
    }

    pub fn get(&self, index: usize) -> Option<&GalleryEntry> {
        self.entries.get(index)
    }

    /// Removes every entry with this name and returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let name = name.trim();
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        before - self.entries.len()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_default()
    }

    pub fn from_json(text: &str, policy: GalleryPolicy) -> Result<Self, ImportError> {
        let stored: StoredGallery = serde_json::from_str(text.trim())?;
        let entries = match stored {
            StoredGallery::List(entries) => entries,
            StoredGallery::Map(map) => map
                .into_iter()
                .map(|(name, data)| GalleryEntry { name, data })
                .collect(),
        };
        Ok(Self { entries, policy })
    }
}
