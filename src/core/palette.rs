use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::ImportError;
use crate::shared::constants;

/// A named palette color, after the filament spool it stands for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filament {
    pub name: String,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Filament {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            material: None,
            notes: None,
        }
    }
}

/// Stored shape of a filament before its color is validated.
#[derive(Deserialize)]
struct RawFilament {
    name: String,
    color: String,
    #[serde(default)]
    material: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Ordered filament list, unique by color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Filament>,
}

impl Default for Palette {
    fn default() -> Self {
        let entries = constants::DEFAULT_FILAMENTS
            .iter()
            .filter_map(|(name, hex)| Color::parse(hex).ok().map(|c| Filament::new(*name, c)))
            .collect();
        Self { entries }
    }
}

impl Palette {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filament> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Filament> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&Filament> {
        self.entries.first()
    }

    pub fn find(&self, color: Color) -> Option<&Filament> {
        self.entries.iter().find(|f| f.color == color)
    }

    pub fn position(&self, color: Color) -> Option<usize> {
        self.entries.iter().position(|f| f.color == color)
    }

    /// Appends the filament unless its color is already present.
    pub fn add(&mut self, filament: Filament) -> bool {
        if self.find(filament.color).is_some() {
            return false;
        }
        self.entries.push(filament);
        true
    }

    pub fn remove_by_color(&mut self, color: Color) -> Option<Filament> {
        let idx = self.position(color)?;
        Some(self.entries.remove(idx))
    }

    pub fn rename(&mut self, color: Color, name: &str) -> bool {
        match self.entries.iter_mut().find(|f| f.color == color) {
            Some(filament) => {
                filament.name = name.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.entries).unwrap_or_default()
    }

    /// Parses a JSON filament list. Repeated colors keep their first entry.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let raw: Vec<RawFilament> = serde_json::from_str(text.trim())?;
        let mut palette = Self::empty();
        for (index, item) in raw.into_iter().enumerate() {
            let color = Color::parse(&item.color).map_err(|source| ImportError::Filament {
                index,
                name: item.name.clone(),
                source,
            })?;
            palette.add(Filament {
                name: item.name,
                color,
                material: item.material,
                notes: item.notes,
            });
        }
        Ok(palette)
    }
}
