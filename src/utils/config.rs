use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::color::Color;
use crate::core::gallery::GalleryPolicy;
use crate::shared::constants;
use crate::utils::logger;

/// Settings read from `pixelfinity.config`.
///
/// The file is plain `key = value` lines; anything unrecognised is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub export_scale: u32,
    pub preview_size: u32,
    pub default_color: Color,
    pub grid_size: usize,
    pub gallery_policy: GalleryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_scale: constants::DEFAULT_EXPORT_SCALE,
            preview_size: constants::DEFAULT_PREVIEW_SIZE,
            default_color: Color::rgb(0x2b, 0x2b, 0x2b),
            grid_size: constants::DEFAULT_GRID_SIZE,
            gallery_policy: GalleryPolicy::Overwrite,
        }
    }
}

impl AppConfig {
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(constants::CONFIG_FILE);
        match fs::read_to_string(&config_path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                logger::info(&format!("config: ignoring line without '=': {}", trimmed));
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            let applied = match key {
                "export-scale" => parse_in_range(value, 1, constants::MAX_EXPORT_SCALE)
                    .map(|v| config.export_scale = v),
                "preview-size" => {
                    parse_in_range(value, 1, 1024).map(|v| config.preview_size = v)
                }
                "grid-size" => parse_in_range(value, 1, constants::MAX_GRID_DIMENSION as u32)
                    .map(|v| config.grid_size = v as usize),
                "default-color" => Color::parse(value).ok().map(|c| config.default_color = c),
                "gallery-policy" => {
                    GalleryPolicy::parse(value).map(|p| config.gallery_policy = p)
                }
                _ => None,
            };

            if applied.is_none() {
                logger::info(&format!("config: ignoring {} = {}", key, value));
            }
        }

        config
    }

    /// Writes a commented default config when none exists yet.
    pub fn write_default_if_missing(dir: &Path) -> Result<()> {
        let config_path = dir.join(constants::CONFIG_FILE);
        if config_path.exists() {
            return Ok(());
        }

        let defaults = Self::default();
        let content = format!(
            "# {} settings\nexport-scale = {}\npreview-size = {}\ndefault-color = {}\ngrid-size = {}\ngallery-policy = overwrite\n",
            constants::APP_NAME,
            defaults.export_scale,
            defaults.preview_size,
            defaults.default_color,
            defaults.grid_size,
        );

        fs::write(&config_path, content)
            .with_context(|| format!("failed to write {}", config_path.display()))
    }
}

fn parse_in_range(value: &str, min: u32, max: u32) -> Option<u32> {
    value.parse::<u32>().ok().filter(|v| (min..=max).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        let config = AppConfig::parse(
            "export-scale = 8\n# comment\npreview-size=64\ndefault-color = #FFFFFF\ngrid-size = 32\ngallery-policy = Append\n",
        );
        assert_eq!(config.export_scale, 8);
        assert_eq!(config.preview_size, 64);
        assert_eq!(config.default_color, Color::rgb(255, 255, 255));
        assert_eq!(config.grid_size, 32);
        assert_eq!(config.gallery_policy, GalleryPolicy::Append);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = AppConfig::parse("export-scale = 0\ngrid-size = 999\ndefault-color = mauve\nnonsense\ncolour = #fff");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        AppConfig::write_default_if_missing(dir.path()).unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());

        fs::write(dir.path().join(constants::CONFIG_FILE), "export-scale = 4\n").unwrap();
        AppConfig::write_default_if_missing(dir.path()).unwrap();
        assert_eq!(AppConfig::load(dir.path()).export_scale, 4);
    }
}
