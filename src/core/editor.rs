use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;

use super::color::Color;
use super::error::GalleryError;
use super::gallery::{Gallery, GalleryEntry};
use super::grid::{Grid, GridSize};
use super::palette::{Filament, Palette};
use super::stats::GridStats;
use super::theme::Theme;
use crate::renderer::raster;
use crate::shared::constants;
use crate::store::KeyValueStore;
use crate::utils::config::AppConfig;
use crate::utils::logger;

/// In-memory editing session backed by a key-value store.
///
/// Each mutating method updates memory first and then writes the affected
/// key straight through to the store. A rejected import returns before any
/// state is touched.
pub struct Editor {
    store: Box<dyn KeyValueStore>,
    config: AppConfig,
    grid: Grid,
    palette: Palette,
    gallery: Gallery,
    current_color: Color,
    show_grid_lines: bool,
    theme: Theme,
}

impl Editor {
    pub fn open(store: Box<dyn KeyValueStore>, config: AppConfig) -> Result<Self> {
        let palette = match store.get(constants::PALETTE_KEY)? {
            Some(text) => Palette::from_json(&text).unwrap_or_else(|err| {
                logger::error(&format!("stored palette ignored: {}", err));
                Palette::default()
            }),
            None => Palette::default(),
        };

        let gallery = match store.get(constants::GALLERY_KEY)? {
            Some(text) => Gallery::from_json(&text, config.gallery_policy).unwrap_or_else(|err| {
                logger::error(&format!("stored gallery ignored: {}", err));
                Gallery::new(config.gallery_policy)
            }),
            None => Gallery::new(config.gallery_policy),
        };

        let size = store
            .get(constants::GRID_SIZE_KEY)?
            .and_then(|text| serde_json::from_str::<GridSize>(&text).ok())
            .filter(GridSize::is_valid)
            .unwrap_or_else(|| GridSize::square(config.grid_size));

        let grid = match store.get(constants::CANVAS_KEY)? {
            Some(text) => match Grid::from_json(&text) {
                Ok(grid) => grid,
                Err(err) => {
                    logger::error(&format!("stored canvas ignored: {}", err));
                    Grid::new(size.width, size.height, config.default_color)?
                }
            },
            None => Grid::new(size.width, size.height, config.default_color)?,
        };

        let theme = store
            .get(constants::THEME_KEY)?
            .and_then(|text| Theme::parse(&text))
            .unwrap_or_default();

        let current_color = palette
            .first()
            .map(|f| f.color)
            .unwrap_or(config.default_color);

        logger::info(&format!(
            "session opened: {}x{} grid, {} filaments, {} pixelplates, {} theme",
            grid.width(),
            grid.height(),
            palette.len(),
            gallery.len(),
            theme.name()
        ));

        Ok(Self {
            store,
            config,
            grid,
            palette,
            gallery,
            current_color,
            show_grid_lines: true,
            theme,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn current_filament_index(&self) -> Option<usize> {
        self.palette.position(self.current_color)
    }

    pub fn show_grid_lines(&self) -> bool {
        self.show_grid_lines
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // --- grid ---

    pub fn paint(&mut self, x: usize, y: usize) -> Result<bool> {
        self.paint_with(x, y, self.current_color)
    }

    pub fn paint_with(&mut self, x: usize, y: usize, color: Color) -> Result<bool> {
        let changed = self.grid.paint(x, y, color);
        if changed {
            self.persist_canvas()?;
        }
        Ok(changed)
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.grid = self.grid.resize(width, height, self.config.default_color)?;
        let size = serde_json::to_string(&GridSize::of(&self.grid))?;
        self.store.set(constants::GRID_SIZE_KEY, &size)?;
        self.persist_canvas()?;
        logger::info(&format!("grid resized to {}x{}", width, height));
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.grid.fill(self.config.default_color);
        self.persist_canvas()
    }

    pub fn export_grid_text(&self) -> String {
        self.grid.to_json()
    }

    pub fn import_grid_text(&mut self, text: &str) -> Result<()> {
        let grid = Grid::from_json(text)?;
        self.replace_grid(grid)
    }

    // --- color selection ---

    pub fn select_color(&mut self, color: Color) {
        self.current_color = color;
    }

    pub fn select_filament(&mut self, index: usize) -> Option<&Filament> {
        let color = self.palette.get(index)?.color;
        self.current_color = color;
        self.palette.get(index)
    }

    /// Moves the selection `step` places through the palette, wrapping around.
    pub fn cycle_filament(&mut self, step: isize) -> Option<&Filament> {
        let len = self.palette.len() as isize;
        if len == 0 {
            return None;
        }
        let next = match self.current_filament_index() {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            None if step >= 0 => 0,
            None => (len - 1) as usize,
        };
        self.select_filament(next)
    }

    // --- palette ---

    pub fn add_filament(&mut self, filament: Filament) -> Result<bool> {
        if !self.palette.add(filament) {
            return Ok(false);
        }
        self.persist_palette()?;
        Ok(true)
    }

    pub fn remove_filament(&mut self, color: Color) -> Result<Option<Filament>> {
        let Some(removed) = self.palette.remove_by_color(color) else {
            return Ok(None);
        };
        if self.current_color == removed.color {
            self.reselect_after_palette_change();
        }
        self.persist_palette()?;
        Ok(Some(removed))
    }

    pub fn rename_filament(&mut self, color: Color, name: &str) -> Result<bool> {
        if !self.palette.rename(color, name) {
            return Ok(false);
        }
        self.persist_palette()?;
        Ok(true)
    }

    pub fn export_palette_text(&self) -> String {
        self.palette.to_json_pretty()
    }

    pub fn import_palette_text(&mut self, text: &str) -> Result<()> {
        self.palette = Palette::from_json(text)?;
        if self.current_filament_index().is_none() {
            self.reselect_after_palette_change();
        }
        self.persist_palette()
    }

    pub fn reset_palette(&mut self) -> Result<()> {
        self.palette.reset();
        if self.current_filament_index().is_none() {
            self.reselect_after_palette_change();
        }
        self.persist_palette()
    }

    fn reselect_after_palette_change(&mut self) {
        if let Some(first) = self.palette.first() {
            self.current_color = first.color;
        }
    }

    // --- gallery ---

    pub fn save_pixelplate(&mut self, name: &str) -> Result<()> {
        self.gallery.save(name, &self.grid)?;
        self.persist_gallery()?;
        logger::info(&format!("saved pixelplate {:?}", name.trim()));
        Ok(())
    }

    pub fn load_pixelplate(&mut self, name: &str) -> Result<()> {
        let grid = self
            .gallery
            .load(name)
            .cloned()
            .ok_or_else(|| GalleryError::NotFound(name.trim().to_string()))?;
        self.replace_grid(grid)
    }

    /// Loads the entry at `index` in gallery order, even when newer entries
    /// share its name.
    pub fn load_pixelplate_at(&mut self, index: usize) -> Result<&GalleryEntry> {
        let grid = match self.gallery.get(index) {
            Some(entry) => entry.data.clone(),
            None => bail!("no pixelplate at position {}", index + 1),
        };
        self.replace_grid(grid)?;
        self.gallery
            .get(index)
            .ok_or_else(|| anyhow!("no pixelplate at position {}", index + 1))
    }

    pub fn delete_pixelplate(&mut self, name: &str) -> Result<usize> {
        let removed = self.gallery.remove(name);
        if removed == 0 {
            return Err(GalleryError::NotFound(name.trim().to_string()).into());
        }
        self.persist_gallery()?;
        Ok(removed)
    }

    pub fn pixelplate(&self, name: &str) -> Result<&Grid> {
        self.gallery
            .load(name)
            .ok_or_else(|| GalleryError::NotFound(name.trim().to_string()).into())
    }

    // --- preferences ---

    /// Grid lines are a per-session display toggle and are not stored.
    pub fn toggle_grid_lines(&mut self) -> bool {
        self.show_grid_lines = !self.show_grid_lines;
        self.show_grid_lines
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        let text = serde_json::to_string(&theme).context("failed to encode theme")?;
        self.store.set(constants::THEME_KEY, &text)
    }

    // --- output ---

    pub fn stats(&self) -> GridStats {
        GridStats::collect(&self.grid)
    }

    pub fn write_png(&self, path: &Path, scale: Option<u32>) -> Result<()> {
        raster::write_png(path, &self.grid, scale.unwrap_or(self.config.export_scale))
    }

    pub fn preview_png(&self, grid: &Grid) -> Result<Vec<u8>> {
        raster::render_preview(grid, self.config.preview_size)
    }

    fn replace_grid(&mut self, grid: Grid) -> Result<()> {
        self.grid = grid;
        self.persist_canvas()
    }

    fn persist_canvas(&mut self) -> Result<()> {
        self.store
            .set(constants::CANVAS_KEY, &self.grid.to_json())
            .context("failed to store canvas")
    }

    fn persist_palette(&mut self) -> Result<()> {
        self.store
            .set(constants::PALETTE_KEY, &self.palette.to_json())
            .context("failed to store palette")
    }

    fn persist_gallery(&mut self) -> Result<()> {
        self.store
            .set(constants::GALLERY_KEY, &self.gallery.to_json())
            .context("failed to store gallery")
    }

    #[cfg(test)]
    pub(crate) fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).ok().flatten()
    }
}
