use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::path::PathBuf;

use crate::core::color::Color;
use crate::core::editor::Editor;
use crate::core::palette::Filament;
use crate::core::stats::tile_word;
use crate::shared::constants;
use crate::utils::{file_utils, logger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    None,
    Gallery,
    Stats,
    Export,
    Import,
    Resize,
    Palette,
    AddFilament,
}

impl Modal {
    pub fn title(self) -> &'static str {
        match self {
            Modal::None => "Paint",
            Modal::Gallery => "Pixelplate Gallery",
            Modal::Stats => "Grid Stats",
            Modal::Export => "Export Pixelplate",
            Modal::Import => "Import Pixelplate",
            Modal::Resize => "Resize Grid",
            Modal::Palette => "Filaments",
            Modal::AddFilament => "Add Filament",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryFocus {
    Name,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Name,
    Color,
}

/// Where the grid was last drawn, for mapping mouse positions to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Screen area covered by visible cells.
    pub cells: Rect,
    pub cell_width: u16,
    pub columns: usize,
    pub rows: usize,
    /// Grid coordinates of the top-left visible cell.
    pub offset: (usize, usize),
}

impl GridGeometry {
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let inside = column >= self.cells.x
            && column < self.cells.x + self.cells.width
            && row >= self.cells.y
            && row < self.cells.y + self.cells.height;
        if !inside {
            return None;
        }

        let x = ((column - self.cells.x) / self.cell_width) as usize;
        let y = (row - self.cells.y) as usize;
        (x < self.columns && y < self.rows).then_some((x + self.offset.0, y + self.offset.1))
    }
}

pub struct EditorApp {
    pub editor: Editor,
    pub modal: Modal,
    pub status: String,
    pub should_quit: bool,
    pub cursor: (usize, usize),
    pub geometry: Option<GridGeometry>,
    pub name_input: String,
    pub gallery_focus: GalleryFocus,
    pub gallery_index: usize,
    pub text_input: String,
    pub palette_index: usize,
    pub add_name: String,
    pub add_color: String,
    pub add_field: AddField,
    pub png_path: PathBuf,
}

impl EditorApp {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            modal: Modal::None,
            status: "Click or press Space to paint".to_string(),
            should_quit: false,
            cursor: (0, 0),
            geometry: None,
            name_input: String::new(),
            gallery_focus: GalleryFocus::Name,
            gallery_index: 0,
            text_input: String::new(),
            palette_index: 0,
            add_name: String::new(),
            add_color: String::new(),
            add_field: AddField::Name,
            png_path: PathBuf::from(constants::DEFAULT_PNG_FILE),
        }
    }

    fn notify(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    fn fail(&mut self, context: &str, err: anyhow::Error) {
        logger::error(&format!("{}: {:#}", context, err));
        self.status = format!("{}: {}", context, err);
    }

    fn open(&mut self, modal: Modal) {
        self.modal = modal;
        match modal {
            Modal::Gallery => {
                self.name_input.clear();
                self.gallery_focus = GalleryFocus::Name;
                self.gallery_index = self.gallery_index.min(self.editor.gallery().len().saturating_sub(1));
                self.notify("Type a name and press Enter to save, Tab to browse");
            }
            Modal::Import => {
                self.text_input.clear();
                self.notify("Paste pixelplate data, then press Enter");
            }
            Modal::Resize => {
                let grid = self.editor.grid();
                self.text_input = if grid.width() == grid.height() {
                    grid.width().to_string()
                } else {
                    format!("{}x{}", grid.width(), grid.height())
                };
                self.notify("Enter a size such as 16 or 24x16; painted cells are cleared");
            }
            Modal::Palette => {
                self.palette_index = self.editor.current_filament_index().unwrap_or(0);
                self.notify("Enter select  a add  d delete  x reset");
            }
            Modal::AddFilament => {
                self.add_name.clear();
                self.add_color.clear();
                self.add_field = AddField::Name;
                self.notify("Tab switches fields, Enter adds");
            }
            Modal::Export => self.notify("w writes the text to pixelplate.json"),
            Modal::Stats | Modal::None => {}
        }
    }

    fn close(&mut self) {
        self.modal = if self.modal == Modal::AddFilament {
            Modal::Palette
        } else {
            Modal::None
        };
    }

    pub fn on_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            if self.modal == Modal::None {
                self.should_quit = true;
            } else {
                self.close();
            }
            return;
        }

        match self.modal {
            Modal::None => self.handle_paint_key(key),
            Modal::Gallery => self.handle_gallery_key(key),
            Modal::Stats => {
                if matches!(key, KeyCode::Char('s') | KeyCode::Char('q')) {
                    self.close();
                }
            }
            Modal::Export => self.handle_export_key(key),
            Modal::Import => self.handle_import_key(key),
            Modal::Resize => self.handle_resize_key(key),
            Modal::Palette => self.handle_palette_key(key),
            Modal::AddFilament => self.handle_add_filament_key(key),
        }
    }

    /// Bracketed paste goes to whichever text field is active.
    pub fn on_paste(&mut self, text: &str) {
        match self.modal {
            Modal::Import => self.text_input.push_str(text),
            Modal::Resize => self.text_input.push_str(text.trim()),
            Modal::Gallery if self.gallery_focus == GalleryFocus::Name => {
                self.name_input.push_str(text.trim())
            }
            Modal::AddFilament => match self.add_field {
                AddField::Name => self.add_name.push_str(text.trim()),
                AddField::Color => self.add_color.push_str(text.trim()),
            },
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if self.modal != Modal::None {
            return;
        }
        if !matches!(
            kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        ) {
            return;
        }

        let Some((x, y)) = self.geometry.and_then(|g| g.cell_at(column, row)) else {
            return;
        };
        self.cursor = (x, y);
        self.paint_cursor();
    }

    fn paint_cursor(&mut self) {
        let (x, y) = self.cursor;
        if let Err(err) = self.editor.paint(x, y) {
            self.fail("Paint failed", err);
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let grid = self.editor.grid();
        let (w, h) = (grid.width() as isize, grid.height() as isize);
        let x = (self.cursor.0 as isize + dx).clamp(0, w - 1);
        let y = (self.cursor.1 as isize + dy).clamp(0, h - 1);
        self.cursor = (x as usize, y as usize);
    }

    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }

    fn announce_filament(&mut self, filament: Option<Filament>) {
        if let Some(f) = filament {
            self.notify(format!("Color: {} ({})", f.name, f.color));
        }
    }

    fn handle_paint_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.paint_cursor(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let picked = self.editor.select_filament(index).cloned();
                self.announce_filament(picked);
            }
            KeyCode::Char('[') => {
                let picked = self.editor.cycle_filament(-1).cloned();
                self.announce_filament(picked);
            }
            KeyCode::Char(']') => {
                let picked = self.editor.cycle_filament(1).cloned();
                self.announce_filament(picked);
            }
            KeyCode::Char('g') => {
                let on = self.editor.toggle_grid_lines();
                self.notify(if on { "Grid lines on" } else { "Grid lines off" });
            }
            KeyCode::Char('t') => match self.editor.toggle_theme() {
                Ok(theme) => self.notify(format!("Theme: {}", theme.name())),
                Err(err) => self.fail("Theme change failed", err),
            },
            KeyCode::Char('c') => match self.editor.clear() {
                Ok(()) => self.notify("Grid cleared"),
                Err(err) => self.fail("Clear failed", err),
            },
            KeyCode::Char('p') => self.write_png(),
            KeyCode::Char('o') => self.open(Modal::Gallery),
            KeyCode::Char('s') => self.open(Modal::Stats),
            KeyCode::Char('e') => self.open(Modal::Export),
            KeyCode::Char('i') => self.open(Modal::Import),
            KeyCode::Char('r') => self.open(Modal::Resize),
            KeyCode::Char('f') => self.open(Modal::Palette),
            _ => {}
        }
    }

    fn write_png(&mut self) {
        let path = self.png_path.clone();
        match self.editor.write_png(&path, None) {
            Ok(()) => {
                let grid = self.editor.grid();
                let scale = self.editor.config().export_scale as usize;
                self.notify(format!(
                    "Saved {} ({}x{})",
                    path.display(),
                    grid.width() * scale,
                    grid.height() * scale
                ));
            }
            Err(err) => self.fail("PNG export failed", err),
        }
    }

    fn handle_gallery_key(&mut self, key: KeyCode) {
        if key == KeyCode::Tab || key == KeyCode::BackTab {
            self.gallery_focus = match self.gallery_focus {
                GalleryFocus::Name => GalleryFocus::List,
                GalleryFocus::List => GalleryFocus::Name,
            };
            return;
        }

        match self.gallery_focus {
            GalleryFocus::Name => match key {
                KeyCode::Backspace => {
                    self.name_input.pop();
                }
                KeyCode::Char(c) => self.name_input.push(c),
                KeyCode::Enter => {
                    let name = self.name_input.trim().to_string();
                    if name.is_empty() {
                        self.notify("Name your pixelplate first");
                        return;
                    }
                    match self.editor.save_pixelplate(&name) {
                        Ok(()) => {
                            self.name_input.clear();
                            self.gallery_index = self
                                .editor
                                .gallery()
                                .entries()
                                .iter()
                                .rposition(|e| e.name == name)
                                .unwrap_or(0);
                            self.notify(format!("Saved pixelplate \"{}\"", name));
                        }
                        Err(err) => self.fail("Save failed", err),
                    }
                }
                _ => {}
            },
            GalleryFocus::List => {
                let len = self.editor.gallery().len();
                match key {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.gallery_index = self.gallery_index.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if self.gallery_index + 1 < len {
                            self.gallery_index += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if self.editor.gallery().is_empty() {
                            self.notify("The gallery is empty");
                            return;
                        }
                        match self.editor.load_pixelplate_at(self.gallery_index) {
                            Ok(entry) => {
                                let msg = format!("Loaded pixelplate \"{}\"", entry.name);
                                self.clamp_cursor();
                                self.modal = Modal::None;
                                self.notify(msg);
                            }
                            Err(err) => self.fail("Load failed", err),
                        }
                    }
                    KeyCode::Char('d') | KeyCode::Delete => {
                        let Some(entry) = self.editor.gallery().get(self.gallery_index) else {
                            return;
                        };
                        let name = entry.name.clone();
                        match self.editor.delete_pixelplate(&name) {
                            Ok(_) => {
                                let len = self.editor.gallery().len();
                                self.gallery_index = self.gallery_index.min(len.saturating_sub(1));
                                self.notify(format!("Deleted pixelplate \"{}\"", name));
                            }
                            Err(err) => self.fail("Delete failed", err),
                        }
                    }
                    KeyCode::Char('q') => self.close(),
                    _ => {}
                }
            }
        }
    }

    fn handle_export_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('w') => {
                let path = PathBuf::from(format!("{}.json", self.png_stem()));
                let text = self.editor.export_grid_text();
                match file_utils::write_atomic(&path, text.as_bytes()) {
                    Ok(()) => self.notify(format!("Wrote {}", path.display())),
                    Err(err) => self.fail("Export failed", err),
                }
            }
            KeyCode::Char('q') | KeyCode::Char('e') | KeyCode::Enter => self.close(),
            _ => {}
        }
    }

    fn png_stem(&self) -> String {
        self.png_path
            .with_extension("")
            .to_string_lossy()
            .to_string()
    }

    fn handle_import_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Backspace => {
                self.text_input.pop();
            }
            KeyCode::Char(c) => self.text_input.push(c),
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.text_input);
                match self.editor.import_grid_text(&text) {
                    Ok(()) => {
                        self.clamp_cursor();
                        self.modal = Modal::None;
                        let grid = self.editor.grid();
                        let msg = format!("Imported {}x{} pixelplate", grid.width(), grid.height());
                        self.notify(msg);
                    }
                    Err(err) => {
                        self.text_input = text;
                        self.fail("Invalid pixelplate data", err);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_resize_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Backspace => {
                self.text_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == 'x' || c == 'X' => {
                self.text_input.push(c)
            }
            KeyCode::Enter => {
                let Some((w, h)) = parse_size(&self.text_input) else {
                    self.notify("Enter a size like 16 or 24x16");
                    return;
                };
                match self.editor.resize(w, h) {
                    Ok(()) => {
                        self.clamp_cursor();
                        self.modal = Modal::None;
                        self.notify(format!("Grid is now {}x{}", w, h));
                    }
                    Err(err) => self.fail("Resize failed", err),
                }
            }
            _ => {}
        }
    }

    fn handle_palette_key(&mut self, key: KeyCode) {
        let len = self.editor.palette().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.palette_index = self.palette_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.palette_index + 1 < len {
                    self.palette_index += 1;
                }
            }
            KeyCode::Enter => {
                let picked = self.editor.select_filament(self.palette_index).cloned();
                self.announce_filament(picked);
            }
            KeyCode::Char('a') => self.open(Modal::AddFilament),
            KeyCode::Char('d') | KeyCode::Delete => {
                let Some(color) = self.editor.palette().get(self.palette_index).map(|f| f.color)
                else {
                    return;
                };
                match self.editor.remove_filament(color) {
                    Ok(Some(removed)) => {
                        let len = self.editor.palette().len();
                        self.palette_index = self.palette_index.min(len.saturating_sub(1));
                        self.notify(format!("Removed {}", removed.name));
                    }
                    Ok(None) => {}
                    Err(err) => self.fail("Remove failed", err),
                }
            }
            KeyCode::Char('x') => match self.editor.reset_palette() {
                Ok(()) => {
                    self.palette_index = 0;
                    self.notify("Palette reset to stock filaments");
                }
                Err(err) => self.fail("Reset failed", err),
            },
            KeyCode::Char('q') | KeyCode::Char('f') => self.close(),
            _ => {}
        }
    }

    fn handle_add_filament_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab => {
                self.add_field = match self.add_field {
                    AddField::Name => AddField::Color,
                    AddField::Color => AddField::Name,
                };
                return;
            }
            KeyCode::Enter => {
                self.submit_filament();
                return;
            }
            _ => {}
        }

        let field = match self.add_field {
            AddField::Name => &mut self.add_name,
            AddField::Color => &mut self.add_color,
        };
        match key {
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Char(c) => field.push(c),
            _ => {}
        }
    }

    fn submit_filament(&mut self) {
        let name = self.add_name.trim().to_string();
        if name.is_empty() {
            self.add_field = AddField::Name;
            self.notify("A filament needs a name");
            return;
        }

        let color = match Color::parse(&self.add_color) {
            Ok(color) => color,
            Err(err) => {
                self.add_field = AddField::Color;
                self.notify(format!("Invalid color: {}", err));
                return;
            }
        };

        match self.editor.add_filament(Filament::new(name.clone(), color)) {
            Ok(true) => {
                self.palette_index = self.editor.palette().len() - 1;
                self.modal = Modal::Palette;
                self.notify(format!("Added {} ({})", name, color));
            }
            Ok(false) => self.notify(format!("{} is already in the palette", color)),
            Err(err) => self.fail("Add failed", err),
        }
    }

    pub fn stats_lines(&self) -> Vec<String> {
        self.editor
            .stats()
            .counts()
            .iter()
            .map(|(color, count)| format!("{}: {} {}", color, count, tile_word(*count)))
            .collect()
    }
}

/// Accepts `N` (square) or `WxH`.
pub fn parse_size(input: &str) -> Option<(usize, usize)> {
    let input = input.trim().to_ascii_lowercase();
    let (w, h) = match input.split_once('x') {
        Some((w, h)) => (w.trim().parse().ok()?, h.trim().parse().ok()?),
        None => {
            let n = input.parse().ok()?;
            (n, n)
        }
    };
    (w > 0 && h > 0).then_some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::GalleryPolicy;
    use crate::store::MemoryStore;
    use crate::utils::config::AppConfig;

    fn app() -> EditorApp {
        let editor = Editor::open(Box::new(MemoryStore::new()), AppConfig::default()).unwrap();
        EditorApp::new(editor)
    }

    fn type_text(app: &mut EditorApp, text: &str) {
        for c in text.chars() {
            app.on_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keyboard_painting() {
        let mut app = app();
        app.on_key(KeyCode::Right);
        app.on_key(KeyCode::Char('j'));
        app.on_key(KeyCode::Char('3'));
        app.on_key(KeyCode::Char(' '));

        assert_eq!(app.cursor, (1, 1));
        assert_eq!(app.editor.grid().get(1, 1), Some(Color::parse("#57d188").unwrap()));

        app.on_key(KeyCode::Up);
        app.on_key(KeyCode::Up);
        app.on_key(KeyCode::Left);
        app.on_key(KeyCode::Left);
        assert_eq!(app.cursor, (0, 0));
    }

    #[test]
    fn test_mouse_paints_mapped_cell() {
        let mut app = app();
        app.geometry = Some(GridGeometry {
            cells: Rect::new(10, 5, 32, 16),
            cell_width: 2,
            columns: 16,
            rows: 16,
            offset: (0, 0),
        });

        app.on_mouse(MouseEventKind::Down(MouseButton::Left), 15, 7);
        app.on_mouse(MouseEventKind::Drag(MouseButton::Left), 16, 7);
        app.on_mouse(MouseEventKind::Down(MouseButton::Right), 20, 8);
        app.on_mouse(MouseEventKind::Down(MouseButton::Left), 2, 2);

        let red = Color::parse("#cc3232").unwrap();
        assert_eq!(app.editor.grid().get(2, 2), Some(red));
        assert_eq!(app.editor.grid().get(3, 2), Some(red));
        assert_eq!(app.editor.stats().count_of(red), 2);
    }

    #[test]
    fn test_mouse_respects_scrolled_viewport() {
        let mut app = app();
        app.editor.resize(32, 32).unwrap();
        app.geometry = Some(GridGeometry {
            cells: Rect::new(10, 5, 20, 8),
            cell_width: 2,
            columns: 10,
            rows: 8,
            offset: (22, 24),
        });

        app.on_mouse(MouseEventKind::Down(MouseButton::Left), 29, 12);
        assert_eq!(app.cursor, (31, 31));
        assert_eq!(
            app.editor.grid().get(31, 31),
            Some(Color::parse("#cc3232").unwrap())
        );
    }

    #[test]
    fn test_import_modal_keeps_state_on_error() {
        let mut app = app();
        app.on_key(KeyCode::Char(' '));
        let before = app.editor.grid().clone();

        app.on_key(KeyCode::Char('i'));
        app.on_paste("[[\"#fff\"");
        app.on_key(KeyCode::Enter);

        assert_eq!(app.modal, Modal::Import);
        assert!(app.status.starts_with("Invalid pixelplate data"));
        assert_eq!(app.editor.grid(), &before);

        app.text_input.clear();
        app.on_paste(r##"[["#000000","#ffffff"]]"##);
        app.on_key(KeyCode::Enter);
        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.editor.grid().width(), 2);
    }

    #[test]
    fn test_gallery_modal_save_and_load() {
        let mut app = app();
        app.on_key(KeyCode::Char(' '));
        let saved = app.editor.grid().clone();

        app.on_key(KeyCode::Char('o'));
        type_text(&mut app, "heart");
        app.on_key(KeyCode::Enter);
        assert_eq!(app.editor.gallery().names(), ["heart"]);

        app.on_key(KeyCode::Esc);
        app.on_key(KeyCode::Char('c'));
        assert_ne!(app.editor.grid(), &saved);

        app.on_key(KeyCode::Char('o'));
        app.on_key(KeyCode::Tab);
        app.on_key(KeyCode::Enter);
        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.editor.grid(), &saved);
    }

    #[test]
    fn test_gallery_enter_loads_highlighted_duplicate() {
        let config = AppConfig {
            gallery_policy: GalleryPolicy::Append,
            ..AppConfig::default()
        };
        let editor = Editor::open(Box::new(MemoryStore::new()), config).unwrap();
        let mut app = EditorApp::new(editor);
        let blank = app.editor.grid().clone();
        app.editor.save_pixelplate("dup").unwrap();
        app.editor.paint(0, 0).unwrap();
        app.editor.save_pixelplate("dup").unwrap();

        app.on_key(KeyCode::Char('o'));
        app.on_key(KeyCode::Tab);
        app.gallery_index = 0;
        app.on_key(KeyCode::Enter);

        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.editor.grid(), &blank);
        assert_eq!(app.status, "Loaded pixelplate \"dup\"");
    }

    #[test]
    fn test_resize_prompt() {
        let mut app = app();
        app.cursor = (15, 15);
        app.on_key(KeyCode::Char('r'));
        assert_eq!(app.text_input, "16");
        app.on_key(KeyCode::Backspace);
        app.on_key(KeyCode::Backspace);
        type_text(&mut app, "8x4");
        app.on_key(KeyCode::Enter);

        assert_eq!(app.modal, Modal::None);
        assert_eq!((app.editor.grid().width(), app.editor.grid().height()), (8, 4));
        assert_eq!(app.cursor, (7, 3));
    }

    #[test]
    fn test_palette_editor_add_duplicate_and_remove() {
        let mut app = app();
        app.on_key(KeyCode::Char('f'));
        app.on_key(KeyCode::Char('a'));
        type_text(&mut app, "Snow");
        app.on_key(KeyCode::Tab);
        type_text(&mut app, "#FFF");
        app.on_key(KeyCode::Enter);
        assert_eq!(app.modal, Modal::AddFilament);
        assert_eq!(app.editor.palette().len(), 9);

        app.add_color = "#ff8800".into();
        app.on_key(KeyCode::Enter);
        assert_eq!(app.modal, Modal::Palette);
        assert_eq!(app.editor.palette().len(), 10);
        assert_eq!(app.palette_index, 9);

        app.on_key(KeyCode::Char('d'));
        assert_eq!(app.editor.palette().len(), 9);
        assert!(app.editor.palette().find(Color::parse("#ff8800").unwrap()).is_none());
    }

    #[test]
    fn test_escape_closes_modal_before_quitting() {
        let mut app = app();
        app.on_key(KeyCode::Char('s'));
        app.on_key(KeyCode::Esc);
        assert_eq!(app.modal, Modal::None);
        assert!(!app.should_quit);
        app.on_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("16"), Some((16, 16)));
        assert_eq!(parse_size(" 24X8 "), Some((24, 8)));
        assert_eq!(parse_size("0"), None);
        assert_eq!(parse_size("x4"), None);
    }
}
