use anyhow::{bail, Context, Result};
use clap::{Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use super::color::Color;
use super::editor::Editor;
use super::palette::Filament;
use super::stats::GridStats;
use super::theme::Theme;
use crate::renderer::raster;
use crate::shared::constants;
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::utils::config::AppConfig;
use crate::utils::{file_utils, logger};

#[derive(Subcommand, Debug, Clone)]
pub enum GalleryCommand {
    /// List saved pixelplates
    List,
    /// Save the current grid under NAME
    Save { name: String },
    /// Replace the current grid with a saved pixelplate
    Load { name: String },
    /// Delete every pixelplate called NAME
    Delete { name: String },
    /// Write a fixed-size PNG thumbnail of a pixelplate
    Preview {
        name: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PaletteCommand {
    /// List filaments
    List,
    /// Add a filament; a color already in the palette is ignored
    Add {
        name: String,
        color: String,
        #[arg(short, long)]
        material: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove the filament with COLOR
    Remove { color: String },
    /// Rename the filament with COLOR
    Rename { color: String, name: String },
    /// Replace the palette with JSON from FILE (stdin when omitted)
    Import { file: Option<PathBuf> },
    /// Print the palette as JSON
    Export,
    /// Restore the stock filaments
    Reset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

/// Resolves the data directory, loads the config and opens the editor on
/// either the file store or a throwaway in-memory one.
pub fn open_editor(data_dir: &Path, ephemeral: bool) -> Result<Editor> {
    file_utils::ensure_dir(data_dir)?;
    if let Err(err) = AppConfig::write_default_if_missing(data_dir) {
        logger::error(&format!("{:#}", err));
    }
    let config = AppConfig::load(data_dir);

    let store: Box<dyn KeyValueStore> = if ephemeral {
        logger::info("using an ephemeral store");
        Box::new(MemoryStore::new())
    } else {
        let store = FileStore::open(data_dir.join(constants::STORE_FILE))?;
        logger::info(&format!("store: {}", store.path().display()));
        Box::new(store)
    };

    Editor::open(store, config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

pub fn export(editor: &Editor, out: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    let text = editor.export_grid_text();
    match out {
        Some(path) => {
            file_utils::write_atomic(path, text.as_bytes())?;
            writeln!(stdout, "Wrote {}", path.display())?;
        }
        None => writeln!(stdout, "{}", text)?,
    }
    Ok(())
}

pub fn import(editor: &mut Editor, input: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    let text = read_input(input)?;
    editor
        .import_grid_text(&text)
        .context("invalid pixelplate data")?;
    let grid = editor.grid();
    writeln!(stdout, "Imported {}x{} pixelplate", grid.width(), grid.height())?;
    Ok(())
}

pub fn png(
    editor: &Editor,
    out: Option<&Path>,
    scale: Option<u32>,
    pixelplate: Option<&str>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let path = out.unwrap_or_else(|| Path::new(constants::DEFAULT_PNG_FILE));
    let scale = scale.unwrap_or(editor.config().export_scale);
    if scale == 0 || scale > constants::MAX_EXPORT_SCALE {
        bail!("scale must be between 1 and {}", constants::MAX_EXPORT_SCALE);
    }

    let grid = match pixelplate {
        Some(name) => editor.pixelplate(name)?,
        None => editor.grid(),
    };
    raster::write_png(path, grid, scale)?;
    writeln!(
        stdout,
        "Wrote {} ({}x{})",
        path.display(),
        grid.width() as u32 * scale,
        grid.height() as u32 * scale
    )?;
    Ok(())
}

pub fn stats(editor: &Editor, pixelplate: Option<&str>, stdout: &mut dyn Write) -> Result<()> {
    let stats = match pixelplate {
        Some(name) => GridStats::collect(editor.pixelplate(name)?),
        None => editor.stats(),
    };
    write!(stdout, "{}", stats.report())?;
    Ok(())
}

pub fn resize(
    editor: &mut Editor,
    width: usize,
    height: Option<usize>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let height = height.unwrap_or(width);
    editor.resize(width, height)?;
    writeln!(stdout, "Grid is now {}x{}", width, height)?;
    Ok(())
}

/// Paints one cell. Coordinates are 1-based, matching the editor's labels.
pub fn paint(
    editor: &mut Editor,
    x: usize,
    y: usize,
    color: Option<&str>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let (width, height) = (editor.grid().width(), editor.grid().height());
    if x == 0 || y == 0 || x > width || y > height {
        bail!("cell {},{} is outside the {}x{} grid", x, y, width, height);
    }
    if let Some(color) = color {
        editor.select_color(Color::parse(color)?);
    }

    let color = editor.current_color();
    let changed = editor.paint_with(x - 1, y - 1, color)?;
    let verb = if changed { "Painted" } else { "Unchanged" };
    writeln!(stdout, "{} {},{} {}", verb, x, y, color)?;
    Ok(())
}

/// Default preview file for a pixelplate, kept inside the working directory.
fn preview_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if matches!(stem.as_str(), "" | "." | "..") {
        return "_-preview.png".to_string();
    }
    format!("{}-preview.png", stem)
}

pub fn gallery(editor: &mut Editor, command: GalleryCommand, stdout: &mut dyn Write) -> Result<()> {
    match command {
        GalleryCommand::List => {
            if editor.gallery().is_empty() {
                writeln!(stdout, "No pixelplates saved.")?;
            }
            for entry in editor.gallery().entries() {
                writeln!(
                    stdout,
                    "{}\t{}x{}",
                    entry.name,
                    entry.data.width(),
                    entry.data.height()
                )?;
            }
        }
        GalleryCommand::Save { name } => {
            editor.save_pixelplate(&name)?;
            writeln!(stdout, "Saved pixelplate \"{}\"", name.trim())?;
        }
        GalleryCommand::Load { name } => {
            editor.load_pixelplate(&name)?;
            writeln!(stdout, "Loaded pixelplate \"{}\"", name.trim())?;
        }
        GalleryCommand::Delete { name } => {
            let removed = editor.delete_pixelplate(&name)?;
            writeln!(stdout, "Deleted {} pixelplate(s) named \"{}\"", removed, name.trim())?;
        }
        GalleryCommand::Preview { name, out } => {
            let png = editor.preview_png(editor.pixelplate(&name)?)?;
            let path = out.unwrap_or_else(|| PathBuf::from(preview_file_name(&name)));
            file_utils::write_atomic(&path, &png)?;
            let size = editor.config().preview_size;
            writeln!(stdout, "Wrote {} ({}x{})", path.display(), size, size)?;
        }
    }
    Ok(())
}

pub fn palette(editor: &mut Editor, command: PaletteCommand, stdout: &mut dyn Write) -> Result<()> {
    match command {
        PaletteCommand::List => {
            let current = editor.current_color();
            for (i, f) in editor.palette().iter().enumerate() {
                let marker = if f.color == current { '*' } else { ' ' };
                let mut line = format!("{}{:>3}. {:<9} {}", marker, i + 1, f.color.to_hex(), f.name);
                if let Some(material) = &f.material {
                    line.push_str(&format!(" [{}]", material));
                }
                if let Some(notes) = &f.notes {
                    line.push_str(&format!(" ({})", notes));
                }
                writeln!(stdout, "{}", line)?;
            }
        }
        PaletteCommand::Add {
            name,
            color,
            material,
            notes,
        } => {
            let color = Color::parse(&color)?;
            let filament = Filament {
                material,
                notes,
                ..Filament::new(name.trim(), color)
            };
            if editor.add_filament(filament)? {
                writeln!(stdout, "Added {} ({})", name.trim(), color)?;
            } else {
                writeln!(stdout, "{} is already in the palette", color)?;
            }
        }
        PaletteCommand::Remove { color } => {
            let color = Color::parse(&color)?;
            match editor.remove_filament(color)? {
                Some(removed) => writeln!(stdout, "Removed {} ({})", removed.name, removed.color)?,
                None => bail!("no filament with color {}", color),
            }
        }
        PaletteCommand::Rename { color, name } => {
            let color = Color::parse(&color)?;
            if !editor.rename_filament(color, &name)? {
                bail!("no filament with color {}", color);
            }
            writeln!(stdout, "Renamed {} to {}", color, name.trim())?;
        }
        PaletteCommand::Import { file } => {
            let text = read_input(file.as_deref())?;
            editor
                .import_palette_text(&text)
                .context("invalid palette data")?;
            writeln!(stdout, "Imported {} filaments", editor.palette().len())?;
        }
        PaletteCommand::Export => writeln!(stdout, "{}", editor.export_palette_text())?,
        PaletteCommand::Reset => {
            editor.reset_palette()?;
            writeln!(stdout, "Palette reset to {} stock filaments", editor.palette().len())?;
        }
    }
    Ok(())
}

pub fn theme(editor: &mut Editor, choice: Option<ThemeChoice>, stdout: &mut dyn Write) -> Result<()> {
    let theme = match choice {
        None => editor.theme(),
        Some(ThemeChoice::Toggle) => editor.toggle_theme()?,
        Some(ThemeChoice::Light) => {
            editor.set_theme(Theme::Light)?;
            Theme::Light
        }
        Some(ThemeChoice::Dark) => {
            editor.set_theme(Theme::Dark)?;
            Theme::Dark
        }
    };
    writeln!(stdout, "{}", theme.name())?;
    Ok(())
}

pub fn config(editor: &Editor, stdout: &mut dyn Write) -> Result<()> {
    writeln!(stdout, "{}", serde_json::to_string_pretty(editor.config())?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn editor() -> Editor {
        Editor::open(Box::new(MemoryStore::new()), AppConfig::default()).unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_export_then_import_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.json");

        let mut source = editor();
        source.resize(3, 2).unwrap();
        source.paint(1, 1).unwrap();
        export(&source, Some(&path), &mut Vec::new()).unwrap();

        let mut target = editor();
        let mut out = Vec::new();
        import(&mut target, Some(&path), &mut out).unwrap();
        assert_eq!(target.grid(), source.grid());
        assert_eq!(output(out), "Imported 3x2 pixelplate\n");
    }

    #[test]
    fn test_import_rejects_bad_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.json");
        fs::write(&path, r##"[["#fff"], ["nope"]]"##).unwrap();

        let mut target = editor();
        let before = target.grid().clone();
        let err = import(&mut target, Some(&path), &mut Vec::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid pixelplate data"));
        assert_eq!(target.grid(), &before);
    }

    #[test]
    fn test_stats_report() {
        let mut ed = editor();
        ed.resize(2, 1).unwrap();
        let mut out = Vec::new();
        stats(&ed, None, &mut out).unwrap();
        assert_eq!(
            output(out),
            "Grid Size: 2 x 1\nTile Counts:\n#2b2b2b: 2 tiles\n"
        );
    }

    #[test]
    fn test_png_of_saved_pixelplate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.png");

        let mut ed = editor();
        ed.resize(2, 2).unwrap();
        ed.save_pixelplate("tiny").unwrap();
        ed.resize(4, 4).unwrap();

        let mut out = Vec::new();
        png(&ed, Some(&path), Some(3), Some("tiny"), &mut out).unwrap();
        assert!(output(out).ends_with("(6x6)\n"));

        let decoder = ::png::Decoder::new(fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (6, 6));

        assert!(png(&ed, Some(&path), Some(0), None, &mut Vec::new()).is_err());
        assert!(png(&ed, Some(&path), None, Some("missing"), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_gallery_commands() {
        let dir = tempdir().unwrap();
        let mut ed = editor();
        ed.paint(0, 0).unwrap();

        gallery(&mut ed, GalleryCommand::Save { name: " heart ".into() }, &mut Vec::new()).unwrap();
        ed.clear().unwrap();
        gallery(&mut ed, GalleryCommand::Load { name: "heart".into() }, &mut Vec::new()).unwrap();
        assert_eq!(ed.grid().get(0, 0), Some(ed.current_color()));

        let mut out = Vec::new();
        gallery(&mut ed, GalleryCommand::List, &mut out).unwrap();
        assert_eq!(output(out), "heart\t16x16\n");

        let preview = dir.path().join("heart.png");
        gallery(
            &mut ed,
            GalleryCommand::Preview {
                name: "heart".into(),
                out: Some(preview.clone()),
            },
            &mut Vec::new(),
        )
        .unwrap();
        assert!(preview.exists());

        gallery(&mut ed, GalleryCommand::Delete { name: "heart".into() }, &mut Vec::new()).unwrap();
        assert!(ed.gallery().is_empty());
        assert!(gallery(&mut ed, GalleryCommand::Delete { name: "heart".into() }, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_preview_file_name_stays_in_directory() {
        assert_eq!(preview_file_name(" heart "), "heart-preview.png");
        assert_eq!(preview_file_name("../x"), ".._x-preview.png");
        assert_eq!(preview_file_name("/etc/passwd"), "_etc_passwd-preview.png");
        assert_eq!(preview_file_name("a\\b:c"), "a_b_c-preview.png");
        assert_eq!(preview_file_name(".."), "_-preview.png");

        let name = preview_file_name("../../x");
        assert_eq!(PathBuf::from(&name).components().count(), 1);
    }

    #[test]
    fn test_palette_commands() {
        let mut ed = editor();
        let add = |name: &str, color: &str| PaletteCommand::Add {
            name: name.into(),
            color: color.into(),
            material: Some("PETG".into()),
            notes: None,
        };

        let mut out = Vec::new();
        palette(&mut ed, add("Orange", "#FF8800"), &mut out).unwrap();
        palette(&mut ed, add("Also Orange", "#ff8800"), &mut out).unwrap();
        assert_eq!(
            output(out),
            "Added Orange (#ff8800)\n#ff8800 is already in the palette\n"
        );
        assert_eq!(ed.palette().len(), 10);
        assert_eq!(ed.palette().get(9).unwrap().material.as_deref(), Some("PETG"));

        palette(&mut ed, PaletteCommand::Remove { color: "#ff8800".into() }, &mut Vec::new()).unwrap();
        assert_eq!(ed.palette().len(), 9);
        assert!(palette(&mut ed, PaletteCommand::Remove { color: "#ff8800".into() }, &mut Vec::new()).is_err());
        assert!(palette(&mut ed, add("Bad", "ff8800"), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_paint_and_rename() {
        let mut ed = editor();
        let mut out = Vec::new();
        paint(&mut ed, 1, 2, Some("#ABC"), &mut out).unwrap();
        paint(&mut ed, 1, 2, None, &mut out).unwrap();
        assert_eq!(output(out), "Painted 1,2 #aabbcc\nUnchanged 1,2 #aabbcc\n");
        assert_eq!(ed.grid().get(0, 1), Some(Color::parse("#aabbcc").unwrap()));
        assert!(paint(&mut ed, 0, 1, None, &mut Vec::new()).is_err());
        assert!(paint(&mut ed, 17, 1, None, &mut Vec::new()).is_err());

        let rename = PaletteCommand::Rename {
            color: "#CC3232".into(),
            name: " Signal Red ".into(),
        };
        palette(&mut ed, rename, &mut Vec::new()).unwrap();
        assert_eq!(ed.palette().get(0).unwrap().name, "Signal Red");
    }

    #[test]
    fn test_theme_command() {
        let mut ed = editor();
        let mut out = Vec::new();
        theme(&mut ed, None, &mut out).unwrap();
        theme(&mut ed, Some(ThemeChoice::Toggle), &mut out).unwrap();
        theme(&mut ed, Some(ThemeChoice::Dark), &mut out).unwrap();
        assert_eq!(output(out), "dark\nlight\ndark\n");
    }

    #[test]
    fn test_open_editor_persists_to_data_dir() {
        let dir = tempdir().unwrap();
        {
            let mut ed = open_editor(dir.path(), false).unwrap();
            ed.resize(5, 3).unwrap();
        }
        assert!(dir.path().join(constants::STORE_FILE).exists());
        assert!(dir.path().join(constants::CONFIG_FILE).exists());

        let ed = open_editor(dir.path(), false).unwrap();
        assert_eq!((ed.grid().width(), ed.grid().height()), (5, 3));

        let mut scratch = open_editor(dir.path(), true).unwrap();
        scratch.resize(2, 2).unwrap();
        let ed = open_editor(dir.path(), false).unwrap();
        assert_eq!(ed.grid().width(), 5);
    }
}
