mod core;
mod renderer;
mod shared;
mod store;
mod ui;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use crate::core::launcher::{self, GalleryCommand, PaletteCommand, ThemeChoice};
use crate::utils::{file_utils, logger};

#[derive(Parser)]
#[command(author, version, about = "Pixel art editor for filament-color pixelplates", long_about = None)]
struct Cli {
    /// Directory holding store.json, pixelfinity.config and the logs
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Keep this session in memory only
    #[arg(long, global = true, default_value_t = false)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal editor (default)
    Edit,
    /// Print the current grid as JSON, or write it to a file
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Replace the current grid with JSON from a file or stdin
    Import {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Render the grid (or a saved pixelplate) to PNG
    Png {
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(short, long)]
        scale: Option<u32>,
        #[arg(short, long)]
        pixelplate: Option<String>,
    },
    /// Show grid size and tile counts per color
    Stats {
        #[arg(short, long)]
        pixelplate: Option<String>,
    },
    /// Paint one cell (1-based) with COLOR or the first filament
    Paint {
        x: usize,
        y: usize,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Start a new grid of WIDTH x HEIGHT (square when HEIGHT is omitted)
    Resize { width: usize, height: Option<usize> },
    /// Manage saved pixelplates
    #[command(subcommand)]
    Gallery(GalleryCommand),
    /// Manage filament colors
    #[command(subcommand)]
    Palette(PaletteCommand),
    /// Show or change the theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Only the editor takes over the terminal; the rest write plain text to stdout.
    fn uses_terminal(&self) -> bool {
        matches!(self, Commands::Edit)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = file_utils::app_data_dir(cli.store.as_deref());

    logger::init(&data_dir);

    let command = cli.command.unwrap_or(Commands::Edit);
    if command.uses_terminal() {
        // Leftover raw mode from a crashed session.
        crate::ui::restore_terminal_best_effort();
    }

    let mut editor = launcher::open_editor(&data_dir, cli.ephemeral)?;
    let mut stdout = io::stdout();

    let result = match command {
        Commands::Edit => crate::ui::run_editor(editor),
        Commands::Export { out } => launcher::export(&editor, out.as_deref(), &mut stdout),
        Commands::Import { input } => launcher::import(&mut editor, input.as_deref(), &mut stdout),
        Commands::Png {
            out,
            scale,
            pixelplate,
        } => launcher::png(
            &editor,
            out.as_deref(),
            scale,
            pixelplate.as_deref(),
            &mut stdout,
        ),
        Commands::Stats { pixelplate } => {
            launcher::stats(&editor, pixelplate.as_deref(), &mut stdout)
        }
        Commands::Paint { x, y, color } => {
            launcher::paint(&mut editor, x, y, color.as_deref(), &mut stdout)
        }
        Commands::Resize { width, height } => {
            launcher::resize(&mut editor, width, height, &mut stdout)
        }
        Commands::Gallery(command) => launcher::gallery(&mut editor, command, &mut stdout),
        Commands::Palette(command) => launcher::palette(&mut editor, command, &mut stdout),
        Commands::Theme { choice } => launcher::theme(&mut editor, choice, &mut stdout),
        Commands::Config => launcher::config(&editor, &mut stdout),
    };

    if let Err(err) = &result {
        logger::error(&format!("{:#}", err));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_for(args: &[&str]) -> Commands {
        let mut argv = vec!["pixelfinity"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
            .unwrap()
            .command
            .unwrap_or(Commands::Edit)
    }

    #[test]
    fn test_only_editor_touches_terminal() {
        assert!(command_for(&[]).uses_terminal());
        assert!(command_for(&["edit"]).uses_terminal());
        assert!(!command_for(&["export"]).uses_terminal());
        assert!(!command_for(&["stats"]).uses_terminal());
        assert!(!command_for(&["--ephemeral", "paint", "1", "1"]).uses_terminal());
        assert!(!command_for(&["gallery", "list"]).uses_terminal());
        assert!(!command_for(&["theme", "dark"]).uses_terminal());
    }
}
