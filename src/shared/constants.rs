pub const APP_NAME: &str = "Pixelfinity";
pub const APP_DIR_NAME: &str = "pixelfinity";

pub const CONFIG_FILE: &str = "pixelfinity.config";
pub const STORE_FILE: &str = "store.json";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

// Store keys
pub const PALETTE_KEY: &str = "pixelfinity-palette";
pub const GALLERY_KEY: &str = "pixelfinity-gallery";
pub const GRID_SIZE_KEY: &str = "pixelfinity-grid-size";
pub const CANVAS_KEY: &str = "pixelfinity-canvas";
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_GRID_SIZE: usize = 16;
pub const MAX_GRID_DIMENSION: usize = 128;
pub const DEFAULT_COLOR: &str = "#2b2b2b";

pub const DEFAULT_EXPORT_SCALE: u32 = 16;
pub const MAX_EXPORT_SCALE: u32 = 256;
pub const DEFAULT_PREVIEW_SIZE: u32 = 128;
pub const DEFAULT_PNG_FILE: &str = "pixelplate.png";

/// (name, color) pairs for the stock filament spools.
pub const DEFAULT_FILAMENTS: &[(&str, &str)] = &[
    ("Red PLA", "#cc3232"),
    ("Light Green PLA", "#a4cb88"),
    ("Green PLA", "#57d188"),
    ("Purple PLA", "#800080"),
    ("Grey PLA", "#868489"),
    ("Light Blue PLA", "#8abed4"),
    ("Dark Blue PLA", "#1e255c"),
    ("White PLA", "#ffffff"),
    ("Black PLA", "#000000"),
];

pub const EDITOR_KEY_HINTS: &str =
    "[←↑↓→/hjkl] move [Space] paint [1-9,[ ]] color [o] gallery [s] stats [e/i] export/import [p] png [r] resize [f] palette [g] grid [t] theme [c] clear [q] quit";
