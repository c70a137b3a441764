use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3, 4, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// Rejected import of pasted or stored text.
///
/// Whatever produced this error has left the previous state untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid is {width}x{height}, the limit is {max}x{max}")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("cell at row {row}, column {col}: {source}")]
    Cell {
        row: usize,
        col: usize,
        #[source]
        source: ColorError,
    },
    #[error("filament {index} ({name:?}): {source}")]
    Filament {
        index: usize,
        name: String,
        #[source]
        source: ColorError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("pixelplate name cannot be empty")]
    EmptyName,
    #[error("no pixelplate named {0:?}")]
    NotFound(String),
}
