pub mod color;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod grid;
pub mod launcher;
pub mod palette;
pub mod stats;
pub mod theme;
