use crate::core::color::Color;

/// Upper half block: foreground paints the top pixel, background the bottom.
pub const HALF_BLOCK: char = '▀';

/// One terminal character cell in a half-block preview.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CellData {
    pub char: char,
    pub fg: (u8, u8, u8),
    pub bg: (u8, u8, u8),
}

impl CellData {
    pub fn half_block(top: Color, bottom: Color) -> Self {
        Self {
            char: HALF_BLOCK,
            fg: rgb(top),
            bg: rgb(bottom),
        }
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: (0, 0, 0),
            bg: (0, 0, 0),
        }
    }
}

/// Terminal cells have no alpha, so translucent colors are shown opaque.
fn rgb(color: Color) -> (u8, u8, u8) {
    (color.r, color.g, color.b)
}
