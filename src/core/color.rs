use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::ColorError;

/// An RGBA color parsed from hex notation.
///
/// Two colors are equal when their canonical text is equal, which makes
/// `#FFF` and `#ffffff` the same color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Err(ColorError::MissingHash(input.to_string()));
        };

        let digits = hex
            .bytes()
            .map(hex_val)
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| ColorError::BadDigit(input.to_string()))?;

        let color = match digits.as_slice() {
            [r, g, b] => Self::rgb(expand_nibble(*r), expand_nibble(*g), expand_nibble(*b)),
            [r, g, b, a] => Self {
                r: expand_nibble(*r),
                g: expand_nibble(*g),
                b: expand_nibble(*b),
                a: expand_nibble(*a),
            },
            [r1, r2, g1, g2, b1, b2] => Self::rgb(byte(*r1, *r2), byte(*g1, *g2), byte(*b1, *b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Self {
                r: byte(*r1, *r2),
                g: byte(*g1, *g2),
                b: byte(*b1, *b2),
                a: byte(*a1, *a2),
            },
            _ => return Err(ColorError::BadLength(input.to_string())),
        };

        Ok(color)
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Canonical lowercase form: `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Perceived brightness 0..=255, used to pick readable label colors.
    pub fn luma(&self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
    }
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn byte(hi: u8, lo: u8) -> u8 {
    (hi << 4) | lo
}

fn expand_nibble(n: u8) -> u8 {
    byte(n, n)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse("#CC3232").unwrap(), Color::rgb(0xcc, 0x32, 0x32));
        assert_eq!(Color::parse("  #2b2b2b ").unwrap().to_hex(), "#2b2b2b");

        let translucent = Color::parse("#11223380").unwrap();
        assert_eq!(translucent.rgba(), [0x11, 0x22, 0x33, 0x80]);
        assert_eq!(translucent.to_hex(), "#11223380");
        assert_eq!(Color::parse("#000f").unwrap().to_hex(), "#000000");
    }

    #[test]
    fn test_equality_ignores_case() {
        assert_eq!(Color::parse("#A4CB88").unwrap(), Color::parse("#a4cb88").unwrap());
        assert_eq!(Color::parse("#FFF").unwrap(), Color::parse("#ffffff").unwrap());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(Color::parse("cc3232"), Err(ColorError::MissingHash(_))));
        assert!(matches!(Color::parse("#12345"), Err(ColorError::BadLength(_))));
        assert!(matches!(Color::parse("#zzzzzz"), Err(ColorError::BadDigit(_))));
        assert!(matches!(Color::parse("#"), Err(ColorError::BadLength(_))));
    }

    #[test]
    fn test_serde_uses_canonical_text() {
        let color: Color = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#aabbcc\"");
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
