use serde::{Deserialize, Serialize};

use super::color::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors a theme resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub cell_border: Color,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                background: Color::rgb(0x17, 0x17, 0x17),
                text: Color::rgb(0xf3, 0xf4, 0xf6),
                muted: Color::rgb(0x9c, 0xa3, 0xaf),
                accent: Color::rgb(0xd8, 0xb4, 0xfe),
                cell_border: Color::rgb(0x40, 0x40, 0x40),
            },
            Theme::Light => ThemeColors {
                background: Color::rgb(0xf5, 0xf5, 0xf4),
                text: Color::rgb(0x11, 0x18, 0x27),
                muted: Color::rgb(0x6b, 0x72, 0x80),
                accent: Color::rgb(0x7e, 0x22, 0xce),
                cell_border: Color::rgb(0xd1, 0xd5, 0xdb),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_parse() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::parse("\"LIGHT\""), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
