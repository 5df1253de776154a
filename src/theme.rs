use clap::ValueEnum;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours used by the UI for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub correct: Color,
    pub incorrect: Color,
}

impl Theme {
    /// Parse a stored theme name. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Label for the header button, naming the theme a toggle switches to
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "☀ Light",
            Self::Light => "☾ Dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Color::Rgb(15, 23, 42),
                text: Color::Rgb(226, 232, 240),
                muted: Color::Rgb(100, 116, 139),
                primary: Color::Rgb(56, 189, 248),
                correct: Color::Rgb(74, 222, 128),
                incorrect: Color::Rgb(248, 113, 113),
            },
            Self::Light => Palette {
                background: Color::Rgb(248, 250, 252),
                text: Color::Rgb(15, 23, 42),
                muted: Color::Rgb(148, 163, 184),
                primary: Color::Rgb(2, 132, 199),
                correct: Color::Rgb(22, 163, 74),
                incorrect: Color::Rgb(220, 38, 38),
            },
        }
    }
}
