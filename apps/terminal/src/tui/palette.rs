use flipcards_core::Theme;
use ratatui::style::Color;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub question: Color,
    pub answer: Color,
    pub known: Color,
    pub unknown: Color,
    pub status_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                question: Color::Blue,
                answer: Color::Green,
                known: Color::Green,
                unknown: Color::Red,
                status_bg: Color::Gray,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::LightBlue,
                question: Color::LightBlue,
                answer: Color::LightGreen,
                known: Color::LightGreen,
                unknown: Color::LightRed,
                status_bg: Color::DarkGray,
            },
        }
    }
}
