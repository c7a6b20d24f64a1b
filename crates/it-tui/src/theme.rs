//! Terminal color theme system
//!
//! Provides palettes for dark and light terminal backgrounds.
//! Auto-detects via COLORFGBG env var, or manual override with --light flag
//! or INITRACK_LIGHT_BG=1 environment variable.

use ratatui::style::Color;

/// Color theme for terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    // General UI text
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, key hints)
    pub text_dim: Color,
    /// Muted text (empty states, placeholder)
    pub text_muted: Color,

    // Borders
    pub border: Color,
    /// Informational border (help)
    pub border_accent: Color,
    /// Input border (intake form, condition prompt)
    pub border_action: Color,

    // Interactive elements
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    /// Entry picked up for reordering
    pub grabbed: Color,

    // Semantic colors
    pub accent: Color,
    pub header: Color,
    /// Combatant whose turn it is
    pub active: Color,
    /// Adversary owner label
    pub adversary: Color,
    pub condition_fg: Color,
    pub condition_bg: Color,
    /// Finished rounds on the timeline
    pub timeline_past: Color,
    /// Current round on the timeline
    pub timeline_current: Color,
    pub bad: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            text_muted: Color::Gray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_action: Color::Yellow,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            grabbed: Color::Magenta,
            accent: Color::Cyan,
            header: Color::Yellow,
            active: Color::Green,
            adversary: Color::Red,
            condition_fg: Color::Black,
            condition_bg: Color::Yellow,
            timeline_past: Color::Gray,
            timeline_current: Color::Green,
            bad: Color::Red,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            text_muted: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_action: Color::Yellow,
            cursor_fg: Color::Black,
            cursor_bg: Color::Gray,
            grabbed: Color::Magenta,
            accent: Color::Blue,
            header: Color::Blue,
            active: Color::Green,
            adversary: Color::Red,
            condition_fg: Color::Black,
            condition_bg: Color::LightYellow,
            timeline_past: Color::DarkGray,
            timeline_current: Color::Green,
            bad: Color::Red,
        }
    }

    /// Auto-detect terminal background and return appropriate theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("INITRACK_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices; light backgrounds use 7 or 9-15
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
            .is_some_and(|bg| matches!(bg, 7 | 9..=15))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
