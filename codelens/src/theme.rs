//! Color theme system for codelens.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface codelens renders. Two built-in themes are provided:
//!
//! - `dark` — uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

use codelens_api::RiskLevel;

/// All color values used across codelens's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field` directly
/// inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Diff lists (compare panel)
    /// Added lines (`+`).
    pub diff_added: Color,
    /// Removed lines (`-`).
    pub diff_removed: Color,
    /// Changed lines (`~`).
    pub diff_changed: Color,

    // Risk badges
    /// Badge color for the Low level.
    pub badge_low: Color,
    /// Badge color for the Medium level.
    pub badge_medium: Color,
    /// Badge color for the High level.
    pub badge_high: Color,
    /// Badge color for the Critical level.
    pub badge_critical: Color,
    /// Badge color for Unknown / unrecognized levels.
    pub badge_unknown: Color,

    // Charts
    /// Filled portion of the maintainability gauge.
    pub gauge_fill: Color,
    /// Trend sparkline bars.
    pub trend: Color,
    /// Version A bars in the comparison chart.
    pub bars_a: Color,
    /// Version B bars in the comparison chart.
    pub bars_b: Color,

    // Chat
    /// "you:" prefix in the transcript.
    pub chat_user: Color,
    /// "ai:" prefix in the transcript.
    pub chat_assistant: Color,

    // Inline errors and faults
    /// Inline error text (compare / OCR / voice) and fault headers.
    pub error: Color,
    /// Secondary/dimmed text: placeholders, hints, progress notes.
    pub dim: Color,

    // Tab bar
    /// The selected tab label.
    pub tab_active: Color,
    /// Selectable but unselected tab labels.
    pub tab_inactive: Color,
    /// Tabs gated off while an analysis fault is active.
    pub tab_disabled: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT / PROMPT mode.
    pub status_mode_insert: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when no config is present or color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_changed: Color::Yellow,

            badge_low: Color::Green,
            badge_medium: Color::Yellow,
            badge_high: Color::LightRed,
            badge_critical: Color::Red,
            badge_unknown: Color::DarkGray,

            gauge_fill: Color::Cyan,
            trend: Color::Magenta,
            bars_a: Color::Blue,
            bars_b: Color::Cyan,

            chat_user: Color::Cyan,
            chat_assistant: Color::Green,

            error: Color::Red,
            dim: Color::DarkGray,

            tab_active: Color::Cyan,
            tab_inactive: Color::White,
            tab_disabled: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal. Colors degrade to the nearest ANSI
    /// 256-color approximation on non-truecolor terminals; use `dark()` over
    /// SSH when fidelity matters.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_changed: yellow,

            badge_low: green,
            badge_medium: yellow,
            badge_high: peach,
            badge_critical: red,
            badge_unknown: overlay1,

            gauge_fill: teal,
            trend: mauve,
            bars_a: blue,
            bars_b: teal,

            chat_user: blue,
            chat_assistant: green,

            error: red,
            dim: overlay1,

            tab_active: lavender,
            tab_inactive: text,
            tab_disabled: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,

            background: base,
        }
    }

    /// Badge color for a risk level. Total over the enum, including Unknown.
    pub fn badge_color(&self, level: RiskLevel) -> Color {
        match level {
            RiskLevel::Low => self.badge_low,
            RiskLevel::Medium => self.badge_medium,
            RiskLevel::High => self.badge_high,
            RiskLevel::Critical => self.badge_critical,
            RiskLevel::Unknown => self.badge_unknown,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged to stderr (not a hard error).
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!(
                    "codelens: unknown theme '{}', falling back to 'dark'",
                    other
                );
                Self::dark()
            }
        }
    }
}
