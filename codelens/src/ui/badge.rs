//! Risk badge: the exact, total mapping from risk level to label and color.
//!
//! Every backend value has a defined style: the wire layer already folds
//! unrecognized strings into `RiskLevel::Unknown`, and this module maps all
//! five variants to a styled span. There is no fallible path.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use codelens_api::RiskLevel;

use crate::theme::Theme;

/// Builds the badge span for a risk level, e.g. `[ Low ]` in green.
pub fn badge_span(level: RiskLevel, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!("[ {} ]", level.label()),
        Style::default()
            .fg(theme.badge_color(level))
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_label_and_color() {
        let theme = Theme::dark();
        for level in [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
            RiskLevel::Unknown,
        ] {
            let span = badge_span(level, &theme);
            assert!(span.content.contains(level.label()));
            assert!(span.style.fg.is_some());
        }
    }

    #[test]
    fn unrecognized_wire_values_get_the_unknown_style() {
        let theme = Theme::dark();
        // The wire layer normalizes anything unrecognized to Unknown.
        let level: RiskLevel = serde_json::from_str("\"Catastrophic\"").unwrap();
        assert_eq!(level, RiskLevel::Unknown);
        let span = badge_span(level, &theme);
        assert_eq!(span.style.fg, Some(theme.badge_unknown));
        assert!(span.content.contains("Unknown"));
    }
}
