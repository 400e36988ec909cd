//! Syntect-based code highlighting for the editor and autofix panels.
//!
//! Converts buffer text into owned `ratatui::text::Line<'static>` values so
//! highlighted lines can be cached in `AppState` and re-rendered every frame
//! without re-running syntect. Callers invalidate the cache via the buffer's
//! revision counter.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Rebuilds color and modifier fields from syntect types into ratatui types;
/// alpha 0 means "no color set" in syntect's theme model.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::Color as SC;
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Highlights every line of `text` for the language hinted by `token`.
///
/// `token` may be a file extension (`"py"`) or a language name detected by
/// the backend (`"python"`); both lookups are tried. Falls back to unstyled
/// spans when no syntax matches or the theme set is empty.
pub fn highlight_code(text: &str, token: Option<&str>) -> Vec<Line<'static>> {
    let syntax = token
        .and_then(|t| {
            PS.find_syntax_by_extension(t).or_else(|| PS.find_syntax_by_token(t))
        })
        .unwrap_or_else(|| PS.find_syntax_plain_text());

    let Some(theme) = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next())
    else {
        return text.split('\n').map(|l| Line::raw(l.to_owned())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    text.split('\n')
        .map(|code| {
            let ranges = h.highlight_line(code, &PS).unwrap_or_default();
            let spans: Vec<Span<'static>> =
                ranges.into_iter().map(|(style, chunk)| syntect_to_span(style, chunk)).collect();
            if spans.is_empty() {
                Line::raw(code.to_owned())
            } else {
                Line::from(spans)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_count_matches_input() {
        let lines = highlight_code("def f():\n    pass", Some("py"));
        assert_eq!(lines.len(), 2);
        let lines = highlight_code("", Some("py"));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn unknown_token_falls_back_to_plain_text() {
        let lines = highlight_code("anything at all", Some("no-such-language"));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn language_name_token_resolves() {
        // Backend reports names like "python", not extensions.
        let lines = highlight_code("x = 1", Some("python"));
        assert_eq!(lines.len(), 1);
    }
}
