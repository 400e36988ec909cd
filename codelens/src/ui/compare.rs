//! Compare tab: the second-snippet editor next to the diff, summary, and
//! per-version metrics produced by the backend.
//!
//! Version A is always the canonical code buffer; the panel owns only
//! version B and its own request lifecycle, so transport failures here stay
//! inline and never block the dashboard.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use codelens_api::CompareReport;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::charts::render_comparison_bars;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let [left, right] = area.layout(
        &Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .spacing(Spacing::Overlap(1)),
    );

    render_other_editor(frame, left, state);

    let [diff_area, bars_area] = right.layout(
        &Layout::vertical([Constraint::Fill(1), Constraint::Length(10)])
            .spacing(Spacing::Overlap(1)),
    );

    render_report(frame, diff_area, state);
    render_comparison_bars(
        frame,
        bars_area,
        state
            .compare
            .report
            .as_ref()
            .and_then(|r| r.metrics_comparison.as_ref()),
        &state.theme,
    );
}

/// Renders the version B editor. Insert mode on this tab edits this buffer.
fn render_other_editor(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let focused = state.mode == Mode::Insert;
    let inner = inner_rect(area);
    let (cursor_row, cursor_col) = state.compare.other.cursor();
    let scroll = (cursor_row as u16).saturating_sub(inner.height.saturating_sub(1));

    let lines: Vec<Line> = if state.compare.other.is_blank() && !focused {
        vec![Line::from(Span::styled(
            "press i to paste the modified version, then c to compare",
            Style::default().fg(theme.dim),
        ))]
    } else {
        state
            .compare
            .other
            .lines()
            .iter()
            .map(|l| Line::from(l.clone()))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(" Version B ", focused, theme))
            .scroll((scroll, 0)),
        area,
    );

    if focused && inner.width > 0 {
        let x = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
        let y = inner.y
            + (cursor_row as u16)
                .saturating_sub(scroll)
                .min(inner.height.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

fn render_report(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let block = panel_block(" Comparison ", false, theme);

    if let Some(error) = &state.compare.error {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("compare failed: {error}"),
                    Style::default().fg(theme.error),
                )),
                Line::from(Span::styled(
                    "press c to retry",
                    Style::default().fg(theme.dim),
                )),
            ])
            .block(block)
            .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let Some(report) = &state.compare.report else {
        let hint = if state.compare.comparing {
            "comparing…"
        } else {
            "c compares the code buffer (A) against Version B"
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(theme.dim)).block(block),
            area,
        );
        return;
    };

    frame.render_widget(
        Paragraph::new(report_lines(report, theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.compare.scroll, 0)),
        area,
    );
}

/// Builds the diff and summary lines for a compare report.
fn report_lines<'a>(report: &'a CompareReport, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if let Some(kind) = &report.error {
        let detail = report.message.as_deref().unwrap_or("");
        lines.push(Line::from(Span::styled(
            format!("{kind}: {detail}"),
            Style::default().fg(theme.error),
        )));
        lines.push(Line::from(""));
    }

    if let Some(summary) = &report.summary {
        lines.push(Line::from(Span::styled(
            summary.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(score) = report.risk_score {
        lines.push(Line::from(format!("change risk score: {score:.1}")));
    }
    lines.push(Line::from(""));

    for added in &report.diff.added {
        lines.push(Line::from(Span::styled(
            format!("+ {added}"),
            Style::default().fg(theme.diff_added),
        )));
    }
    for removed in &report.diff.removed {
        lines.push(Line::from(Span::styled(
            format!("- {removed}"),
            Style::default().fg(theme.diff_removed),
        )));
    }
    for changed in &report.diff.changed {
        lines.push(Line::from(Span::styled(
            format!("~ {changed}"),
            Style::default().fg(theme.diff_changed),
        )));
    }

    if report.diff.added.is_empty()
        && report.diff.removed.is_empty()
        && report.diff.changed.is_empty()
    {
        lines.push(Line::from(Span::styled(
            "no line differences",
            Style::default().fg(theme.dim),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelens_api::CodeDiff;

    fn report() -> CompareReport {
        CompareReport {
            diff: CodeDiff {
                added: vec!["let x = 2;".to_owned()],
                removed: vec!["let x = 1;".to_owned()],
                changed: vec![],
            },
            risk_score: Some(3.5),
            summary: Some("1 line changed".to_owned()),
            metrics_comparison: None,
            error: None,
            message: None,
        }
    }

    #[test]
    fn diff_lines_carry_their_markers() {
        let theme = Theme::dark();
        let report = report();
        let lines = report_lines(&report, &theme);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(rendered.iter().any(|l| l == "+ let x = 2;"));
        assert!(rendered.iter().any(|l| l == "- let x = 1;"));
        assert!(rendered.iter().any(|l| l.contains("1 line changed")));
        assert!(rendered.iter().any(|l| l.contains("3.5")));
    }

    #[test]
    fn empty_diff_states_so_instead_of_rendering_nothing() {
        let theme = Theme::dark();
        let empty = CompareReport {
            diff: CodeDiff::default(),
            risk_score: None,
            summary: None,
            metrics_comparison: None,
            error: None,
            message: None,
        };
        let lines = report_lines(&empty, &theme);
        assert!(lines.iter().any(|l| l.to_string().contains("no line differences")));
    }

    #[test]
    fn payload_error_is_shown_above_the_diff() {
        let theme = Theme::dark();
        let mut r = report();
        r.error = Some("SyntaxError".to_owned());
        r.message = Some("version B does not parse".to_owned());
        let lines = report_lines(&r, &theme);
        assert!(lines[0].to_string().contains("SyntaxError"));
    }
}
