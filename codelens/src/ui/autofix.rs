//! Autofix tab: the suggested snippet next to the list of explained changes.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use codelens_api::AutofixReport;

use crate::app::AppState;
use crate::highlight::highlight_code;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;

    let Some(report) = &state.autofix else {
        let hint = if state.autofixing {
            "requesting a fix…"
        } else if state.code.is_blank() {
            "paste code on the Analyze tab first"
        } else {
            "press f to request an automated fix"
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(theme.dim))
                .block(panel_block(" Autofix ", false, theme)),
            area,
        );
        return;
    };

    let [code_area, changes_area] = area.layout(
        &Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .spacing(Spacing::Overlap(1)),
    );

    let fixed = highlight_code(&report.fixed_code, state.language.as_deref());
    frame.render_widget(
        Paragraph::new(fixed)
            .block(panel_block(" Fixed code ", false, theme))
            .scroll((state.results_scroll, 0)),
        code_area,
    );

    frame.render_widget(
        Paragraph::new(change_lines(report, theme))
            .block(panel_block(" Changes ", false, theme))
            .wrap(Wrap { trim: false }),
        changes_area,
    );
}

/// Builds the diff-summary and change-explanation lines.
fn change_lines<'a>(report: &'a AutofixReport, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for entry in &report.diff_summary {
        let style = if entry.starts_with('+') {
            Style::default().fg(theme.diff_added)
        } else if entry.starts_with('-') {
            Style::default().fg(theme.diff_removed)
        } else {
            Style::default().fg(theme.diff_changed)
        };
        lines.push(Line::from(Span::styled(entry.as_str(), style)));
    }
    if !report.diff_summary.is_empty() {
        lines.push(Line::from(""));
    }

    for change in &report.changes {
        lines.push(Line::from(Span::styled(
            change.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", change.description)));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "no changes were suggested",
            Style::default().fg(theme.dim),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelens_api::AutofixChange;

    #[test]
    fn change_entries_pair_title_with_description() {
        let theme = Theme::dark();
        let report = AutofixReport {
            fixed_code: "fn main() {}".to_owned(),
            diff_summary: vec!["+ added a docstring".to_owned()],
            changes: vec![AutofixChange {
                title: "Add documentation".to_owned(),
                description: "The public entry point had no docs.".to_owned(),
            }],
        };

        let lines = change_lines(&report, &theme);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(rendered.iter().any(|l| l.contains("added a docstring")));
        assert!(rendered.iter().any(|l| l == "Add documentation"));
        assert!(rendered.iter().any(|l| l.contains("no docs")));
    }

    #[test]
    fn empty_report_renders_a_placeholder_line() {
        let theme = Theme::dark();
        let report = AutofixReport {
            fixed_code: String::new(),
            diff_summary: vec![],
            changes: vec![],
        };
        let lines = change_lines(&report, &theme);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].to_string().contains("no changes"));
    }
}
