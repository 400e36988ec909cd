//! Analyze tab: code editor on the left, analysis results and charts on the
//! right, with the image-extraction prompt and progress docked under the
//! editor.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, Mode};
use crate::ui::badge::badge_span;
use crate::ui::charts::{render_maintainability_gauge, render_trend};
use crate::ui::layout::{inner_rect, panel_block};

pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let [left, right] = area.layout(
        &Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(Spacing::Overlap(1)),
    );

    let [editor_area, extract_area] =
        left.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]));

    render_editor(frame, editor_area, state);
    render_extract_bar(frame, extract_area, state);
    render_results(frame, right, state);
}

/// Renders the code buffer with syntax highlighting and, in Insert mode, the
/// hardware cursor at the edit position.
fn render_editor(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let focused = state.mode == Mode::Insert;
    let title = match &state.language {
        Some(lang) => format!(" Code ({lang}) "),
        None => " Code ".to_owned(),
    };

    let inner = inner_rect(area);
    let (cursor_row, cursor_col) = state.code.cursor();

    // Keep the cursor's line inside the viewport.
    let scroll = (cursor_row as u16).saturating_sub(inner.height.saturating_sub(1));

    let theme = state.theme.clone();
    let lines: Vec<Line> = state.highlighted_code().to_vec();
    let body: Text = if state.code.is_blank() && !focused {
        Text::from(Line::from(Span::styled(
            "press i to type code, o to extract from an image",
            Style::default().fg(theme.dim),
        )))
    } else {
        Text::from(lines)
    };

    frame.render_widget(
        Paragraph::new(body)
            .block(panel_block(&title, focused, &theme))
            .scroll((scroll, 0)),
        area,
    );

    if focused && inner.width > 0 {
        let x = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (cursor_row as u16).saturating_sub(scroll).min(inner.height.saturating_sub(1));
        frame.set_cursor_position((x, y));
    }
}

/// Renders the extraction strip: prompt, progress, inline error, or hint.
fn render_extract_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let extract = &state.extract;
    let prompting = state.mode == Mode::Prompt;

    let line = if let Some(reason) = &extract.unavailable {
        Line::from(Span::styled(
            format!("extraction unavailable: {reason}"),
            Style::default().fg(theme.dim),
        ))
    } else if prompting {
        Line::from(vec![
            Span::styled("image path: ", Style::default().fg(theme.dim)),
            Span::raw(extract.path_input.text()),
            Span::styled("▏", Style::default().fg(theme.border_active)),
        ])
    } else if extract.in_progress {
        Line::from(Span::styled(
            format!("extracting… {}%", extract.progress),
            Style::default().fg(theme.status_mode_insert),
        ))
    } else if let Some(error) = &extract.error {
        Line::from(Span::styled(
            format!("extraction failed: {error}"),
            Style::default().fg(theme.error),
        ))
    } else {
        Line::from(Span::styled(
            "o: extract code from an image",
            Style::default().fg(theme.dim),
        ))
    };

    frame.render_widget(
        Paragraph::new(line).block(panel_block(" Extract ", prompting, theme)),
        area,
    );
}

/// Renders the right column: the report (or fault) plus the two charts.
fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let [report_area, gauge_area, trend_area] = area.layout(
        &Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .spacing(Spacing::Overlap(1)),
    );

    let theme = &state.theme;

    if let Some(fault) = &state.fault {
        let lines = vec![
            Line::from(Span::styled(
                fault.kind.clone(),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(fault.message.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "fix the snippet and analyze again; other tabs are locked until it passes",
                Style::default().fg(theme.dim),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(panel_block(" Analysis ", false, theme))
                .wrap(Wrap { trim: false }),
            report_area,
        );
    } else if let Some(report) = &state.analysis {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("risk ", Style::default().fg(theme.dim)),
                badge_span(report.risk_level, theme),
                Span::raw(format!("  score {}", report.risk_score)),
            ]),
            Line::from(format!("big-O: {}", report.big_o)),
            Line::from(format!("cyclomatic complexity: {}", report.cyclomatic_complexity)),
        ];
        if let (Some(lang), Some(conf)) = (&report.language_detected, report.detection_confidence)
        {
            lines.push(Line::from(Span::styled(
                format!("detected {lang} ({:.0}% confidence)", conf * 100.0),
                Style::default().fg(theme.dim),
            )));
        }
        if report.was_corrected {
            lines.push(Line::from(Span::styled(
                "the snippet was auto-corrected before analysis",
                Style::default().fg(theme.diff_changed),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "security",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(report.security_summary.clone()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "summary",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(report.ai_summary.clone()));

        frame.render_widget(
            Paragraph::new(lines)
                .block(panel_block(" Analysis ", false, theme))
                .wrap(Wrap { trim: false })
                .scroll((state.results_scroll, 0)),
            report_area,
        );
    } else {
        let hint = if state.analyzing {
            "analyzing…"
        } else {
            "press a to analyze the snippet"
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(theme.dim))
                .block(panel_block(" Analysis ", false, theme)),
            report_area,
        );
    }

    render_maintainability_gauge(frame, gauge_area, state.analysis.as_ref(), theme);
    render_trend(frame, trend_area, state.analysis.as_ref(), theme);
}
