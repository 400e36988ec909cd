//! Help overlay renderer.
//!
//! Draws a centred modal box over the tab layout using ratatui's `Clear`
//! widget to erase the background first. The overlay is rendered inside the
//! same `terminal.draw()` closure as everything else — `Clear` before the
//! bordered `Paragraph` achieves the modal effect without a second draw call.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal.
///
/// Skipped entirely below 60 columns to avoid a zero-height `Rect`.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Tabs"),
        Line::from("  Tab           Next tab"),
        Line::from("  1 / 2 / 3 / 4 Analyze / Compare / Autofix / Chat"),
        Line::from(""),
        Line::from("Editing"),
        Line::from("  i             Insert mode (edits the active tab's text)"),
        Line::from("  Esc           Back to normal mode"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  a             Analyze the code buffer"),
        Line::from("  c             Compare the buffer against Version B"),
        Line::from("  f             Request an automated fix"),
        Line::from("  Enter         Send the chat message (in insert mode)"),
        Line::from("  o             Extract code from an image (prompts for a path)"),
        Line::from("  v             Start / stop voice capture"),
        Line::from("  s             Send the voice transcript to chat"),
        Line::from(""),
        Line::from("Scrolling"),
        Line::from("  j / k         Scroll the results pane (or this overlay)"),
        Line::from("  mouse wheel   Same"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this overlay"),
        Line::from("  q             Quit"),
    ])
}
