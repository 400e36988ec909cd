//! Blocking alert modal for whole-dashboard failures.
//!
//! Rendered last in the draw pass so it sits above every panel. While an
//! alert is visible the key dispatcher swallows everything except the
//! dismiss keys, making it genuinely blocking.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

pub fn render_alert(frame: &mut Frame, theme: &Theme, message: &str) {
    let area = frame
        .area()
        .centered(Constraint::Percentage(60), Constraint::Length(7));

    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Error ")
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.error));

    let lines = vec![
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from(Span::styled(
            "press Enter or Esc to dismiss",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
