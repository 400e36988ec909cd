//! Chat tab: the transcript, the typed-input line, and the voice bar.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use codelens_api::{ChatMessage, ChatRole};

use crate::app::{AppState, Mode, VoicePhase};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let [transcript_area, input_area, voice_area] = area.layout(
        &Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .spacing(Spacing::Overlap(1)),
    );

    render_transcript(frame, transcript_area, state);
    render_input(frame, input_area, state);
    render_voice_bar(frame, voice_area, state);
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let block = panel_block(" Conversation ", false, theme);

    if state.chat_log.is_empty() {
        let hint = if state.chat_sending {
            "waiting for a reply…"
        } else {
            "ask about the snippet; the code buffer is sent as context"
        };
        frame.render_widget(
            Paragraph::new(hint).style(Style::default().fg(theme.dim)).block(block),
            area,
        );
        return;
    }

    let mut lines = transcript_lines(&state.chat_log, theme);
    if state.chat_sending {
        lines.push(Line::from(Span::styled(
            "…",
            Style::default().fg(theme.dim),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.chat_scroll, 0)),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let focused = state.mode == Mode::Insert;
    let text = state.chat_input.text();

    let line = if text.is_empty() && !focused {
        Line::from(Span::styled(
            "i to type, Enter to send",
            Style::default().fg(theme.dim),
        ))
    } else {
        Line::from(vec![
            Span::raw(text),
            Span::styled("▏", Style::default().fg(theme.border_active)),
        ])
    };

    frame.render_widget(
        Paragraph::new(line).block(panel_block(" Message ", focused, theme)),
        area,
    );
}

fn render_voice_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let voice = &state.voice;

    let mut lines = Vec::new();

    if let Some(reason) = state.voice_unsupported() {
        lines.push(Line::from(Span::styled(
            format!("voice input unavailable: {reason}"),
            Style::default().fg(theme.dim),
        )));
    } else {
        let status = match (voice.phase, voice.sending) {
            (VoicePhase::Listening, _) => {
                Span::styled("● listening (v to stop)", Style::default().fg(theme.error))
            }
            (VoicePhase::Idle, true) => {
                Span::styled("sending transcript…", Style::default().fg(theme.status_mode_insert))
            }
            (VoicePhase::Idle, false) => Span::styled(
                "v to speak, s to send the transcript",
                Style::default().fg(theme.dim),
            ),
        };
        lines.push(Line::from(status));

        if !voice.transcript.is_empty() {
            lines.push(Line::from(format!("» {}", voice.transcript)));
        }
        if let Some(reply) = &voice.reply {
            lines.push(Line::from(vec![
                Span::styled("ai: ", Style::default().fg(theme.chat_assistant)),
                Span::raw(reply.clone()),
            ]));
        }
    }

    if let Some(error) = &voice.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(" Voice ", false, theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Builds the transcript lines, one role-prefixed paragraph per message.
fn transcript_lines<'a>(log: &'a [ChatMessage], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for message in log {
        let (prefix, color) = match message.role {
            ChatRole::User => ("you: ", theme.chat_user),
            ChatRole::Assistant => ("ai: ", theme.chat_assistant),
        };
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(message.content.as_str()),
        ]));
        lines.push(Line::from(""));
    }
    lines
}
