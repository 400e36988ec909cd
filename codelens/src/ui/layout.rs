//! Frame layout, tab bar, and status bar for codelens.
//!
//! This module is pure layout arithmetic plus the two chrome rows — no
//! mutable application state lives here. It is called inside
//! `terminal.draw()` on every render so every frame gets a fresh layout that
//! automatically reflects the current terminal size.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their
//! corner/junction box-drawing characters automatically.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs},
};

use crate::app::{AppState, Mode, Tab};
use crate::theme::Theme;

/// Spinner frames cycled at tick rate while a request is in flight.
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Returns `[tab_bar, body, status_bar]` `Rect`s for the current frame.
///
/// Called inside `terminal.draw()` on every render. The returned rects are
/// valid only for the current draw closure — never store them across frames.
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on
/// each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Applies `BorderType::Thick` when the panel is focused and
/// `BorderType::Plain` otherwise. Uses `MergeStrategy::Fuzzy` because
/// `Exact` produces incorrect junctions when mixing `Thick` and `Plain`
/// borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row tab bar.
///
/// While an analysis fault is active the gated tabs render in the disabled
/// style, mirroring the controller's no-op on selection. The active tab is
/// always legible regardless of gating.
pub fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let gated = state.fault.is_some();

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let fg = if gated && *tab != Tab::Analyze {
                theme.tab_disabled
            } else {
                theme.tab_inactive
            };
            Line::from(Span::styled(
                format!(" {} [{}] ", tab.title(), tab.index() + 1),
                Style::default().fg(fg),
            ))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows a mode indicator and the backend origin. While any request
/// is in flight a spinner frame is appended; the Help overlay displays
/// `NORMAL` because it is a transient visual layer, not a mode change.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Prompt => (" PROMPT ", theme.status_mode_insert),
        Mode::Normal | Mode::Help => (" NORMAL ", theme.status_mode_normal),
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            format!("backend: {}", state.backend_url()),
            Style::default().fg(theme.dim),
        ),
    ];

    if state.busy() {
        let frame_idx = state.spinner_frame % SPINNER_FRAMES.len();
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} working", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(theme.status_mode_insert),
        ));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("? help", Style::default().fg(theme.dim)));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
