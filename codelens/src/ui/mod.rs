//! UI rendering for codelens.
//!
//! `render` is the single entry point called from the Render arm of the main
//! loop. It computes the frame layout, draws the chrome rows, dispatches to
//! the active tab's renderer, and layers the help overlay and the blocking
//! alert on top.

pub mod alert;
pub mod analyze;
pub mod autofix;
pub mod badge;
pub mod charts;
pub mod chat;
pub mod compare;
pub mod help;
pub mod keybindings;
pub mod layout;

use ratatui::Frame;

use crate::app::{AppState, Mode, Tab};

/// Renders one full frame. Called exactly once per Render event.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let [tab_bar, body, status_bar] = layout::compute_layout(frame);

    layout::render_tab_bar(frame, tab_bar, state);

    match state.tab {
        Tab::Analyze => analyze::render(frame, body, state),
        Tab::Compare => compare::render(frame, body, state),
        Tab::Autofix => autofix::render(frame, body, state),
        Tab::Chat => chat::render(frame, body, state),
    }

    layout::render_status_bar(frame, status_bar, state);

    if state.mode == Mode::Help {
        help::render_help_overlay(frame, &state.theme, state.help_scroll);
    }

    // The alert draws last so it covers everything, overlay included.
    if let Some(message) = state.alert.clone() {
        alert::render_alert(frame, &state.theme, &message);
    }
}
