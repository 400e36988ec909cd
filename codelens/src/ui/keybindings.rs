//! Key and mouse dispatch.
//!
//! Dispatch is mode-first: the active [`Mode`] decides how a keystroke is
//! interpreted before any per-key binding applies. A visible blocking alert
//! preempts every mode — only the dismiss keys do anything until it is gone.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::{AppState, Mode, Tab};

/// What the main loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Handles one key press against the current state.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // The blocking alert swallows everything except its dismiss keys.
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.dismiss_alert();
        }
        return KeyAction::Continue;
    }

    match state.mode {
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
        Mode::Prompt => handle_prompt(key, state),
        Mode::Help => handle_help(key, state),
    }
}

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::Help;
        }
        KeyCode::Tab => state.next_tab(),
        KeyCode::Char('1') => state.select_tab(Tab::Analyze),
        KeyCode::Char('2') => state.select_tab(Tab::Compare),
        KeyCode::Char('3') => state.select_tab(Tab::Autofix),
        KeyCode::Char('4') => state.select_tab(Tab::Chat),
        KeyCode::Char('i') => {
            // Autofix has no editable buffer.
            if state.tab != Tab::Autofix {
                state.mode = Mode::Insert;
            }
        }
        KeyCode::Char('a') => state.start_analyze(),
        KeyCode::Char('f') => state.start_autofix(),
        KeyCode::Char('c') => state.start_compare(),
        KeyCode::Char('o') => {
            if state.tab == Tab::Analyze && state.can_extract() {
                state.mode = Mode::Prompt;
            }
        }
        KeyCode::Char('v') => {
            if state.tab == Tab::Chat {
                state.toggle_voice();
            }
        }
        KeyCode::Char('s') => {
            if state.tab == Tab::Chat {
                state.send_voice_transcript();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => scroll_active(state, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll_active(state, -1),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.code == KeyCode::Esc {
        state.mode = Mode::Normal;
        return KeyAction::Continue;
    }

    match state.tab {
        Tab::Analyze => edit_buffer(key, state, BufferTarget::Code),
        Tab::Compare => edit_buffer(key, state, BufferTarget::CompareOther),
        Tab::Chat => {
            // Enter sends instead of inserting a newline.
            if key.code == KeyCode::Enter {
                state.start_chat_send();
            } else {
                edit_buffer(key, state, BufferTarget::ChatInput);
            }
        }
        Tab::Autofix => {}
    }
    KeyAction::Continue
}

fn handle_prompt(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.extract.path_input.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            state.begin_extract();
            state.mode = Mode::Normal;
        }
        KeyCode::Backspace => state.extract.path_input.backspace(),
        KeyCode::Char(c) => state.extract.path_input.insert_char(c),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') | KeyCode::Up => state.help_scroll = state.help_scroll.saturating_sub(1),
        _ => {}
    }
    KeyAction::Continue
}

/// Which text buffer Insert-mode keystrokes edit.
enum BufferTarget {
    Code,
    CompareOther,
    ChatInput,
}

fn edit_buffer(key: KeyEvent, state: &mut AppState, target: BufferTarget) {
    let buffer = match target {
        BufferTarget::Code => &mut state.code,
        BufferTarget::CompareOther => &mut state.compare.other,
        BufferTarget::ChatInput => &mut state.chat_input,
    };
    match key.code {
        KeyCode::Char(c) => buffer.insert_char(c),
        KeyCode::Enter => buffer.insert_newline(),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Left => buffer.move_cursor(-1, 0),
        KeyCode::Right => buffer.move_cursor(1, 0),
        KeyCode::Up => buffer.move_cursor(0, -1),
        KeyCode::Down => buffer.move_cursor(0, 1),
        _ => {}
    }
}

/// Scrolls the active tab's results pane by `delta` rows.
fn scroll_active(state: &mut AppState, delta: i32) {
    let apply = |value: u16| -> u16 {
        if delta < 0 {
            value.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            value.saturating_add(delta as u16)
        }
    };
    match state.tab {
        Tab::Analyze | Tab::Autofix => state.results_scroll = apply(state.results_scroll),
        Tab::Compare => state.compare.scroll = apply(state.compare.scroll),
        Tab::Chat => state.chat_scroll = apply(state.chat_scroll),
    }
}

/// Handles a mouse event: the wheel scrolls the active pane.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) {
    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_active(state, 1),
        MouseEventKind::ScrollUp => scroll_active(state, -1),
        _ => {}
    }
}
