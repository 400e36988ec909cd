//! Terminal lifecycle management for codelens.
//!
//! **Why stderr, not stdout?**
//! Extracted snippets and chat replies are the kind of output users pipe
//! elsewhere; rendering the TUI to stderr keeps stdout clean for future
//! non-interactive modes and for shell pipelines (`codelens | …`). The
//! buffered writer batches escape sequences into fewer write(2) syscalls,
//! reducing flicker at the 30 FPS render interval.

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use signal_hook::consts::SIGTERM;
use signal_hook::flag::register;
use std::io::{stderr, BufWriter, Stderr};
use std::panic;
use std::sync::{atomic::AtomicBool, Arc};

/// The terminal type used by codelens — CrosstermBackend over buffered stderr.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stderr>>>;

/// Initialises the terminal for TUI rendering.
///
/// Enables raw mode, enters the alternate screen, and enables mouse capture
/// (the result panes scroll on the wheel). Call [`restore_tui`] at every
/// exit path.
///
/// # Errors
///
/// Returns `Err` if `enable_raw_mode`, `execute!`, or `Terminal::new` fails.
pub fn init_tui() -> std::io::Result<Tui> {
    let mut out = BufWriter::new(stderr());
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(out))
}

/// Restores the terminal to its pre-TUI state.
///
/// Disables raw mode and leaves the alternate screen. Idempotent, and must
/// be called at every exit path — including the panic hook — because
/// ratatui 0.30 does NOT auto-restore the terminal on `Drop` (see GitHub #2087).
///
/// # Errors
///
/// Returns `Err` if `disable_raw_mode` or `execute!` fails. The panic hook
/// uses `let _ = restore_tui();` — best-effort only at that point.
pub fn restore_tui() -> std::io::Result<()> {
    disable_raw_mode()?;
    execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before the message prints.
///
/// Must be called **before** [`init_tui`]. Chains onto any previously
/// installed hook so the default (or test framework's) panic printer still
/// runs after the terminal is restored. Without this hook, a panic leaves
/// the terminal in raw mode with the alternate screen active, making the
/// panic message invisible and the shell unusable until the user types
/// `reset`.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal first so the panic message is readable.
        let _ = restore_tui();
        original_hook(panic_info);
    }));
}

/// Registers a SIGTERM handler that sets an `AtomicBool` flag.
///
/// Returns an `Arc<AtomicBool>` that transitions from `false` to `true` when
/// the process receives SIGTERM. The main event loop polls this flag on a
/// 50ms heartbeat and breaks out to the restore path.
///
/// # Panics
///
/// Panics if the OS refuses to register the signal handler (extremely rare —
/// treated as a fatal initialisation error rather than a recoverable
/// condition).
pub fn register_sigterm() -> Arc<AtomicBool> {
    let term = Arc::new(AtomicBool::new(false));
    // signal_hook::flag::register only does an atomic store in the handler,
    // which is async-signal-safe.
    register(SIGTERM, Arc::clone(&term)).expect("Failed to register SIGTERM handler");
    term
}
