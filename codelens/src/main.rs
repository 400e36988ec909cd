//! codelens — a terminal dashboard for backend-powered code intelligence.
//!
//! Entry point for the `codelens` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), the dashboard state
//! machine (`app`), the request spawner (`jobs`), and the optional capture
//! adapters (`capture`).
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config and theme — read-only, safe before terminal init.
//! 2. `install_panic_hook()` — installed first so it is the innermost hook.
//!    Restores the terminal before the panic message prints.
//! 3. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the loop.
//! 4. `init_tui()` — enters alternate screen and enables raw mode.
//! 5. Create event channel and `spawn_event_task()`.
//! 6. Probe the OCR and speech capabilities once; missing engines become
//!    permanent inline "unavailable" states, never runtime errors.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (q key, SIGTERM, or
//! channel close). The `?` operator is only used before `init_tui()` or
//! inside the Render arm — draw errors propagate out of the loop and reach
//! `restore_tui()` after `break`. The panic hook covers unexpected panics.

mod app;
mod buffer;
mod capture;
mod config;
mod event;
mod highlight;
mod jobs;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use codelens_api::ApiClient;

use crate::capture::ocr;
use crate::capture::voice;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: config and theme — read-only, safe before terminal init.
    let cfg = config::Config::load();
    let theme = theme::Theme::from_name(&cfg.theme);

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: create the event channel and spawn the background event task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    // Step 5: capability probes and state assembly.
    let speech = voice::detect_engine();
    let mut state = app::AppState::new(theme, speech, handler.tx.clone());

    let api = ApiClient::new(&cfg.backend_url);
    state.set_jobs(jobs::Jobs::new(api, handler.tx.clone()));

    match ocr::detect_engine() {
        Ok(engine) => {
            let (ocr_tx, ocr_rx) = crossbeam_channel::unbounded();
            let event_tx = handler.tx.clone();
            // Worker thread exits when ocr_tx is dropped with AppState.
            std::thread::spawn(move || ocr::ocr_worker_loop(engine, ocr_rx, event_tx));
            state.set_ocr_channel(ocr_tx);
        }
        Err(reason) => state.extract.unavailable = Some(reason),
    }

    // Event loop — exits only via `break`, never via `?` (except the Render
    // arm, whose error still breaks out to the restore path below).
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        terminal.draw(|frame| ui::render(frame, &mut state))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => handle_mouse(mouse, &mut state),
                    Some(event::AppEvent::Tick) => state.on_tick(),
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(event::AppEvent::AnalyzeDone(result)) => state.apply_analyze(*result),
                    Some(event::AppEvent::CompareDone(result)) => state.apply_compare(*result),
                    Some(event::AppEvent::AutofixDone(result)) => state.apply_autofix(*result),
                    Some(event::AppEvent::ChatDone(result)) => state.apply_chat(*result),
                    Some(event::AppEvent::VoiceReplyDone(result)) => state.apply_voice_reply(*result),
                    Some(event::AppEvent::ExtractProgress(percent)) => {
                        state.apply_extract_progress(percent)
                    }
                    Some(event::AppEvent::ExtractDone(result)) => state.apply_extract_done(*result),
                    Some(event::AppEvent::Voice(ev)) => state.apply_voice_event(ev),
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just the heartbeat,
                // so quit latency is at most one event cycle rather than 50ms.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Single exit point: stop any recognition session, then restore the
    // terminal. Covers normal quit, SIGTERM, and channel close; the panic
    // hook handles the panic path separately.
    state.voice_shutdown();
    tui::restore_tui()?;
    Ok(())
}
