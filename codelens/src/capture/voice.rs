//! Speech-to-text capture wrapping an external recognizer process.
//!
//! The recognition session is non-continuous with interim results: the
//! engine streams partial transcripts as they form, then signals audio end.
//! All engine output is normalised into [`VoiceEvent`]s on the unified event
//! channel; the adapter state machine (idle ⇄ listening) lives in
//! `AppState` so it can be unit-tested without a real recognizer.
//!
//! Capability detection happens once at startup: the engine shells out to
//! the command named by `CODELENS_STT_CMD`, so hosts without a recognizer
//! get a permanent, explicit "unsupported" state instead of a runtime error.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};

use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;

/// Recognition locale, fixed for the session.
pub const LOCALE: &str = "en-US";

/// Events produced by a recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// An interim or final transcript fragment, in result order.
    Interim(String),
    /// The recognizer reported an error; the code is the surfaced message.
    Error(String),
    /// The audio stream ended; the session is over.
    AudioEnd,
}

/// A speech-recognition engine that can run one session at a time.
pub trait SpeechEngine: Send {
    /// Starts a recognition session; events arrive on `events` until the
    /// session ends or [`SpeechEngine::stop`] is called.
    ///
    /// # Errors
    ///
    /// Returns a message string when the session cannot start.
    fn start(&mut self, events: UnboundedSender<AppEvent>) -> Result<(), String>;

    /// Stops the active session, if any. Idempotent.
    fn stop(&mut self);
}

/// Speech capability resolved once at startup and injected into `AppState`.
pub enum SpeechCapability {
    Available(Box<dyn SpeechEngine>),
    Unavailable(String),
}

/// Probes for a configured recognizer command.
pub fn detect_engine() -> SpeechCapability {
    match std::env::var("CODELENS_STT_CMD") {
        Ok(cmd) if !cmd.trim().is_empty() => {
            SpeechCapability::Available(Box::new(SttCli::new(cmd)))
        }
        _ => SpeechCapability::Unavailable(
            "no speech recognizer configured (set CODELENS_STT_CMD)".to_owned(),
        ),
    }
}

/// Engine backed by an external CLI recognizer.
///
/// Spawns `<cmd> --language en-US`, reads transcript lines from its stdout
/// in a reader thread, and forwards each line as `Interim`. EOF becomes
/// `AudioEnd`; a spawn or read failure becomes `Error`.
pub struct SttCli {
    cmd: String,
    child: Option<Child>,
}

impl SttCli {
    pub fn new(cmd: String) -> Self {
        Self { cmd, child: None }
    }
}

impl SpeechEngine for SttCli {
    fn start(&mut self, events: UnboundedSender<AppEvent>) -> Result<(), String> {
        self.stop();
        let mut child = Command::new(&self.cmd)
            .arg("--language")
            .arg(LOCALE)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| e.to_string())?;

        let Some(stdout) = child.stdout.take() else {
            return Err("recognizer started without a stdout pipe".to_owned());
        };

        // Reader thread lives until the process exits or is killed; send
        // errors mean the UI has shut down and are ignored.
        std::thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(text) if !text.trim().is_empty() => {
                        let _ = events
                            .send(AppEvent::Voice(VoiceEvent::Interim(text.trim().to_owned())));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = events.send(AppEvent::Voice(VoiceEvent::Error(e.to_string())));
                        return;
                    }
                }
            }
            let _ = events.send(AppEvent::Voice(VoiceEvent::AudioEnd));
        });

        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for SttCli {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted engine for adapter state-machine tests.

    use super::*;

    /// Engine that records start/stop calls and hands back its event sender.
    #[derive(Default)]
    pub struct ScriptedEngine {
        pub starts: usize,
        pub stops: usize,
        pub fail_start: Option<String>,
        pub events: Option<UnboundedSender<AppEvent>>,
    }

    impl SpeechEngine for ScriptedEngine {
        fn start(&mut self, events: UnboundedSender<AppEvent>) -> Result<(), String> {
            self.starts += 1;
            if let Some(msg) = &self.fail_start {
                return Err(msg.clone());
            }
            self.events = Some(events);
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }
}
