//! Image-to-text extraction on a dedicated worker thread.
//!
//! The OCR engine is a blocking external process, so it lives in its own
//! thread for its lifetime: requests flow in over a crossbeam channel,
//! progress and completion flow out as `AppEvent`s. The UI thread never
//! blocks on recognition.
//!
//! Engine presence is resolved once at startup ([`detect_engine`]); the
//! worker is only spawned when the capability is available, and the adapter
//! guarantees exactly one `ExtractDone` per request.

use std::path::{Path, PathBuf};
use std::process::Command;

use crossbeam_channel::Receiver;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;

/// Failure of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The engine itself failed; its message is surfaced verbatim.
    #[error("{0}")]
    Engine(String),
    /// Recognition succeeded but produced no text after trimming.
    #[error("no text was recognized in the image")]
    Empty,
}

/// A request for the OCR worker thread.
#[derive(Debug)]
pub enum ExtractRequest {
    /// Extract text from the image at this path.
    Image(PathBuf),
}

/// A recognition engine that turns an image into text.
///
/// `progress` receives fractions in 0.0–1.0 in order; the adapter rounds
/// them to integer percent before they reach the UI. Implementations run on
/// the worker thread and may block freely.
pub trait OcrEngine: Send {
    /// Recognizes text in `image`, reporting progress along the way.
    ///
    /// # Errors
    ///
    /// `ExtractError::Engine` with the engine's own message on any failure.
    fn recognize(
        &mut self,
        image: &Path,
        progress: &mut dyn FnMut(f64),
    ) -> Result<String, ExtractError>;
}

/// Probes for a usable OCR engine on this host.
///
/// Checks for the `tesseract` CLI via `--version`. Returns the engine on
/// success or a reason string that permanently disables the extract control.
pub fn detect_engine() -> Result<TesseractCli, String> {
    match Command::new("tesseract").arg("--version").output() {
        Ok(out) if out.status.success() => Ok(TesseractCli),
        Ok(_) => Err("tesseract is installed but not responding".to_owned()),
        Err(_) => Err("tesseract not found on PATH".to_owned()),
    }
}

/// OCR engine backed by the `tesseract` command-line tool.
///
/// The CLI reports no incremental progress, so recognition emits the start
/// and end fractions only; the contract (monotonic fractions terminating in
/// one result) is unchanged.
pub struct TesseractCli;

impl OcrEngine for TesseractCli {
    fn recognize(
        &mut self,
        image: &Path,
        progress: &mut dyn FnMut(f64),
    ) -> Result<String, ExtractError> {
        progress(0.0);
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("--psm")
            .arg("6")
            .output()
            .map_err(|e| ExtractError::Engine(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            return Err(ExtractError::Engine(stderr));
        }
        progress(1.0);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Entry point for the OCR worker thread.
///
/// Loops over incoming requests until the channel closes (sender dropped at
/// app teardown). One request is processed at a time; the UI disables the
/// extract control while a request is in flight.
pub fn ocr_worker_loop<E: OcrEngine>(
    mut engine: E,
    rx: Receiver<ExtractRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    for ExtractRequest::Image(path) in rx {
        run_extraction(&mut engine, &path, &event_tx);
    }
}

/// Runs one extraction: forwards rounded progress, sends exactly one
/// `ExtractDone` carrying trimmed text or an error.
///
/// Empty-after-trim output is an `ExtractError::Empty` — the code buffer is
/// never overwritten with nothing.
fn run_extraction(
    engine: &mut dyn OcrEngine,
    image: &Path,
    event_tx: &UnboundedSender<AppEvent>,
) {
    let mut forward = |fraction: f64| {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        let _ = event_tx.send(AppEvent::ExtractProgress(percent));
    };

    let result = match engine.recognize(image, &mut forward) {
        Ok(text) => {
            let trimmed = text.trim().to_owned();
            if trimmed.is_empty() {
                Err(ExtractError::Empty)
            } else {
                Ok(trimmed)
            }
        }
        Err(e) => Err(e),
    };

    let _ = event_tx.send(AppEvent::ExtractDone(Box::new(result)));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted engine: emits the given progress fractions, then resolves.
    struct MockEngine {
        fractions: Vec<f64>,
        outcome: Result<String, ExtractError>,
    }

    impl OcrEngine for MockEngine {
        fn recognize(
            &mut self,
            _image: &Path,
            progress: &mut dyn FnMut(f64),
        ) -> Result<String, ExtractError> {
            for f in &self.fractions {
                progress(*f);
            }
            self.outcome.clone()
        }
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        events
    }

    #[test]
    fn extraction_trims_text_and_completes_exactly_once() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut engine = MockEngine {
            fractions: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            outcome: Ok("  const x=1;  ".to_owned()),
        };

        run_extraction(&mut engine, Path::new("snippet.png"), &tx);

        let events = drain(&mut rx);
        let progress: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ExtractProgress(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![0, 25, 50, 75, 100]);

        let done: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ExtractDone(r) => Some(r.as_ref()),
                _ => None,
            })
            .collect();
        assert_eq!(done.len(), 1, "exactly one completion event");
        assert_eq!(done[0].as_deref(), Ok("const x=1;"));
    }

    #[test]
    fn empty_after_trim_is_an_empty_error() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut engine = MockEngine { fractions: vec![1.0], outcome: Ok("   \n\t ".to_owned()) };

        run_extraction(&mut engine, Path::new("blank.png"), &tx);

        let done = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                AppEvent::ExtractDone(r) => Some(*r),
                _ => None,
            })
            .expect("completion event");
        assert_eq!(done, Err(ExtractError::Empty));
    }

    #[test]
    fn engine_failure_is_surfaced_verbatim() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut engine = MockEngine {
            fractions: vec![],
            outcome: Err(ExtractError::Engine("could not load language data".to_owned())),
        };

        run_extraction(&mut engine, Path::new("img.png"), &tx);

        let done = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                AppEvent::ExtractDone(r) => Some(*r),
                _ => None,
            })
            .expect("completion event");
        assert_eq!(done, Err(ExtractError::Engine("could not load language data".to_owned())));
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut engine =
            MockEngine { fractions: vec![-0.5, 1.5], outcome: Ok("x".to_owned()) };

        run_extraction(&mut engine, Path::new("img.png"), &tx);

        let progress: Vec<u8> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::ExtractProgress(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![0, 100]);
    }
}
