//! Optional host-capability adapters: image OCR and speech capture.
//!
//! Both adapters follow the same shape: a trait for the engine, a provider
//! resolved once at startup into `Available` / `Unavailable(reason)`, and
//! results normalised onto the unified `AppEvent` channel. An unavailable
//! capability permanently disables its control for the session.

pub mod ocr;
pub mod voice;
