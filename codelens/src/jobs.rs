//! Request orchestration: one spawned tokio task per backend call.
//!
//! `Jobs` is the dashboard's only path to the network. Each method fires one
//! request on a cloned `Arc<ApiClient>` and posts the completion back onto
//! the unified event channel; the event loop folds it into `AppState`. No
//! retries and no timeouts — the enablement predicates already guarantee at
//! most one in-flight request per action class.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use codelens_api::{ApiClient, ChatMessage};

use crate::event::AppEvent;

/// Where a chat reply should land: the typed transcript or the voice bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTarget {
    Typed,
    Voice,
}

/// Handle for spawning backend requests from the key dispatcher.
///
/// Held as `Option<Jobs>` in `AppState` so state-machine unit tests can run
/// without a runtime or a client.
pub struct Jobs {
    api: Arc<ApiClient>,
    tx: UnboundedSender<AppEvent>,
}

impl Jobs {
    pub fn new(api: ApiClient, tx: UnboundedSender<AppEvent>) -> Self {
        Self { api: Arc::new(api), tx }
    }

    /// The backend origin, for the status bar.
    pub fn backend_url(&self) -> &str {
        self.api.base_url()
    }

    /// Fires an analyze request for the code buffer.
    pub fn analyze(&self, code: String, language: Option<String>) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.analyze(&code, language.as_deref()).await;
            let _ = tx.send(AppEvent::AnalyzeDone(Box::new(result)));
        });
    }

    /// Fires a compare request; version A is always the code buffer.
    pub fn compare(&self, original: String, modified: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.compare(&original, &modified).await;
            let _ = tx.send(AppEvent::CompareDone(Box::new(result)));
        });
    }

    /// Fires an autofix request for the code buffer.
    pub fn autofix(&self, code: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.autofix(&code).await;
            let _ = tx.send(AppEvent::AutofixDone(Box::new(result)));
        });
    }

    /// Fires a chat request carrying the full transcript so far.
    ///
    /// The completion event depends on `target`: typed sends replace the
    /// transcript, voice sends only surface the last reply.
    pub fn chat(
        &self,
        messages: Vec<ChatMessage>,
        context_snippet: Option<String>,
        target: ChatTarget,
    ) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.chat(&messages, context_snippet.as_deref()).await;
            let event = match target {
                ChatTarget::Typed => AppEvent::ChatDone(Box::new(result)),
                ChatTarget::Voice => AppEvent::VoiceReplyDone(Box::new(result)),
            };
            let _ = tx.send(event);
        });
    }
}
