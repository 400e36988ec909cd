//! Central application state and the transitions that mutate it.
//!
//! `AppState` owns the canonical code buffer, the active tab, and the per-tab
//! request/result/error state. Every mutation happens on the main loop
//! thread: key handlers call the `start_*` methods, and completion events
//! from background tasks are folded in through the `apply_*` methods. The
//! render pass reads this struct and never mutates it (the one exception is
//! the lazily rebuilt highlight cache).
//!
//! The enablement predicates (`can_analyze` and friends) are the single
//! source of truth for whether an action may fire; the key dispatcher and
//! the renderers both consult them, so a disabled control can never race a
//! keystroke into an extra request.

use crossbeam_channel::Sender;
use ratatui::text::Line;
use tokio::sync::mpsc::UnboundedSender;

use codelens_api::{
    AnalysisFault, AnalysisReport, AnalyzeOutcome, AutofixReport, ChatMessage, ChatRole,
    CompareReport, RequestError,
};

use crate::buffer::TextBuffer;
use crate::capture::ocr::{ExtractError, ExtractRequest};
use crate::capture::voice::{SpeechCapability, VoiceEvent};
use crate::config::DEFAULT_BACKEND_URL;
use crate::event::AppEvent;
use crate::highlight::highlight_code;
use crate::jobs::{ChatTarget, Jobs};
use crate::theme::Theme;

/// The four dashboard surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Analyze,
    Compare,
    Autofix,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Analyze, Tab::Compare, Tab::Autofix, Tab::Chat];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Analyze => "Analyze",
            Tab::Compare => "Compare",
            Tab::Autofix => "Autofix",
            Tab::Chat => "Chat",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Analyze => 0,
            Tab::Compare => 1,
            Tab::Autofix => 2,
            Tab::Chat => 3,
        }
    }

    /// The next tab in display order, wrapping.
    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

/// Input mode, dispatched on before any per-key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Single-key commands; the default.
    #[default]
    Normal,
    /// Keystrokes edit the active tab's text buffer.
    Insert,
    /// Keystrokes edit the image-path prompt.
    Prompt,
    /// The help overlay is open; only scroll/dismiss keys apply.
    Help,
}

/// State local to the Compare panel.
///
/// The panel owns its own second snippet and request lifecycle; version A is
/// always the canonical code buffer.
#[derive(Default)]
pub struct CompareState {
    /// Version B text, edited on the Compare tab in Insert mode.
    pub other: TextBuffer,
    pub comparing: bool,
    /// Inline error from the last compare attempt; cleared on retry.
    pub error: Option<String>,
    pub report: Option<CompareReport>,
    pub scroll: u16,
}

/// State for the image-to-text extraction flow.
pub struct ExtractState {
    /// Reason extraction is permanently disabled, when no engine was found.
    pub unavailable: Option<String>,
    pub in_progress: bool,
    /// Last reported progress, integer percent.
    pub progress: u8,
    /// Inline error from the last attempt; cleared when a new one starts.
    pub error: Option<String>,
    /// Path typed into the extract prompt.
    pub path_input: TextBuffer,
}

impl Default for ExtractState {
    fn default() -> Self {
        Self {
            unavailable: None,
            in_progress: false,
            progress: 0,
            error: None,
            path_input: TextBuffer::new(),
        }
    }
}

/// Speech-capture session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoicePhase {
    #[default]
    Idle,
    Listening,
}

/// State for the voice bar on the Chat tab.
#[derive(Default)]
pub struct VoiceState {
    pub phase: VoicePhase,
    /// Accumulated transcript, fragments joined with single spaces.
    pub transcript: String,
    /// Last assistant reply to a voice send.
    pub reply: Option<String>,
    /// Inline error from the recognizer or a failed send.
    pub error: Option<String>,
    pub sending: bool,
}

/// Top-level application state. One instance, owned by the main loop.
pub struct AppState {
    pub theme: Theme,
    pub tab: Tab,
    pub mode: Mode,

    /// The canonical snippet. Single source of truth for version A in any
    /// comparison and the context for autofix and chat.
    pub code: TextBuffer,
    /// Language tag, backend-detected after the first successful analysis.
    pub language: Option<String>,

    /// Last successful analysis. Mutually exclusive with `fault`.
    pub analysis: Option<AnalysisReport>,
    /// Active syntax/validation fault. While set, only Analyze is selectable.
    pub fault: Option<AnalysisFault>,
    pub analyzing: bool,

    pub autofix: Option<AutofixReport>,
    pub autofixing: bool,

    pub chat_log: Vec<ChatMessage>,
    pub chat_input: TextBuffer,
    pub chat_sending: bool,
    pub chat_scroll: u16,

    pub compare: CompareState,
    pub extract: ExtractState,
    pub voice: VoiceState,

    /// Blocking alert text; rendered as a modal until dismissed.
    pub alert: Option<String>,

    pub results_scroll: u16,
    pub help_scroll: u16,
    /// Advances at tick rate while any request is in flight.
    pub spinner_frame: usize,

    jobs: Option<Jobs>,
    ocr_tx: Option<Sender<ExtractRequest>>,
    speech: SpeechCapability,
    events_tx: UnboundedSender<AppEvent>,

    highlight_cache: Option<(u64, Vec<Line<'static>>)>,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// # Arguments
    ///
    /// * `theme` — resolved color theme.
    /// * `speech` — speech capability probed at startup.
    /// * `events_tx` — the unified event channel, handed to the speech
    ///   engine when a session starts.
    pub fn new(
        theme: Theme,
        speech: SpeechCapability,
        events_tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            theme,
            tab: Tab::Analyze,
            mode: Mode::Normal,
            code: TextBuffer::new(),
            language: None,
            analysis: None,
            fault: None,
            analyzing: false,
            autofix: None,
            autofixing: false,
            chat_log: Vec::new(),
            chat_input: TextBuffer::new(),
            chat_sending: false,
            chat_scroll: 0,
            compare: CompareState::default(),
            extract: ExtractState::default(),
            voice: VoiceState::default(),
            alert: None,
            results_scroll: 0,
            help_scroll: 0,
            spinner_frame: 0,
            jobs: None,
            ocr_tx: None,
            speech,
            events_tx,
            highlight_cache: None,
        }
    }

    /// Attaches the request spawner. Absent in unit tests, which exercise
    /// the state machine without a runtime or a backend.
    pub fn set_jobs(&mut self, jobs: Jobs) {
        self.jobs = Some(jobs);
    }

    /// Attaches the OCR worker's request channel.
    pub fn set_ocr_channel(&mut self, tx: Sender<ExtractRequest>) {
        self.ocr_tx = Some(tx);
    }

    /// The backend origin shown in the status bar.
    pub fn backend_url(&self) -> &str {
        self.jobs
            .as_ref()
            .map(Jobs::backend_url)
            .unwrap_or(DEFAULT_BACKEND_URL)
    }

    // ---- enablement predicates -------------------------------------------

    pub fn can_analyze(&self) -> bool {
        !self.code.is_blank() && !self.analyzing
    }

    pub fn can_autofix(&self) -> bool {
        self.fault.is_none() && !self.code.is_blank() && !self.autofixing
    }

    pub fn can_chat_send(&self) -> bool {
        self.fault.is_none() && !self.chat_input.is_blank() && !self.chat_sending
    }

    pub fn can_compare(&self) -> bool {
        self.fault.is_none()
            && !self.code.is_blank()
            && !self.compare.other.is_blank()
            && !self.compare.comparing
    }

    pub fn can_extract(&self) -> bool {
        self.extract.unavailable.is_none() && !self.extract.in_progress
    }

    pub fn can_voice_toggle(&self) -> bool {
        matches!(self.speech, SpeechCapability::Available(_))
    }

    pub fn can_voice_send(&self) -> bool {
        self.fault.is_none()
            && !self.voice.transcript.trim().is_empty()
            && !self.voice.sending
            && self.voice.phase == VoicePhase::Idle
    }

    /// Reason the voice controls are permanently disabled, if any.
    pub fn voice_unsupported(&self) -> Option<&str> {
        match &self.speech {
            SpeechCapability::Unavailable(reason) => Some(reason),
            SpeechCapability::Available(_) => None,
        }
    }

    /// True while any backend request or extraction is in flight.
    pub fn busy(&self) -> bool {
        self.analyzing
            || self.autofixing
            || self.chat_sending
            || self.compare.comparing
            || self.voice.sending
            || self.extract.in_progress
    }

    // ---- tab and mode ----------------------------------------------------

    /// Switches to `tab`. A no-op away from Analyze while a fault is active.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.fault.is_some() && tab != Tab::Analyze {
            return;
        }
        self.tab = tab;
        self.results_scroll = 0;
    }

    /// Cycles to the next selectable tab.
    pub fn next_tab(&mut self) {
        self.select_tab(self.tab.next());
    }

    // ---- action starters -------------------------------------------------

    /// Fires an analyze request for the code buffer, if enabled.
    pub fn start_analyze(&mut self) {
        if !self.can_analyze() {
            return;
        }
        self.analyzing = true;
        if let Some(jobs) = &self.jobs {
            jobs.analyze(self.code.text(), self.language.clone());
        }
    }

    /// Fires an autofix request for the code buffer, if enabled.
    pub fn start_autofix(&mut self) {
        if !self.can_autofix() {
            return;
        }
        self.autofixing = true;
        if let Some(jobs) = &self.jobs {
            jobs.autofix(self.code.text());
        }
    }

    /// Sends the typed chat input with the full transcript so far.
    ///
    /// The user entry is appended locally before the request so the
    /// transcript renders immediately; the completion replaces the whole log
    /// with the backend's returned list, which includes the reply.
    pub fn start_chat_send(&mut self) {
        if !self.can_chat_send() {
            return;
        }
        let text = self.chat_input.text().trim().to_owned();
        self.chat_log.push(ChatMessage::user(text));
        self.chat_input.clear();
        self.chat_sending = true;
        if let Some(jobs) = &self.jobs {
            jobs.chat(self.chat_log.clone(), self.context_snippet(), ChatTarget::Typed);
        }
    }

    /// Fires a compare request: version A is the code buffer, version B the
    /// panel's own snippet.
    pub fn start_compare(&mut self) {
        if !self.can_compare() {
            return;
        }
        self.compare.comparing = true;
        self.compare.error = None;
        if let Some(jobs) = &self.jobs {
            jobs.compare(self.code.text(), self.compare.other.text());
        }
    }

    /// Submits the typed image path to the OCR worker.
    ///
    /// The prompt is cleared on submission so the same path can be retyped
    /// and re-submitted after completion.
    pub fn begin_extract(&mut self) {
        if !self.can_extract() || self.extract.path_input.is_blank() {
            return;
        }
        let path = self.extract.path_input.text().trim().to_owned();
        self.extract.path_input.clear();
        self.extract.in_progress = true;
        self.extract.progress = 0;
        self.extract.error = None;
        if let Some(tx) = &self.ocr_tx {
            let _ = tx.send(ExtractRequest::Image(path.into()));
        }
    }

    /// Starts or stops a speech-capture session.
    ///
    /// Starting clears the prior transcript, reply, and error. A start
    /// failure surfaces inline and the session stays idle.
    pub fn toggle_voice(&mut self) {
        let SpeechCapability::Available(engine) = &mut self.speech else {
            return;
        };
        match self.voice.phase {
            VoicePhase::Idle => {
                self.voice.transcript.clear();
                self.voice.reply = None;
                self.voice.error = None;
                match engine.start(self.events_tx.clone()) {
                    Ok(()) => self.voice.phase = VoicePhase::Listening,
                    Err(msg) => self.voice.error = Some(msg),
                }
            }
            VoicePhase::Listening => {
                engine.stop();
                self.voice.phase = VoicePhase::Idle;
            }
        }
    }

    /// Sends the finalized voice transcript to chat, with the code buffer as
    /// context when non-empty. The reply surfaces in the voice bar only.
    pub fn send_voice_transcript(&mut self) {
        if !self.can_voice_send() {
            return;
        }
        self.voice.sending = true;
        let message = ChatMessage::user(self.voice.transcript.trim().to_owned());
        if let Some(jobs) = &self.jobs {
            jobs.chat(vec![message], self.context_snippet(), ChatTarget::Voice);
        }
    }

    fn context_snippet(&self) -> Option<String> {
        if self.code.is_blank() {
            None
        } else {
            Some(self.code.text())
        }
    }

    // ---- completion handlers ---------------------------------------------

    /// Folds in an analyze completion.
    ///
    /// A report clears any active fault; a fault clears the report and
    /// forces the Analyze tab. A transport failure leaves both unchanged and
    /// raises the blocking alert.
    pub fn apply_analyze(&mut self, result: Result<AnalyzeOutcome, RequestError>) {
        self.analyzing = false;
        match result {
            Ok(AnalyzeOutcome::Report(report)) => {
                if report.language_detected.is_some() {
                    self.language = report.language_detected.clone();
                }
                self.analysis = Some(report);
                self.fault = None;
            }
            Ok(AnalyzeOutcome::Fault(fault)) => {
                self.analysis = None;
                self.fault = Some(fault);
                self.tab = Tab::Analyze;
            }
            Err(e) => self.raise_backend_alert("analysis", &e),
        }
    }

    /// Folds in an autofix completion. Success fully replaces the prior
    /// result; failure leaves it untouched and raises the blocking alert.
    pub fn apply_autofix(&mut self, result: Result<AutofixReport, RequestError>) {
        self.autofixing = false;
        match result {
            Ok(report) => self.autofix = Some(report),
            Err(e) => self.raise_backend_alert("autofix", &e),
        }
    }

    /// Folds in a typed-chat completion: the returned transcript replaces
    /// the local log (it contains the request messages plus the reply).
    pub fn apply_chat(&mut self, result: Result<Vec<ChatMessage>, RequestError>) {
        self.chat_sending = false;
        match result {
            Ok(messages) => self.chat_log = messages,
            Err(e) => self.raise_backend_alert("chat", &e),
        }
    }

    /// Folds in a compare completion. Failures surface inline in the panel,
    /// not as a blocking alert.
    pub fn apply_compare(&mut self, result: Result<CompareReport, RequestError>) {
        self.compare.comparing = false;
        match result {
            Ok(report) => {
                self.compare.report = Some(report);
                self.compare.scroll = 0;
            }
            Err(e) => self.compare.error = Some(e.to_string()),
        }
    }

    pub fn apply_extract_progress(&mut self, percent: u8) {
        self.extract.progress = percent;
    }

    /// Folds in an extraction completion. Success overwrites the code
    /// buffer; any failure surfaces inline and the buffer is unchanged.
    pub fn apply_extract_done(&mut self, result: Result<String, ExtractError>) {
        self.extract.in_progress = false;
        match result {
            Ok(text) => {
                self.code.set_text(&text);
                self.extract.error = None;
            }
            Err(e) => self.extract.error = Some(e.to_string()),
        }
    }

    /// Folds in one recognizer event.
    ///
    /// Interim fragments append to the transcript in result order; errors
    /// and audio end both force the session back to idle.
    pub fn apply_voice_event(&mut self, event: VoiceEvent) {
        match event {
            VoiceEvent::Interim(fragment) => {
                if self.voice.phase != VoicePhase::Listening {
                    return;
                }
                if !self.voice.transcript.is_empty() {
                    self.voice.transcript.push(' ');
                }
                self.voice.transcript.push_str(fragment.trim());
            }
            VoiceEvent::Error(code) => {
                if let SpeechCapability::Available(engine) = &mut self.speech {
                    engine.stop();
                }
                self.voice.phase = VoicePhase::Idle;
                self.voice.error = Some(format!("recognition error: {code}"));
            }
            VoiceEvent::AudioEnd => {
                self.voice.phase = VoicePhase::Idle;
            }
        }
    }

    /// Folds in a voice-send completion. The assistant's last entry becomes
    /// the surfaced reply; failures are inline in the voice bar.
    pub fn apply_voice_reply(&mut self, result: Result<Vec<ChatMessage>, RequestError>) {
        self.voice.sending = false;
        match result {
            Ok(messages) => {
                self.voice.reply = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == ChatRole::Assistant)
                    .map(|m| m.content.clone());
            }
            Err(e) => self.voice.error = Some(e.to_string()),
        }
    }

    /// Stops any active recognition session. Called once at shutdown.
    pub fn voice_shutdown(&mut self) {
        if let SpeechCapability::Available(engine) = &mut self.speech {
            engine.stop();
        }
        self.voice.phase = VoicePhase::Idle;
    }

    // ---- housekeeping ----------------------------------------------------

    /// Logic tick: advances the spinner while anything is in flight.
    pub fn on_tick(&mut self) {
        if self.busy() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn raise_backend_alert(&mut self, action: &str, error: &RequestError) {
        self.alert = Some(format!(
            "{action} request failed: {error} (is the backend running at {}?)",
            self.backend_url()
        ));
    }

    /// Highlighted lines for the code buffer, rebuilt only when it changed.
    pub fn highlighted_code(&mut self) -> &[Line<'static>] {
        let revision = self.code.revision();
        let stale = match &self.highlight_cache {
            Some((cached, _)) => *cached != revision,
            None => true,
        };
        if stale {
            let lines = highlight_code(&self.code.text(), self.language.as_deref());
            self.highlight_cache = Some((revision, lines));
        }
        // The cache was just populated on the stale path.
        match &self.highlight_cache {
            Some((_, lines)) => lines,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::voice::testing::ScriptedEngine;
    use crate::capture::voice::SpeechEngine;
    use codelens_api::{ComplexityTrend, RiskLevel};

    fn state() -> AppState {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        AppState::new(
            Theme::dark(),
            SpeechCapability::Unavailable("none".to_owned()),
            tx,
        )
    }

    fn state_with_voice() -> (AppState, tokio::sync::mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let engine = Box::new(ScriptedEngine::default());
        (
            AppState::new(Theme::dark(), SpeechCapability::Available(engine), tx),
            rx,
        )
    }

    fn low_risk_report() -> AnalysisReport {
        AnalysisReport {
            big_o: "O(1)".to_owned(),
            cyclomatic_complexity: 1,
            maintainability: 95.0,
            security_summary: "No issues found.".to_owned(),
            ai_summary: "A trivial function.".to_owned(),
            risk_level: RiskLevel::Low,
            risk_score: 2,
            complexity_trend: ComplexityTrend::Stable,
            language_detected: Some("python".to_owned()),
            detection_confidence: Some(0.99),
            was_corrected: false,
            corrected_code: None,
        }
    }

    fn syntax_fault() -> AnalysisFault {
        AnalysisFault { kind: "SyntaxError".to_owned(), message: "unexpected EOF".to_owned() }
    }

    #[test]
    fn fault_gates_every_tab_except_analyze() {
        let mut app = state();
        app.code.set_text("bad(");
        app.apply_analyze(Ok(AnalyzeOutcome::Fault(syntax_fault())));

        assert!(app.analysis.is_none());
        assert_eq!(app.fault.as_ref().map(|f| f.kind.as_str()), Some("SyntaxError"));

        for tab in [Tab::Compare, Tab::Autofix, Tab::Chat] {
            app.select_tab(tab);
            assert_eq!(app.tab, Tab::Analyze, "switch to {tab:?} must be a no-op");
        }
        app.select_tab(Tab::Analyze);
        assert_eq!(app.tab, Tab::Analyze);
    }

    #[test]
    fn successful_analysis_clears_a_prior_fault() {
        let mut app = state();
        app.code.set_text("bad(");
        app.apply_analyze(Ok(AnalyzeOutcome::Fault(syntax_fault())));
        assert!(app.fault.is_some());

        app.code.set_text("def f(): pass");
        app.apply_analyze(Ok(AnalyzeOutcome::Report(low_risk_report())));

        assert!(app.fault.is_none());
        assert!(app.analysis.is_some());
        app.select_tab(Tab::Chat);
        assert_eq!(app.tab, Tab::Chat);
    }

    #[test]
    fn report_and_fault_are_never_both_set() {
        let mut app = state();
        app.apply_analyze(Ok(AnalyzeOutcome::Report(low_risk_report())));
        assert!(app.analysis.is_some() && app.fault.is_none());

        app.apply_analyze(Ok(AnalyzeOutcome::Fault(syntax_fault())));
        assert!(app.analysis.is_none() && app.fault.is_some());
    }

    #[test]
    fn transport_failure_raises_alert_and_keeps_results() {
        let mut app = state();
        app.apply_analyze(Ok(AnalyzeOutcome::Report(low_risk_report())));

        app.apply_analyze(Err(RequestError::Status {
            status: 502,
            body: "Bad Gateway".to_owned(),
        }));

        assert!(app.analysis.is_some(), "prior result untouched");
        assert!(app.fault.is_none());
        let alert = app.alert.as_deref().unwrap();
        assert!(alert.contains("is the backend running"));
        assert!(alert.contains(DEFAULT_BACKEND_URL));
    }

    #[test]
    fn analyze_scenario_low_risk() {
        let mut app = state();
        app.code.set_text("def f(): pass");
        app.start_analyze();
        assert!(app.analyzing);

        app.apply_analyze(Ok(AnalyzeOutcome::Report(low_risk_report())));
        assert!(!app.analyzing);
        let report = app.analysis.as_ref().unwrap();
        assert_eq!(report.risk_level.label(), "Low");
        assert_eq!(format!("{:.1} / 100", report.maintainability), "95.0 / 100");
        assert_eq!(app.language.as_deref(), Some("python"));
    }

    #[test]
    fn predicates_require_nonblank_buffers_and_no_inflight() {
        let mut app = state();
        assert!(!app.can_analyze(), "blank buffer");
        app.code.set_text("   \n ");
        assert!(!app.can_analyze(), "whitespace-only buffer");

        app.code.set_text("x = 1");
        assert!(app.can_analyze());
        app.analyzing = true;
        assert!(!app.can_analyze(), "already in flight");

        assert!(app.can_autofix());
        app.autofixing = true;
        assert!(!app.can_autofix());

        assert!(!app.can_chat_send(), "empty chat input");
        app.chat_input.set_text("what does this do?");
        assert!(app.can_chat_send());
        app.chat_sending = true;
        assert!(!app.can_chat_send());
    }

    #[test]
    fn fault_disables_autofix_chat_and_compare_but_not_analyze() {
        let mut app = state();
        app.code.set_text("bad(");
        app.compare.other.set_text("bad()");
        app.chat_input.set_text("hello");
        app.apply_analyze(Ok(AnalyzeOutcome::Fault(syntax_fault())));

        assert!(app.can_analyze(), "retry must stay possible");
        assert!(!app.can_autofix());
        assert!(!app.can_chat_send());
        assert!(!app.can_compare());
    }

    #[test]
    fn disabled_actions_are_noops() {
        let mut app = state();
        // Everything blank: no starter may set its in-flight flag.
        app.start_analyze();
        app.start_autofix();
        app.start_chat_send();
        app.start_compare();
        assert!(!app.analyzing && !app.autofixing && !app.chat_sending);
        assert!(!app.compare.comparing);
        assert!(app.chat_log.is_empty());
    }

    #[test]
    fn chat_send_appends_user_entry_and_reply_replaces_log() {
        let mut app = state();
        app.chat_input.set_text("explain this");
        app.start_chat_send();

        assert!(app.chat_sending);
        assert_eq!(app.chat_log.len(), 1);
        assert_eq!(app.chat_log[0].role, ChatRole::User);
        assert!(app.chat_input.is_blank(), "input cleared on send");

        let mut returned = app.chat_log.clone();
        returned.push(ChatMessage { role: ChatRole::Assistant, content: "It adds.".to_owned() });
        app.apply_chat(Ok(returned));

        assert!(!app.chat_sending);
        assert_eq!(app.chat_log.len(), 2);
        assert_eq!(app.chat_log[1].role, ChatRole::Assistant);
    }

    #[test]
    fn transcript_interleaves_over_repeated_sends() {
        let mut app = state();
        for i in 0..3 {
            app.chat_input.set_text(&format!("question {i}"));
            app.start_chat_send();
            let mut returned = app.chat_log.clone();
            returned.push(ChatMessage {
                role: ChatRole::Assistant,
                content: format!("answer {i}"),
            });
            app.apply_chat(Ok(returned));
        }

        assert_eq!(app.chat_log.len(), 6);
        let users = app.chat_log.iter().filter(|m| m.role == ChatRole::User).count();
        assert_eq!(users, 3);
        for (i, pair) in app.chat_log.chunks(2).enumerate() {
            assert_eq!(pair[0].role, ChatRole::User);
            assert_eq!(pair[0].content, format!("question {i}"));
            assert_eq!(pair[1].role, ChatRole::Assistant);
            assert_eq!(pair[1].content, format!("answer {i}"));
        }
    }

    #[test]
    fn compare_failure_is_inline_not_blocking() {
        let mut app = state();
        app.code.set_text("a");
        app.compare.other.set_text("b");
        app.start_compare();
        assert!(app.compare.comparing);

        app.apply_compare(Err(RequestError::Status {
            status: 500,
            body: "boom".to_owned(),
        }));

        assert!(!app.compare.comparing);
        assert!(app.compare.error.is_some());
        assert!(app.alert.is_none(), "compare failures never block the dashboard");
    }

    #[test]
    fn extract_success_overwrites_buffer_and_failure_leaves_it() {
        let mut app = state();
        app.code.set_text("original");
        app.extract.in_progress = true;

        app.apply_extract_done(Err(ExtractError::Empty));
        assert_eq!(app.code.text(), "original");
        assert!(app.extract.error.is_some());
        assert!(!app.extract.in_progress);

        app.extract.in_progress = true;
        app.apply_extract_done(Ok("const x=1;".to_owned()));
        assert_eq!(app.code.text(), "const x=1;");
        assert!(app.extract.error.is_none());
    }

    #[test]
    fn extract_prompt_submission_requires_capability_and_path() {
        let mut app = state();
        app.extract.unavailable = Some("tesseract not found on PATH".to_owned());
        app.extract.path_input.set_text("/tmp/shot.png");
        app.begin_extract();
        assert!(!app.extract.in_progress, "unavailable capability is a no-op");

        app.extract.unavailable = None;
        app.extract.path_input.clear();
        app.begin_extract();
        assert!(!app.extract.in_progress, "blank path is a no-op");

        app.extract.path_input.set_text("/tmp/shot.png");
        app.begin_extract();
        assert!(app.extract.in_progress);
        assert!(app.extract.path_input.is_blank(), "prompt cleared on submit");
    }

    #[test]
    fn voice_toggle_starts_and_stops_a_session() {
        let (mut app, _rx) = state_with_voice();
        assert!(app.can_voice_toggle());

        app.voice.transcript = "stale".to_owned();
        app.voice.error = Some("stale".to_owned());
        app.toggle_voice();
        assert_eq!(app.voice.phase, VoicePhase::Listening);
        assert!(app.voice.transcript.is_empty(), "toggle-on clears prior transcript");
        assert!(app.voice.error.is_none());

        app.toggle_voice();
        assert_eq!(app.voice.phase, VoicePhase::Idle);
    }

    #[test]
    fn voice_start_failure_stays_idle_with_inline_error() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let engine = Box::new(ScriptedEngine {
            fail_start: Some("microphone busy".to_owned()),
            ..ScriptedEngine::default()
        });
        let mut app = AppState::new(Theme::dark(), SpeechCapability::Available(engine), tx);

        app.toggle_voice();
        assert_eq!(app.voice.phase, VoicePhase::Idle);
        assert_eq!(app.voice.error.as_deref(), Some("microphone busy"));
    }

    #[test]
    fn recognizer_error_while_listening_returns_to_idle() {
        let (mut app, _rx) = state_with_voice();
        app.toggle_voice();
        assert_eq!(app.voice.phase, VoicePhase::Listening);

        app.apply_voice_event(VoiceEvent::Error("no-speech".to_owned()));
        assert_eq!(app.voice.phase, VoicePhase::Idle);
        let msg = app.voice.error.as_deref().unwrap();
        assert!(!msg.is_empty());
        assert!(msg.contains("no-speech"));
    }

    #[test]
    fn interim_fragments_accumulate_in_order_while_listening() {
        let (mut app, _rx) = state_with_voice();
        app.apply_voice_event(VoiceEvent::Interim("ignored".to_owned()));
        assert!(app.voice.transcript.is_empty(), "idle sessions drop fragments");

        app.toggle_voice();
        app.apply_voice_event(VoiceEvent::Interim("refactor the".to_owned()));
        app.apply_voice_event(VoiceEvent::Interim("parser module".to_owned()));
        assert_eq!(app.voice.transcript, "refactor the parser module");

        app.apply_voice_event(VoiceEvent::AudioEnd);
        assert_eq!(app.voice.phase, VoicePhase::Idle);
        assert_eq!(app.voice.transcript, "refactor the parser module");
    }

    #[test]
    fn voice_send_requires_idle_nonblank_transcript() {
        let (mut app, _rx) = state_with_voice();
        assert!(!app.can_voice_send(), "empty transcript");

        app.toggle_voice();
        app.apply_voice_event(VoiceEvent::Interim("hello".to_owned()));
        assert!(!app.can_voice_send(), "still listening");

        app.apply_voice_event(VoiceEvent::AudioEnd);
        assert!(app.can_voice_send());

        app.send_voice_transcript();
        assert!(app.voice.sending);
        assert!(!app.can_voice_send(), "send in flight");

        app.apply_voice_reply(Ok(vec![
            ChatMessage::user("hello"),
            ChatMessage { role: ChatRole::Assistant, content: "Hi there.".to_owned() },
        ]));
        assert!(!app.voice.sending);
        assert_eq!(app.voice.reply.as_deref(), Some("Hi there."));
    }

    #[test]
    fn unavailable_speech_makes_toggle_a_noop() {
        let mut app = state();
        assert!(!app.can_voice_toggle());
        assert_eq!(app.voice_unsupported(), Some("none"));
        app.toggle_voice();
        assert_eq!(app.voice.phase, VoicePhase::Idle);
    }

    #[test]
    fn spinner_only_advances_while_busy() {
        let mut app = state();
        app.on_tick();
        assert_eq!(app.spinner_frame, 0);

        app.analyzing = true;
        app.on_tick();
        app.on_tick();
        assert_eq!(app.spinner_frame, 2);
    }

    #[test]
    fn scripted_engine_stop_is_invoked_on_shutdown() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut engine = ScriptedEngine::default();
        let (probe_tx, _probe_rx) = tokio::sync::mpsc::unbounded_channel();
        engine.start(probe_tx).unwrap();
        assert_eq!(engine.starts, 1);

        let mut app = AppState::new(Theme::dark(), SpeechCapability::Available(Box::new(engine)), tx);
        app.voice.phase = VoicePhase::Listening;
        app.voice_shutdown();
        assert_eq!(app.voice.phase, VoicePhase::Idle);
    }
}
