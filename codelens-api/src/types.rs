//! Wire types for the backend's JSON contract.
//!
//! All types here are fully owned plain data: they cross the boundary from
//! the client's request tasks into `AppState` and must be `Send` with no
//! borrowed lifetimes. Field names and optionality mirror the backend's
//! schemas exactly; defensive `#[serde(default)]` keeps decoding total where
//! the backend omits fields on degraded paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse ordinal risk classification returned by the backend.
///
/// Deserialization is total: any string outside the four known levels maps to
/// `Unknown`, and a missing field defaults to `Unknown`. The badge widget
/// relies on this — every backend value has a defined style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Badge label text for this level.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

/// Coarse complexity-trend classification, used only for chart rendering.
///
/// The backend emits `"unknown"` on syntax-fault payloads; `#[serde(other)]`
/// additionally absorbs any future label without a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTrend {
    Stable,
    SlightlyIncreasing,
    Increasing,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Request body for `POST /code/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// The raw unified analyze response.
///
/// The backend overloads one 2xx shape for both a metrics report and a
/// syntax-failure payload: on failure the metric fields are present but
/// neutral and `error`/`message` are set. Callers never consume this type
/// directly — [`AnalyzeResponse::into_outcome`] splits it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub big_o: String,
    #[serde(default)]
    pub cyclomatic_complexity: u32,
    #[serde(default)]
    pub maintainability: f64,
    #[serde(default)]
    pub security_summary: String,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_score: i64,
    #[serde(default)]
    pub complexity_trend: ComplexityTrend,
    #[serde(default)]
    pub language_detected: Option<String>,
    #[serde(default)]
    pub detection_confidence: Option<f64>,
    #[serde(default)]
    pub was_corrected: bool,
    #[serde(default = "default_true")]
    pub original_valid: bool,
    #[serde(default)]
    pub corrected_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

impl AnalyzeResponse {
    /// Splits the overloaded 2xx payload into a report or a fault.
    ///
    /// The presence of the `error` field is the sole discriminator — this is
    /// the backend's contract, preserved verbatim for compatibility.
    pub fn into_outcome(self) -> AnalyzeOutcome {
        if let Some(kind) = self.error {
            return AnalyzeOutcome::Fault(AnalysisFault {
                kind,
                message: self.message.unwrap_or_default(),
            });
        }
        AnalyzeOutcome::Report(AnalysisReport {
            big_o: self.big_o,
            cyclomatic_complexity: self.cyclomatic_complexity,
            maintainability: self.maintainability,
            security_summary: self.security_summary,
            ai_summary: self.ai_summary,
            risk_level: self.risk_level,
            risk_score: self.risk_score,
            complexity_trend: self.complexity_trend,
            language_detected: self.language_detected,
            detection_confidence: self.detection_confidence,
            was_corrected: self.was_corrected,
            corrected_code: self.corrected_code,
        })
    }
}

/// Either a successful analysis report or a payload-level fault.
///
/// Both arrive with an HTTP success status; transport failures are a
/// separate axis ([`crate::RequestError`]).
#[derive(Debug, Clone)]
pub enum AnalyzeOutcome {
    Report(AnalysisReport),
    Fault(AnalysisFault),
}

/// A successful analysis of the current snippet.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub big_o: String,
    pub cyclomatic_complexity: u32,
    /// 0–100 maintainability index.
    pub maintainability: f64,
    pub security_summary: String,
    pub ai_summary: String,
    pub risk_level: RiskLevel,
    pub risk_score: i64,
    pub complexity_trend: ComplexityTrend,
    pub language_detected: Option<String>,
    pub detection_confidence: Option<f64>,
    /// True when the backend had to auto-correct the snippet before analysis.
    pub was_corrected: bool,
    pub corrected_code: Option<String>,
}

/// A syntax/validation failure reported inside a 2xx analyze response.
///
/// While one of these is active the dashboard gates every tab except Analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFault {
    /// Error kind, e.g. `"SyntaxError"` or `"CompilationError"`.
    pub kind: String,
    /// Human-readable detail, e.g. `"unexpected EOF"`.
    pub message: String,
}

/// Request body for `POST /compare`.
#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest {
    pub original_code: String,
    pub modified_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Line-based diff between two snippet versions, computed server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeDiff {
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub changed: Vec<String>,
}

/// Metric snapshot for one version inside a [`MetricsComparison`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionMetrics {
    #[serde(default)]
    pub big_o: String,
    #[serde(default)]
    pub cyclomatic_complexity: u32,
    #[serde(default)]
    pub maintainability: f64,
    #[serde(default)]
    pub risk_score: i64,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

/// Numeric deltas (B minus A) inside a [`MetricsComparison`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsDelta {
    #[serde(default)]
    pub cyclomatic_complexity: i64,
    #[serde(default)]
    pub risk_score: i64,
}

/// Paired per-version metrics plus deltas, produced by the compare endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsComparison {
    #[serde(rename = "A", default)]
    pub a: VersionMetrics,
    #[serde(rename = "B", default)]
    pub b: VersionMetrics,
    #[serde(default)]
    pub delta: MetricsDelta,
}

/// Response body for `POST /compare`.
///
/// `error`/`message` are set when one of the versions failed analysis; the
/// diff itself is still present in that case (it is computed independently).
#[derive(Debug, Clone, Deserialize)]
pub struct CompareReport {
    pub diff: CodeDiff,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub metrics_comparison: Option<MetricsComparison>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Conversation role for chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Request body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_snippet: Option<String>,
}

/// Response body for `POST /chat`: the full transcript including the reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

/// Request body for `POST /autofix`.
#[derive(Debug, Clone, Serialize)]
pub struct AutofixRequest {
    pub code: String,
}

/// One titled change explanation inside an [`AutofixReport`].
#[derive(Debug, Clone, Deserialize)]
pub struct AutofixChange {
    pub title: String,
    pub description: String,
}

/// Response body for `POST /autofix`.
#[derive(Debug, Clone, Deserialize)]
pub struct AutofixReport {
    pub fixed_code: String,
    #[serde(default)]
    pub diff_summary: Vec<String>,
    #[serde(default)]
    pub changes: Vec<AutofixChange>,
}

/// Request body for `POST /structure/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct StructureRequest {
    pub files: Vec<String>,
}

/// One heuristically risky module inside a [`StructureReport`].
#[derive(Debug, Clone, Deserialize)]
pub struct RiskyModule {
    pub file_path: String,
    pub language: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Response body for `POST /structure/analyze`.
///
/// Declared for contract completeness; no UI surface issues this request.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureReport {
    pub total_files: usize,
    #[serde(default)]
    pub language_breakdown: BTreeMap<String, usize>,
    #[serde(default)]
    pub risky_modules: Vec<RiskyModule>,
    #[serde(default)]
    pub summary: String,
}
