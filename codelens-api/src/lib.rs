//! codelens-api — typed client for the code-intelligence backend.
//!
//! This crate owns the JSON wire contract (`types`) and the thin HTTP wrapper
//! (`client`) used by the `codelens` TUI. It deliberately contains no UI
//! state and no retry/caching policy: every operation is a single POST whose
//! outcome is handed back to the caller to fold into its own state.

pub mod client;
pub mod types;

pub use client::{ApiClient, RequestError};
pub use types::{
    AnalysisFault, AnalysisReport, AnalyzeOutcome, AutofixChange, AutofixReport, ChatMessage,
    ChatRole, CodeDiff, CompareReport, ComplexityTrend, MetricsComparison, MetricsDelta,
    RiskLevel, RiskyModule, StructureReport, VersionMetrics,
};
