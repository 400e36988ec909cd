//! Thin HTTP wrapper over the backend's JSON endpoints.
//!
//! One async operation per remote capability. No retries, no request
//! timeout: the caller owns all policy, including how a hung backend is
//! surfaced. The base URL is injected at construction rather than compiled
//! in, so tests and alternate deployments point the client wherever they
//! like.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::types::{
    AnalyzeOutcome, AnalyzeRequest, AnalyzeResponse, AutofixReport, AutofixRequest, ChatMessage,
    ChatRequest, ChatResponse, CompareReport, CompareRequest, StructureReport, StructureRequest,
};

/// Failure of a single request, before any payload-level interpretation.
///
/// `Status` covers every non-2xx response uniformly regardless of body shape;
/// `Transport` covers unreachable hosts, connection resets, and undecodable
/// success bodies (all surfaced by reqwest).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        /// Response body, or the canonical status text when the body was
        /// empty or unreadable.
        body: String,
    },
    /// The request never completed, or the success body failed to decode.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the code-intelligence backend.
///
/// Cheap to clone-by-Arc and share across spawned request tasks; the inner
/// `reqwest::Client` pools connections internally.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http: reqwest::Client::new() }
    }

    /// The injected backend origin, e.g. for status-bar display.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` as JSON to `path` and decodes a JSON response.
    ///
    /// # Errors
    ///
    /// `RequestError::Status` on any non-2xx response, `RequestError::Transport`
    /// on network failure or a success body that does not decode as `Resp`.
    async fn post_json<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, RequestError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            // Prefer the body text; fall back to the status line when the
            // body is empty or unreadable.
            let body = resp.text().await.unwrap_or_default();
            let body = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body
            };
            return Err(RequestError::Status { status: status.as_u16(), body });
        }
        Ok(resp.json::<Resp>().await?)
    }

    /// Analyzes a snippet. A 2xx response is split on its `error` field into
    /// a report or a payload-level fault — syntax failures are not HTTP
    /// failures on this backend.
    ///
    /// # Errors
    ///
    /// Transport/status failures only; syntax faults come back as
    /// `Ok(AnalyzeOutcome::Fault(..))`.
    pub async fn analyze(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Result<AnalyzeOutcome, RequestError> {
        let req = AnalyzeRequest {
            code: code.to_owned(),
            language: language.map(str::to_owned),
        };
        let resp: AnalyzeResponse = self.post_json("/code/analyze", &req).await?;
        Ok(resp.into_outcome())
    }

    /// Diffs and re-analyzes two snippet versions.
    ///
    /// # Errors
    ///
    /// Transport/status failures; per-version analysis faults arrive inside
    /// the report's `error`/`message` fields.
    pub async fn compare(
        &self,
        original: &str,
        modified: &str,
    ) -> Result<CompareReport, RequestError> {
        let req = CompareRequest {
            original_code: original.to_owned(),
            modified_code: modified.to_owned(),
            language: None,
        };
        self.post_json("/compare", &req).await
    }

    /// Sends the transcript (plus optional code context) and returns the full
    /// ordered message list; the last entry is the assistant's reply.
    ///
    /// # Errors
    ///
    /// Transport/status failures.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        context_snippet: Option<&str>,
    ) -> Result<Vec<ChatMessage>, RequestError> {
        let req = ChatRequest {
            messages: messages.to_vec(),
            context_snippet: context_snippet.map(str::to_owned),
        };
        let resp: ChatResponse = self.post_json("/chat", &req).await?;
        Ok(resp.messages)
    }

    /// Requests an AI-improved version of the snippet.
    ///
    /// # Errors
    ///
    /// Transport/status failures.
    pub async fn autofix(&self, code: &str) -> Result<AutofixReport, RequestError> {
        let req = AutofixRequest { code: code.to_owned() };
        self.post_json("/autofix", &req).await
    }

    /// Scans a file list for structural risk heuristics.
    ///
    /// Declared for contract completeness — no UI surface issues this call.
    ///
    /// # Errors
    ///
    /// Transport/status failures.
    pub async fn analyze_structure(
        &self,
        files: &[String],
    ) -> Result<StructureReport, RequestError> {
        let req = StructureRequest { files: files.to_vec() };
        self.post_json("/structure/analyze", &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = ApiClient::new("http://127.0.0.1:8000///");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn status_error_displays_code_and_body() {
        let err = RequestError::Status { status: 500, body: "boom".to_owned() };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
