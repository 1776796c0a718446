//! Collaborator abstraction layer
//!
//! Every content or analysis collaborator (research, blog writer,
//! social, fact-checker, editor, SEO, analytics) implements the same
//! single-operation [`Agent`] trait, enabling the pipeline to treat
//! them uniformly. Collaborators return [`AgentOutput`], a tagged
//! structured-or-raw-text result: the parser tolerates clean JSON,
//! JSON wrapped in markdown code fences, and plain prose, and never
//! raises a parse error to the pipeline.

use async_trait::async_trait;
use serde_json::Value;

pub mod gemini;
pub mod prompts;

/// Result type for collaborator operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur during a collaborator call
///
/// `is_transient` is the typed replacement for retry-by-string-matching:
/// the retry layer asks the error, not the error text, whether another
/// attempt is worthwhile.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Upstream service overloaded or unavailable (HTTP 5xx)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Upstream quota exhausted (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Retry loop fell through without a result (defensive)
    #[error("Max retries exceeded")]
    RetriesExhausted,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AgentError {
    /// True for errors the retry policy treats as worth another attempt:
    /// overload, unavailability, rate limiting.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AgentError::ProviderUnavailable(_) | AgentError::RateLimitExceeded
        )
    }
}

/// Collaborator trait that all content and analysis agents implement
#[async_trait]
pub trait Agent: Send + Sync {
    /// Name of the collaborator (e.g. "research", "blog_writer")
    fn name(&self) -> &str;

    /// Run one prompt-shaped request and return its output.
    ///
    /// Implementations may fail with any [`AgentError`]; malformed model
    /// output is NOT a failure — it comes back as
    /// [`AgentOutput::Unstructured`].
    async fn invoke(&self, input: &str) -> Result<AgentOutput>;
}

/// Tagged collaborator output
///
/// Downstream consumers must handle both tags explicitly; there is no
/// path where free-text model output raises an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// The output parsed as a JSON object
    Structured(Value),
    /// Free text that did not contain a parseable JSON object
    Unstructured(String),
}

impl AgentOutput {
    /// Parse raw model text into a tagged output.
    ///
    /// Handles, in order:
    /// 1. The whole text being a JSON object
    /// 2. A JSON object inside a markdown code fence (with or without
    ///    surrounding prose)
    /// 3. A balanced JSON object embedded anywhere in prose
    /// 4. Anything else: kept verbatim as `Unstructured`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
            return AgentOutput::Structured(value);
        }

        if let Some(inner) = extract_fenced_block(trimmed) {
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(inner.trim()) {
                return AgentOutput::Structured(value);
            }
        }

        if let Some(pos) = trimmed.find('{') {
            if let Some(candidate) = extract_balanced_object(&trimmed[pos..]) {
                if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(candidate) {
                    return AgentOutput::Structured(value);
                }
            }
        }

        AgentOutput::Unstructured(raw.to_string())
    }

    /// Field lookup; `None` for the unstructured tag or a missing key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            AgentOutput::Structured(value) => value.get(key),
            AgentOutput::Unstructured(_) => None,
        }
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.field(key).and_then(Value::as_u64)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    /// Best-effort text body of the output.
    ///
    /// Unstructured output is returned verbatim. For structured output
    /// the first of `keys` holding a string wins; failing that, the
    /// whole object is serialized (so content is never silently lost).
    pub fn text(&self, keys: &[&str]) -> String {
        match self {
            AgentOutput::Unstructured(raw) => raw.clone(),
            AgentOutput::Structured(value) => {
                for key in keys {
                    if let Some(text) = value.get(*key).and_then(Value::as_str) {
                        return text.to_string();
                    }
                }
                value.to_string()
            }
        }
    }

    /// The structured payload, or a default payload carrying the raw
    /// text under `raw_key` for the unstructured tag.
    pub fn into_payload(self, raw_key: &str) -> Value {
        match self {
            AgentOutput::Structured(value) => value,
            AgentOutput::Unstructured(raw) => serde_json::json!({ raw_key: raw }),
        }
    }
}

/// Extract the body of the first markdown code fence in the text.
///
/// Works even when there is trailing prose after the closing ```.
/// Returns `None` if no fenced block is found.
fn extract_fenced_block(content: &str) -> Option<&str> {
    let fence_start = content.find("```")?;
    let after_opening = &content[fence_start + 3..];

    // Skip the language tag line (e.g. "json\n")
    let body_start_rel = after_opening.find('\n')? + 1;
    let body_start = fence_start + 3 + body_start_rel;

    let closing = content[body_start..].find("```")?;
    let body_end = body_start + closing;

    if body_start >= body_end {
        return None;
    }

    Some(&content[body_start..body_end])
}

/// Extract a balanced JSON object starting at position 0 of `s`.
///
/// Counts `{` / `}` depth, respecting string literals, to find the
/// matching close brace.
fn extract_balanced_object(s: &str) -> Option<&str> {
    if !s.starts_with('{') {
        return None;
    }
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
