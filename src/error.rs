//! Error types for the diagram endpoints.
//!
//! Every failure is converted into a JSON error envelope at the handler
//! boundary; the transport layer always answers 200 and callers detect
//! failure by the presence of an "error" key.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::LlmError;

/// Failures a diagram request can hit on its way through the pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The completion API call itself failed (network, auth, quota, bad
    /// response shape). Not retried.
    #[error("{0}")]
    RemoteCall(String),

    /// No balanced brace-delimited span was found in the model output.
    /// Carries the full output so the caller can see what the model said.
    #[error("Unable to extract JSON from model output.")]
    Extraction { raw: String },

    /// A candidate span was found but is not valid JSON.
    #[error("Failed to parse model output as JSON: {0}")]
    Parse(String),

    /// The diagram could not be serialized back to text for the prompt.
    #[error("Failed to serialize diagram for prompt: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::RemoteCall(err.to_string())
    }
}

/// Body shape returned in place of a success payload.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ApiError {
    pub fn into_envelope(self) -> ErrorEnvelope {
        match self {
            ApiError::Extraction { raw } => ErrorEnvelope {
                error: "Unable to extract JSON from model output.".to_string(),
                raw: Some(raw),
            },
            other => ErrorEnvelope {
                error: other.to_string(),
                raw: None,
            },
        }
    }
}

impl ErrorEnvelope {
    /// Infallible conversion to a JSON body.
    pub fn into_value(self) -> Value {
        let mut body = json!({ "error": self.error });
        if let Some(raw) = self.raw {
            body["raw"] = Value::String(raw);
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_envelope_carries_raw_output() {
        let err = ApiError::Extraction {
            raw: "no json here".to_string(),
        };
        let body = err.into_envelope().into_value();
        assert_eq!(body["error"], "Unable to extract JSON from model output.");
        assert_eq!(body["raw"], "no json here");
    }

    #[test]
    fn remote_call_envelope_omits_raw() {
        let err = ApiError::RemoteCall("connection refused".to_string());
        let body = err.into_envelope().into_value();
        assert_eq!(body["error"], "connection refused");
        assert!(body.get("raw").is_none());
    }
}
