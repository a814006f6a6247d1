use serde::{Deserialize, Serialize};

use crate::provider::{ProviderId, ResolveError};
use crate::ValidationError;

/// Standard response envelope for machine-readable `mdq` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(meta: EnvelopeMeta, data: T, errors: Vec<EnvelopeError>) -> Self {
        Self { meta, data, errors }
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: String,
    pub provider: ProviderId,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        generated_at: impl Into<String>,
        provider: ProviderId,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let request_id = request_id.into();
        if request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        Ok(Self {
            request_id,
            generated_at: generated_at.into(),
            provider,
            latency_ms,
            warnings: Vec::new(),
        })
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Structured error payload for failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl From<&ResolveError> for EnvelopeError {
    fn from(error: &ResolveError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
            retryable: error.retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("abc", "2026-08-30", ProviderId::Meff, 3)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRequestId));
    }

    #[test]
    fn envelope_error_carries_resolve_error_code() {
        let resolve = ResolveError::no_data("nothing recorded");
        let error = EnvelopeError::from(&resolve);
        assert_eq!(error.code, "resolve.no_data");
        assert!(!error.retryable);
    }

    #[test]
    fn successful_envelope_omits_the_errors_key() {
        let meta =
            EnvelopeMeta::new("req-0001", "2013-06-03T18:00:00Z", ProviderId::Meff, 3)
                .expect("meta should build");
        let envelope = Envelope::success(meta, 28.06);

        let rendered = serde_json::to_string(&envelope).expect("must serialize");
        assert!(!rendered.contains("\"errors\""));
        assert!(rendered.contains("\"request_id\":\"req-0001\""));
    }

    #[test]
    fn failed_envelope_renders_its_errors() {
        let meta =
            EnvelopeMeta::new("req-0002", "2013-06-03T18:00:00Z", ProviderId::Meff, 3)
                .expect("meta should build");
        let resolve = ResolveError::connectivity("upstream unreachable");
        let envelope =
            Envelope::with_errors(meta, (), vec![EnvelopeError::from(&resolve)]);

        let rendered = serde_json::to_string(&envelope).expect("must serialize");
        assert!(rendered.contains("\"code\":\"resolve.connectivity\""));
        assert!(rendered.contains("\"retryable\":true"));
    }
}
