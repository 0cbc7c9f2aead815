use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Failure of a single lookup against an external provider.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request could not be sent, timed out, or the body could not be read.
    #[error("Failed to reach {provider}")]
    Network {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: ProviderId,
        status: StatusCode,
        body: String,
    },

    /// Body was not JSON of the expected shape.
    #[error("Failed to parse {provider} JSON")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },

    /// Provider answered but had nothing usable for us.
    #[error("{provider} returned no {what}")]
    EmptyResult { provider: ProviderId, what: String },
}

/// Coarse failure cause, handy for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Status,
    Decode,
    EmptyResult,
}

impl LookupError {
    pub fn empty(provider: ProviderId, what: impl Into<String>) -> Self {
        Self::EmptyResult { provider, what: what.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Network { .. } => ErrorKind::Network,
            LookupError::Status { .. } => ErrorKind::Status,
            LookupError::Decode { .. } => ErrorKind::Decode,
            LookupError::EmptyResult { .. } => ErrorKind::EmptyResult,
        }
    }

    pub fn provider(&self) -> ProviderId {
        match self {
            LookupError::Network { provider, .. }
            | LookupError::Status { provider, .. }
            | LookupError::Decode { provider, .. }
            | LookupError::EmptyResult { provider, .. } => *provider,
        }
    }
}
