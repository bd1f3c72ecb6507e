use std::fmt;

use reqwest::{Method, StatusCode};

use crate::schema::SchemaValidationError;

/// Which side of a two-state contract a call landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Rejected,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Rejected => f.write_str("rejection"),
        }
    }
}

/// Everything that can fail a scenario.
///
/// Each variant is fatal to the enclosing scenario only; the runner records
/// it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// Observed HTTP status differs from the call's contract. `alternative`
    /// is the rejection status, for calls that accept one.
    #[error(
        "{method} {path}: expected status {expected}{}, got {actual}{}",
        alternative_suffix(.alternative),
        body_suffix(.body)
    )]
    StatusMismatch {
        method: Method,
        path: String,
        expected: StatusCode,
        alternative: Option<StatusCode>,
        actual: StatusCode,
        body: Option<String>,
    },

    /// The call honoured its contract, but on the other branch than the
    /// scenario expected (e.g. a login that should succeed was rejected).
    #[error("expected {expected}, got {actual}: {detail}")]
    OutcomeMismatch {
        expected: OutcomeKind,
        actual: OutcomeKind,
        detail: String,
    },

    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The service could not be reached or the exchange broke off.
    #[error("{method} {path}: transport failure{}: {source}", status_suffix(.status))]
    Transport {
        method: Method,
        path: String,
        status: Option<StatusCode>,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: cannot decode response body: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: response body is empty")]
    EmptyBody { context: String },

    #[error("cannot encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// A scenario assertion on the decoded body failed.
    #[error("{field}: expected {expected}, got {actual}")]
    Expectation {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("cannot build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ContractError {
    pub fn expectation(
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::Expectation {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// HTTP status observed by the failing call, if the service answered.
    ///
    /// `None` means the service was never reached (or the failure is not
    /// tied to a single response).
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::StatusMismatch { actual, .. } => Some(*actual),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

fn alternative_suffix(alternative: &Option<StatusCode>) -> String {
    match alternative {
        Some(code) => format!(" or {code}"),
        None => String::new(),
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) if !text.is_empty() => format!(" (body: {text})"),
        _ => String::new(),
    }
}

fn status_suffix(status: &Option<StatusCode>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}
