use serde::{Deserialize, Serialize};

use crate::error::{ContractError, OutcomeKind};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
}

/// Successful `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: u64,
    pub token: String,
}

/// Body the service sends with a 400.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// One page of a listing (`/unknown`, `/users?page=N`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

/// Envelope around a single record (`/unknown/{id}`, `/users/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Single<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

/// Entry of the generic "resources" collection (served under `/unknown`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub year: i32,
    pub color: String,
    pub pantone_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

// ---------------------------------------------------------------------------
// User writes
// ---------------------------------------------------------------------------

/// Response to `POST /users`. The service assigns `id` as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response to `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedUser {
    pub name: String,
    pub job: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Two-state outcome
// ---------------------------------------------------------------------------

/// Result of a call whose contract allows both a success and a rejection
/// status (login, registration, creation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Rejected(ErrorBody),
}

impl<T> Outcome<T> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::Rejected(_) => OutcomeKind::Rejected,
        }
    }

    pub fn into_success(self) -> Result<T, ContractError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Rejected(rejection) => Err(ContractError::OutcomeMismatch {
                expected: OutcomeKind::Success,
                actual: OutcomeKind::Rejected,
                detail: rejection.error,
            }),
        }
    }

    pub fn into_rejected(self) -> Result<ErrorBody, ContractError> {
        match self {
            Self::Rejected(rejection) => Ok(rejection),
            Self::Success(_) => Err(ContractError::OutcomeMismatch {
                expected: OutcomeKind::Rejected,
                actual: OutcomeKind::Success,
                detail: "request was accepted".into(),
            }),
        }
    }

    /// Convert the success body, leaving a rejection untouched.
    pub fn try_map<U, F>(self, f: F) -> Result<Outcome<U>, ContractError>
    where
        F: FnOnce(T) -> Result<U, ContractError>,
    {
        match self {
            Self::Success(body) => Ok(Outcome::Success(f(body)?)),
            Self::Rejected(rejection) => Ok(Outcome::Rejected(rejection)),
        }
    }
}
