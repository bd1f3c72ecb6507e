//! The verification client: one HTTP call, one status-code contract.
//!
//! Every operation knows which status it must see. Anything else aborts the
//! calling scenario with [`ContractError::StatusMismatch`], so scenarios never
//! need to look at status codes themselves.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SuiteConfig;
use crate::error::ContractError;
use crate::protocol::{ErrorBody, Outcome};

/// Longest body excerpt carried in a status-mismatch error.
const MAX_BODY_EXCERPT: usize = 256;

/// The kind of call, which fixes its status-code contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Create,
    Update,
    Delete,
    Authenticate,
}

impl CallKind {
    pub fn method(self) -> Method {
        match self {
            Self::Read => Method::GET,
            Self::Create | Self::Authenticate => Method::POST,
            Self::Update => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }

    pub fn success_status(self) -> StatusCode {
        match self {
            Self::Read | Self::Update | Self::Authenticate => StatusCode::OK,
            Self::Create => StatusCode::CREATED,
            Self::Delete => StatusCode::NO_CONTENT,
        }
    }

    /// Status of an expected rejection, for kinds tested on both paths.
    pub fn rejection_status(self) -> Option<StatusCode> {
        match self {
            Self::Create | Self::Authenticate => Some(StatusCode::BAD_REQUEST),
            Self::Read | Self::Update | Self::Delete => None,
        }
    }

    fn accepts(self, status: StatusCode) -> bool {
        status == self.success_status() || Some(status) == self.rejection_status()
    }
}

/// One outgoing call. Built per call and dropped once sent.
#[derive(Debug, Clone)]
pub struct RequestDescriptor<'a> {
    pub kind: CallKind,
    pub path: &'a str,
    pub payload: Option<Value>,
}

/// Status plus decoded body of a call that honoured its contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Exchange {
    fn context(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    pub fn into_body(self) -> Result<Value, ContractError> {
        let context = self.context();
        self.body.ok_or(ContractError::EmptyBody { context })
    }

    /// Decode the body into a typed model.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ContractError> {
        let context = self.context();
        let body = self.into_body()?;
        serde_json::from_value(body).map_err(|source| ContractError::Decode { context, source })
    }

    /// Require an absent body, as a 204 carries none.
    pub fn into_empty(self) -> Result<(), ContractError> {
        let context = self.context();
        match self.body {
            None => Ok(()),
            Some(body) => Err(ContractError::expectation(
                format!("{} body", context),
                "no content",
                body,
            )),
        }
    }

    fn into_outcome(self, success: StatusCode) -> Result<Outcome<Value>, ContractError> {
        let path = self.path.clone();
        let outcome = if self.status == success {
            Outcome::Success(self.into_body()?)
        } else {
            Outcome::Rejected(self.decode::<ErrorBody>()?)
        };
        debug!(path = %path, outcome = %outcome.kind(), "contract outcome");
        Ok(outcome)
    }
}

/// HTTP client bound to one base endpoint.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerificationClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, ContractError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(ContractError::ClientBuild)?;

        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &SuiteConfig) -> Result<Self, ContractError> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path`, requires 200.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ContractError> {
        self.send(CallKind::Read, path, None).await?.decode()
    }

    pub async fn get_value(&self, path: &str) -> Result<Value, ContractError> {
        self.send(CallKind::Read, path, None).await?.into_body()
    }

    /// `POST path`, 201 on success, 400 on rejection.
    pub async fn create<T, P>(&self, path: &str, payload: &P) -> Result<Outcome<T>, ContractError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.create_value(path, payload).await?.try_map(decode_value(path))
    }

    pub async fn create_value<P>(&self, path: &str, payload: &P) -> Result<Outcome<Value>, ContractError>
    where
        P: Serialize + ?Sized,
    {
        self.send(CallKind::Create, path, Some(encode(payload)?))
            .await?
            .into_outcome(CallKind::Create.success_status())
    }

    /// `PUT path`, requires 200.
    pub async fn update<T, P>(&self, path: &str, payload: &P) -> Result<T, ContractError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.send(CallKind::Update, path, Some(encode(payload)?))
            .await?
            .decode()
    }

    pub async fn update_value<P>(&self, path: &str, payload: &P) -> Result<Value, ContractError>
    where
        P: Serialize + ?Sized,
    {
        self.send(CallKind::Update, path, Some(encode(payload)?))
            .await?
            .into_body()
    }

    /// `DELETE path`, requires 204 with no body. A 404 surfaces as a status
    /// mismatch whose [`ContractError::status`] the caller can inspect.
    pub async fn remove(&self, path: &str) -> Result<(), ContractError> {
        self.send(CallKind::Delete, path, None).await?.into_empty()
    }

    /// `POST` to an auth path, 200 on success, 400 on rejection.
    pub async fn authenticate<T, P>(&self, path: &str, credentials: &P) -> Result<Outcome<T>, ContractError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.authenticate_value(path, credentials)
            .await?
            .try_map(decode_value(path))
    }

    pub async fn authenticate_value<P>(&self, path: &str, credentials: &P) -> Result<Outcome<Value>, ContractError>
    where
        P: Serialize + ?Sized,
    {
        self.send(CallKind::Authenticate, path, Some(encode(credentials)?))
            .await?
            .into_outcome(CallKind::Authenticate.success_status())
    }

    async fn send(&self, kind: CallKind, path: &str, payload: Option<Value>) -> Result<Exchange, ContractError> {
        self.exchange(RequestDescriptor { kind, path, payload }).await
    }

    /// Perform one call and enforce its status contract. Attempted exactly
    /// once; there is no retry.
    pub async fn exchange(&self, request: RequestDescriptor<'_>) -> Result<Exchange, ContractError> {
        let method = request.kind.method();
        let path = request.path.to_string();
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|source| ContractError::Transport {
            method: method.clone(),
            path: path.clone(),
            status: source.status(),
            source,
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ContractError::Transport {
            method: method.clone(),
            path: path.clone(),
            status: Some(status),
            source,
        })?;

        debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "exchange complete"
        );

        if !request.kind.accepts(status) {
            let expected = request.kind.success_status();
            let alternative = request.kind.rejection_status();
            warn!(
                %method,
                path = %path,
                expected = expected.as_u16(),
                alternative = alternative.map(|code| code.as_u16()),
                actual = status.as_u16(),
                "status mismatch"
            );
            return Err(ContractError::StatusMismatch {
                method,
                path,
                expected,
                alternative,
                actual: status,
                body: excerpt(&bytes),
            });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            let context = format!("{method} {path}");
            Some(
                serde_json::from_slice(&bytes)
                    .map_err(|source| ContractError::Decode { context, source })?,
            )
        };

        Ok(Exchange {
            method,
            path,
            status,
            body,
        })
    }
}

fn encode<P: Serialize + ?Sized>(payload: &P) -> Result<Value, ContractError> {
    serde_json::to_value(payload).map_err(ContractError::Encode)
}

fn decode_value<T: DeserializeOwned>(path: &str) -> impl FnOnce(Value) -> Result<T, ContractError> + '_ {
    move |body| {
        serde_json::from_value(body).map_err(|source| ContractError::Decode {
            context: format!("POST {path}"),
            source,
        })
    }
}

fn excerpt(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    match text.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => Some(format!("{}...", &text[..cut])),
        None => Some(text.to_string()),
    }
}
