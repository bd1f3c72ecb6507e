//! Contract suite for the reqres REST API.
//!
//! A [`client::VerificationClient`] issues each HTTP call and enforces the
//! status code its kind of call must return. The [`scenarios`] catalogue
//! asserts on the decoded bodies (typed models, JSON Schema conformance,
//! fixture values) and the [`runner::ScenarioRunner`] executes the catalogue
//! concurrently under per-scenario deadlines.
//!
//! See <https://reqres.in> for the service under test.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod expect;
pub mod fixtures;
pub mod protocol;
pub mod runner;
pub mod scenarios;

pub mod schema;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate. Logs go
/// to stderr so stdout carries only the run report.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reqres_contract={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
