use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Service the suite targets when `REQRES_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Default timeout for a single HTTP call (10 seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default deadline for a whole scenario (30 seconds).
const DEFAULT_SCENARIO_TIMEOUT_SECS: u64 = 30;

/// Default number of scenarios in flight at once.
const DEFAULT_CONCURRENCY: usize = 4;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Suite configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub scenario_timeout: Duration,
    pub concurrency: usize,
    pub scenario_filter: Option<String>,
    pub schema_dir: Option<PathBuf>,
    pub log_level: String,
}

impl SuiteConfig {
    /// Load configuration from environment.
    ///
    /// - `REQRES_BASE_URL` (optional, default `https://reqres.in/api`)
    /// - `REQRES_REQUEST_TIMEOUT_SECS` (optional, default 10): max seconds per HTTP call
    /// - `REQRES_SCENARIO_TIMEOUT_SECS` (optional, default 30): max seconds per scenario
    /// - `REQRES_CONCURRENCY` (optional, default 4): scenarios in flight
    /// - `REQRES_SCENARIO_FILTER` (optional): run only scenarios whose name or group contains it
    /// - `REQRES_SCHEMA_DIR` (optional): directory of schema files overriding the built-in ones
    /// - `REQRES_LOG` (optional, default `info`): log level when `RUST_LOG` is unset
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SuiteConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("REQRES_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(format!("REQRES_BASE_URL must be an http(s) URL, got `{base_url}`"));
        }

        let request_timeout_secs: u64 =
            parse_var(&lookup, "REQRES_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let scenario_timeout_secs: u64 =
            parse_var(&lookup, "REQRES_SCENARIO_TIMEOUT_SECS", DEFAULT_SCENARIO_TIMEOUT_SECS)?;

        let concurrency: usize = parse_var(&lookup, "REQRES_CONCURRENCY", DEFAULT_CONCURRENCY)?;
        if concurrency == 0 {
            return Err("REQRES_CONCURRENCY must be at least 1".to_string());
        }

        let scenario_filter = lookup("REQRES_SCENARIO_FILTER").filter(|f| !f.trim().is_empty());
        let schema_dir = lookup("REQRES_SCHEMA_DIR").map(PathBuf::from);
        let log_level = lookup("REQRES_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            scenario_timeout: Duration::from_secs(scenario_timeout_secs),
            concurrency,
            scenario_filter,
            schema_dir,
            log_level,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{key} must be a positive integer")),
        None => Ok(default),
    }
}
