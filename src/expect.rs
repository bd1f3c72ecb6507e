//! Assertions scenarios run against decoded bodies.
//!
//! Each check returns `Err(ContractError::Expectation)` naming the field, the
//! expected value and the observed one.

use std::collections::HashSet;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ContractError;

pub static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid hex colour pattern"));

pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

pub static AVATAR_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://.*\.(jpg|jpeg|png|gif|bmp|webp|svg)$").expect("valid avatar pattern")
});

/// JSON primitive kinds a field can be required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Integer,
    Number,
    Object,
    Array,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn equals<T>(field: &str, expected: T, actual: T) -> Result<(), ContractError>
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(ContractError::expectation(field, format!("{expected:?}"), format!("{actual:?}")))
    }
}

pub fn non_empty(field: &str, value: &str) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        Err(ContractError::expectation(field, "a non-empty string", format!("{value:?}")))
    } else {
        Ok(())
    }
}

pub fn non_empty_list<T>(field: &str, items: &[T]) -> Result<(), ContractError> {
    if items.is_empty() {
        Err(ContractError::expectation(field, "at least one entry", "none"))
    } else {
        Ok(())
    }
}

pub fn non_zero(field: &str, value: u64) -> Result<(), ContractError> {
    if value == 0 {
        Err(ContractError::expectation(field, "a non-zero id", 0))
    } else {
        Ok(())
    }
}

pub fn matches(field: &str, pattern: &Regex, value: &str) -> Result<(), ContractError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ContractError::expectation(
            field,
            format!("a value matching /{}/", pattern.as_str()),
            format!("{value:?}"),
        ))
    }
}

pub fn kind(field: &str, value: &Value, expected: JsonKind) -> Result<(), ContractError> {
    if expected.matches(value) {
        Ok(())
    } else {
        Err(ContractError::expectation(field, expected, describe(value)))
    }
}

/// Every name in `fields` must be present on `object`.
pub fn has_fields(field: &str, object: &Value, fields: &[&str]) -> Result<(), ContractError> {
    let Some(map) = object.as_object() else {
        return Err(ContractError::expectation(field, JsonKind::Object, describe(object)));
    };

    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|name| !map.contains_key(*name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ContractError::expectation(
            field,
            format!("fields {fields:?}"),
            format!("missing {missing:?}"),
        ))
    }
}

/// Parse `value` as an RFC 3339 timestamp.
pub fn timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, ContractError> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| ContractError::expectation(field, "an RFC 3339 timestamp", format!("{value:?} ({e})")))
}

/// No value may appear twice.
pub fn unique<I, T>(field: &str, values: I) -> Result<(), ContractError>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Debug,
{
    let mut seen = HashSet::new();
    for value in values {
        if seen.contains(&value) {
            return Err(ContractError::expectation(field, "pairwise distinct values", format!("duplicate {value:?}")));
        }
        seen.insert(value);
    }
    Ok(())
}

/// The call must have failed with 404 Not Found.
pub fn not_found<T>(result: Result<T, ContractError>) -> Result<(), ContractError> {
    match result {
        Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(ContractError::expectation("status", StatusCode::NOT_FOUND, "a successful response")),
    }
}
