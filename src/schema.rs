//! Fixture JSON Schemas and the validator wrapped around them.
//!
//! The schemas under `schemas/` are compiled into the binary. A directory
//! passed to [`SchemaSet::load`] may override any of them by file name.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{validator_for, Validator};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error in `{schema}`: {detail}")]
    SchemaCompile { schema: String, detail: String },
    #[error("Cannot read schema {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Response does not match schema `{schema}`: {}", .violations.join("; "))]
    ValidationFailed {
        schema: String,
        violations: Vec<String>,
    },
}

/// The fixed response shapes the suite checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    Login,
    Register,
    Resources,
    Users,
    CreatedUser,
    UpdatedUser,
}

impl SchemaName {
    pub const ALL: [SchemaName; 6] = [
        SchemaName::Login,
        SchemaName::Register,
        SchemaName::Resources,
        SchemaName::Users,
        SchemaName::CreatedUser,
        SchemaName::UpdatedUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Resources => "resources",
            Self::Users => "users",
            Self::CreatedUser => "created_user",
            Self::UpdatedUser => "updated_user",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }

    fn builtin(self) -> &'static str {
        match self {
            Self::Login => include_str!("../schemas/login.json"),
            Self::Register => include_str!("../schemas/register.json"),
            Self::Resources => include_str!("../schemas/resources.json"),
            Self::Users => include_str!("../schemas/users.json"),
            Self::CreatedUser => include_str!("../schemas/created_user.json"),
            Self::UpdatedUser => include_str!("../schemas/updated_user.json"),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled validators for every [`SchemaName`].
pub struct SchemaSet {
    validators: HashMap<SchemaName, Validator>,
}

impl SchemaSet {
    /// Compile the built-in schemas.
    pub fn builtin() -> Result<Self, SchemaValidationError> {
        Self::load(None)
    }

    /// Compile every schema, preferring `<override_dir>/<name>.json` when it
    /// exists.
    pub fn load(override_dir: Option<&Path>) -> Result<Self, SchemaValidationError> {
        let mut validators = HashMap::new();

        for name in SchemaName::ALL {
            let source = match override_dir.map(|dir| dir.join(name.file_name())) {
                Some(path) if path.is_file() => {
                    debug!(schema = %name, path = %path.display(), "loading schema override");
                    std::fs::read_to_string(&path)
                        .map_err(|source| SchemaValidationError::Io { path, source })?
                }
                _ => name.builtin().to_string(),
            };

            let schema: Value = serde_json::from_str(&source)?;
            let validator = compile(name.as_str(), &schema)?;
            validators.insert(name, validator);
        }

        Ok(Self { validators })
    }

    /// Validate `instance` against the named schema, collecting every
    /// violation rather than stopping at the first.
    pub fn validate(&self, name: SchemaName, instance: &Value) -> Result<(), SchemaValidationError> {
        match self.validators.get(&name) {
            Some(validator) => check(name.as_str(), validator, instance),
            None => Err(SchemaValidationError::SchemaCompile {
                schema: name.to_string(),
                detail: "schema was not loaded".into(),
            }),
        }
    }
}

impl fmt::Debug for SchemaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("SchemaSet").field("schemas", &names).finish()
    }
}

/// Validate a JSON instance against a JSON Schema, both given as text.
/// Returns Ok(()) if valid, Err otherwise.
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;

    let validator = compile("inline", &schema_json)?;
    check("inline", &validator, &instance_json)
}

fn compile(name: &str, schema: &Value) -> Result<Validator, SchemaValidationError> {
    validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile {
        schema: name.to_string(),
        detail: e.to_string(),
    })
}

fn check(name: &str, validator: &Validator, instance: &Value) -> Result<(), SchemaValidationError> {
    let violations: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed {
            schema: name.to_string(),
            violations,
        })
    }
}
