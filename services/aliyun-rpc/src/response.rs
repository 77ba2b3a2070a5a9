//! Parsing of RPC response bodies.
//!
//! This is independent from signing. It turns a JSON body into a uniform
//! nested map and decides whether it describes an error.

use rpcsign_core::{Error, Result};
use serde_json::{Map, Value};

/// Parse a JSON response body whose root must be an object.
///
/// Nested objects and arrays are kept as [`Value::Object`] and
/// [`Value::Array`], so callers walk one uniform tree.
pub fn parse_json_body(body: &[u8]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::unexpected("failed to parse response body as json").with_source(e))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::unexpected(format!(
            "response body must be a json object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// ErrorPolicy decides whether a parsed response body is an error.
///
/// The default matches the common RPC convention: a missing body is an
/// error, and a body is an error when it carries a `Code` field. Services
/// that also return `Code` on success can list those codes with
/// [`ErrorPolicy::with_success_code`].
#[derive(Debug, Clone)]
pub struct ErrorPolicy {
    code_field: String,
    success_codes: Vec<String>,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            code_field: "Code".to_string(),
            success_codes: Vec::new(),
        }
    }
}

impl ErrorPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another field as the error code.
    pub fn with_code_field(mut self, field: &str) -> Self {
        self.code_field = field.to_string();
        self
    }

    /// Treat `code` as success.
    pub fn with_success_code(mut self, code: &str) -> Self {
        self.success_codes.push(code.to_string());
        self
    }

    /// Returns the error code of `body` if it has one.
    ///
    /// Non-string codes are rendered as their JSON text; `null` counts as absent.
    pub fn error_code(&self, body: &Map<String, Value>) -> Option<String> {
        let code = match body.get(&self.code_field)? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            v => v.to_string(),
        };

        if self.success_codes.contains(&code) {
            None
        } else {
            Some(code)
        }
    }

    /// Check whether `body` describes an error.
    pub fn has_error(&self, body: Option<&Map<String, Value>>) -> bool {
        match body {
            None => true,
            Some(body) => self.error_code(body).is_some(),
        }
    }
}
