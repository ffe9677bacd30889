//! Typed validation of `POST /query-schemes` request bodies.
//!
//! The body is parsed as JSON and each required field is checked for
//! presence and type. Every problem is reported, not just the first, so a
//! client sees all field errors in one 422 response.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::QueryRequest;

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldIssue {
    Missing {
        field: String,
    },
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldIssue::Missing { field } => write!(f, "missing required field: {}", field),
            FieldIssue::WrongType {
                field,
                expected,
                found,
            } => write!(
                f,
                "field '{}' must be of type '{}', got {}",
                field, expected, found
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("content type must be application/json, got '{0}'")]
    UnsupportedContentType(String),
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(String),
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("{}", join_issues(.0))]
    Fields(Vec<FieldIssue>),
}

impl ValidationError {
    /// Field-level details; empty for body-level failures.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ValidationError::Fields(issues) => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts an absent content type, `application/json`, and `+json`
/// media types such as `application/merge-patch+json`. Parameters like
/// `charset` are ignored.
pub fn check_content_type(content_type: Option<&str>) -> Result<(), ValidationError> {
    let Some(raw) = content_type else {
        return Ok(());
    };
    let mime = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    let structured_json = mime.starts_with("application/") && mime.ends_with("+json");
    if mime == "application/json" || structured_json {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedContentType(raw.to_string()))
    }
}

/// Parses and validates a raw request body into a [`QueryRequest`].
/// Unknown fields are ignored.
pub fn parse_query_request(body: &[u8]) -> Result<QueryRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
    validate_query_request(&value)
}

pub fn validate_query_request(value: &Value) -> Result<QueryRequest, ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_type_name(value)))?;

    let mut issues = Vec::new();
    let language = required_string(obj, "language", &mut issues);
    let text = required_string(obj, "text", &mut issues);

    match (language, text) {
        (Some(language), Some(text)) if issues.is_empty() => Ok(QueryRequest { language, text }),
        _ => Err(ValidationError::Fields(issues)),
    }
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match obj.get(field) {
        None => {
            issues.push(FieldIssue::Missing {
                field: field.to_string(),
            });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::WrongType {
                field: field.to_string(),
                expected: "string",
                found: json_type_name(other),
            });
            None
        }
    }
}
