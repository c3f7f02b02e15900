//! # Request Schemas
//!
//! Wire payloads for the book endpoints and their validation into the
//! storage-side shapes in [`super::model`].
//!
//! Validation collects every failing field instead of stopping at the first one,
//! so a client sees all problems in one round trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::model::{BookChanges, BookListQuery, NewBook, MAX_TITLE_CHARS};

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field failures of one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_fields(.fields))]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Check a title against the column rules. Returns the failure message, if any.
pub fn check_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return Some("must not be empty".to_string());
    }
    let chars = title.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Some(format!(
            "must be at most {} characters (got {})",
            MAX_TITLE_CHARS, chars
        ));
    }
    None
}

/// Take a supplied field as a string. `null` counts as not supplied; any other
/// non-string value is recorded against `field`.
fn string_field(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Value>,
) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Null => None,
        _ => {
            errors.push(field, "must be a string");
            None
        }
    }
}

/// Body of `POST /books/`
///
/// Fields are kept as raw JSON so a wrong-typed value becomes a field error
/// rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl CreateBookRequest {
    pub fn validate(self) -> Result<NewBook, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let supplied = self.title.as_ref().is_some_and(|v| !v.is_null());
        let title = match string_field(&mut errors, "title", self.title) {
            Some(title) => {
                if let Some(message) = check_title(&title) {
                    errors.push("title", message);
                }
                title
            }
            None => {
                if !supplied {
                    errors.push("title", "field required");
                }
                String::new()
            }
        };
        let description = string_field(&mut errors, "description", self.description);

        errors.into_result(NewBook { title, description })
    }
}

/// Body of `PUT /books/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl UpdateBookRequest {
    pub fn validate(self) -> Result<BookChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = string_field(&mut errors, "title", self.title);
        if let Some(message) = title.as_deref().and_then(check_title) {
            errors.push("title", message);
        }
        let description = string_field(&mut errors, "description", self.description);

        errors.into_result(BookChanges { title, description })
    }
}

/// Query string of `GET /books/`
///
/// Numbers are parsed signed so that `skip=-1` reports a range error
/// instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksParams {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ListBooksParams {
    pub fn validate(self) -> Result<BookListQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let skip = self.skip.unwrap_or(0);
        if skip < 0 || skip > i64::from(u32::MAX) {
            errors.push("skip", "must be greater than or equal to 0");
        }

        let limit = self.limit.unwrap_or(i64::from(BookListQuery::DEFAULT_LIMIT));
        if !(1..=i64::from(BookListQuery::MAX_LIMIT)).contains(&limit) {
            errors.push(
                "limit",
                format!("must be between 1 and {}", BookListQuery::MAX_LIMIT),
            );
        }

        let title_contains = self.title.filter(|t| !t.is_empty());

        errors.into_result(BookListQuery {
            skip: skip.clamp(0, i64::from(u32::MAX)) as u32,
            limit: limit.clamp(1, i64::from(BookListQuery::MAX_LIMIT)) as u32,
            title_contains,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> Result<NewBook, ValidationErrors> {
        serde_json::from_value::<CreateBookRequest>(body)
            .unwrap()
            .validate()
    }

    #[test]
    fn test_create_accepts_title_only() {
        let book = create(json!({"title": "Dune"})).unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.description.is_none());
    }

    #[test]
    fn test_create_reports_missing_title() {
        let err = create(json!({"description": "no title"})).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "title");
        assert_eq!(err.fields[0].message, "field required");
    }

    #[test]
    fn test_create_rejects_blank_and_long_titles() {
        assert!(create(json!({"title": ""})).is_err());
        assert!(create(json!({"title": "   "})).is_err());

        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        let err = create(json!({ "title": long })).unwrap_err();
        assert!(err.fields[0].message.contains("200"));

        let exact = "é".repeat(MAX_TITLE_CHARS);
        assert!(create(json!({ "title": exact })).is_ok());
    }

    #[test]
    fn test_create_reports_wrong_typed_fields() {
        let err = create(json!({"title": 42})).unwrap_err();
        assert_eq!(err.fields, vec![FieldError::new("title", "must be a string")]);

        let err = create(json!({"title": "Dune", "description": ["spice"]})).unwrap_err();
        assert_eq!(err.fields, vec![FieldError::new("description", "must be a string")]);

        let err = create(json!({"title": null, "description": false})).unwrap_err();
        let fields: Vec<_> = err.fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);
        assert_eq!(err.fields[0].message, "field required");
    }

    #[test]
    fn test_update_reports_wrong_typed_fields() {
        let err = serde_json::from_value::<UpdateBookRequest>(json!({"title": {"x": 1}}))
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err.fields, vec![FieldError::new("title", "must be a string")]);

        let changes = serde_json::from_value::<UpdateBookRequest>(json!({"title": null}))
            .unwrap()
            .validate()
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_allows_partial_payloads() {
        let changes = serde_json::from_value::<UpdateBookRequest>(json!({"description": "new"}))
            .unwrap()
            .validate()
            .unwrap();
        assert!(changes.title.is_none());
        assert_eq!(changes.description.as_deref(), Some("new"));

        let changes = serde_json::from_value::<UpdateBookRequest>(json!({}))
            .unwrap()
            .validate()
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let err = serde_json::from_value::<UpdateBookRequest>(json!({"title": ""}))
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err.fields[0].field, "title");
    }

    #[test]
    fn test_list_params_defaults_and_bounds() {
        let query = ListBooksParams::default().validate().unwrap();
        assert_eq!(query, BookListQuery::default());

        let params = ListBooksParams {
            skip: Some(-1),
            limit: Some(101),
            title: None,
        };
        let err = params.validate().unwrap_err();
        let fields: Vec<_> = err.fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["skip", "limit"]);

        let params = ListBooksParams {
            skip: Some(5),
            limit: Some(100),
            title: Some(String::new()),
        };
        let query = params.validate().unwrap();
        assert_eq!(query.skip, 5);
        assert_eq!(query.limit, 100);
        assert!(query.title_contains.is_none());
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.push("title", "field required");
        errors.push("limit", "must be between 1 and 100");
        let message = errors.to_string();
        assert!(message.contains("title: field required"));
        assert!(message.contains("limit: must be between 1 and 100"));
    }
}
