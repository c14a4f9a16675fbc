//! Assertions over [`ApiResponse`]s.
//!
//! Every check returns `Result<_, CaseError>` so that a case reads as a
//! straight sequence of requests and `?`-propagated expectations. A case that
//! cannot establish its precondition returns [`CaseError::Skipped`] instead of
//! failing.
use crate::domain::{ResourceKind, validate_statuses};
use crate::status_page_client::ApiResponse;
use crate::telemetry::error_chain_fmt;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashSet;

pub type CaseResult = Result<(), CaseError>;

/// An expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub check: &'static str,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.check, self.expected, self.actual
        )
    }
}

#[derive(thiserror::Error)]
pub enum CaseError {
    #[error("{0}")]
    Failed(Failure),
    #[error("{0}")]
    Skipped(String),
    #[error("The request could not be completed")]
    Transport(#[from] reqwest::Error),
}

impl std::fmt::Debug for CaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn skip(reason: impl Into<String>) -> CaseError {
    CaseError::Skipped(reason.into())
}

fn fail(check: &'static str, expected: impl ToString, actual: impl ToString) -> CaseError {
    CaseError::Failed(Failure {
        check,
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> CaseResult {
    if response.status == expected {
        Ok(())
    } else {
        Err(fail("status code", expected, response.status))
    }
}

pub fn expect_json(response: &ApiResponse) -> CaseResult {
    if response.is_json() {
        Ok(())
    } else {
        Err(fail(
            "content type",
            "application/json",
            response.content_type.as_deref().unwrap_or("<none>"),
        ))
    }
}

/// 200 with a JSON content type, the baseline for every collection request.
pub fn expect_ok_json(response: &ApiResponse) -> CaseResult {
    expect_status(response, StatusCode::OK)?;
    expect_json(response)
}

/// The body as a collection; anything but a JSON array is a failure.
pub fn records(response: &ApiResponse) -> Result<&[Value], CaseError> {
    response.records().ok_or_else(|| {
        fail(
            "collection body",
            "a JSON array",
            response
                .body
                .as_ref()
                .map(describe_json)
                .unwrap_or_else(|| "a non-JSON body".to_string()),
        )
    })
}

pub fn expect_same_body(left: &ApiResponse, right: &ApiResponse) -> CaseResult {
    if left.body == right.body {
        Ok(())
    } else {
        Err(fail(
            "body equality",
            summarize(left),
            summarize(right),
        ))
    }
}

pub fn expect_different_body(left: &ApiResponse, right: &ApiResponse) -> CaseResult {
    if left.body != right.body {
        Ok(())
    } else {
        Err(fail(
            "body distinctness",
            "two different bodies",
            format!("the same body twice ({})", summarize(left)),
        ))
    }
}

pub fn expect_record_count(response: &ApiResponse, expected: usize) -> CaseResult {
    let actual = records(response)?.len();
    if actual == expected {
        Ok(())
    } else {
        Err(fail(
            "record count",
            format!("{} records", expected),
            format!("{} records", actual),
        ))
    }
}

pub fn expect_record_count_at_most(response: &ApiResponse, max: usize) -> CaseResult {
    let actual = records(response)?.len();
    if actual <= max {
        Ok(())
    } else {
        Err(fail(
            "record count",
            format!("at most {} records", max),
            format!("{} records", actual),
        ))
    }
}

pub fn expect_disjoint_ids(left: &ApiResponse, right: &ApiResponse) -> CaseResult {
    let left_ids: HashSet<&str> = left.ids().into_iter().collect();
    let shared: Vec<&str> = right
        .ids()
        .into_iter()
        .filter(|id| left_ids.contains(id))
        .collect();
    if shared.is_empty() {
        Ok(())
    } else {
        Err(fail("disjoint pages", "no shared ids", shared.join(", ")))
    }
}

pub fn expect_enumerated_statuses(response: &ApiResponse, kind: ResourceKind) -> CaseResult {
    validate_statuses(kind, records(response)?).map_err(|violation| {
        fail(
            "status enumeration",
            format!("one of {}", kind.allowed_statuses().join("|")),
            violation.offending.join(", "),
        )
    })
}

fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(_) => "a boolean".into(),
        Value::Number(_) => "a number".into(),
        Value::String(_) => "a string".into(),
        Value::Array(items) => format!("an array of {}", items.len()),
        Value::Object(_) => "an object".into(),
    }
}

fn summarize(response: &ApiResponse) -> String {
    match response.records() {
        Some(records) => {
            let ids = response.ids();
            format!("{} records [{}]", records.len(), ids.join(", "))
        }
        None => response
            .body
            .as_ref()
            .map(describe_json)
            .unwrap_or_else(|| "no JSON body".to_string()),
    }
}
