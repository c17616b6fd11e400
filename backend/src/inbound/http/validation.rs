//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors reject bad values with typed errors; these helpers
//! turn them into `invalid_request` errors whose details name the offending
//! field and a stable code.

use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{
    Error, GameValidationError, LimitOutOfRange, PlayValidationError, ResultLimit,
    ReviewValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    Blank,
    TooShort,
    TooLong,
    OutOfRange,
    NotFinite,
    Negative,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Blank => "blank",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::NotFinite => "not_finite",
            ErrorCode::Negative => "negative",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn user_validation_error(field: FieldName, err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::BlankUsername => ErrorCode::Blank,
        UserValidationError::UsernameTooShort { .. } => ErrorCode::TooShort,
        UserValidationError::UsernameTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn game_validation_error(field: FieldName, err: &GameValidationError) -> Error {
    let code = match err {
        GameValidationError::BlankGenre | GameValidationError::BlankTitle => ErrorCode::Blank,
        GameValidationError::GenreTooLong { .. } | GameValidationError::TitleTooLong { .. } => {
            ErrorCode::TooLong
        }
    };
    field_error(field, code, err.to_string())
}

fn review_code(err: &ReviewValidationError) -> ErrorCode {
    match err {
        ReviewValidationError::ScoreOutOfRange(_) => ErrorCode::OutOfRange,
        ReviewValidationError::BlankAspect | ReviewValidationError::BlankComment => {
            ErrorCode::Blank
        }
        ReviewValidationError::TextTooLong
        | ReviewValidationError::AspectTooLong
        | ReviewValidationError::CommentTooLong => ErrorCode::TooLong,
    }
}

pub(crate) fn review_validation_error(field: FieldName, err: &ReviewValidationError) -> Error {
    field_error(field, review_code(err), err.to_string())
}

/// Like [`review_validation_error`] for one entry of a list field.
pub(crate) fn indexed_review_validation_error(
    field: FieldName,
    index: usize,
    err: &ReviewValidationError,
) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field.as_str(),
        "index": index,
        "code": review_code(err).as_str(),
    }))
}

pub(crate) fn play_validation_error(field: FieldName, err: &PlayValidationError) -> Error {
    let code = match err {
        PlayValidationError::NotFinite(_) => ErrorCode::NotFinite,
        PlayValidationError::Negative(_) => ErrorCode::Negative,
    };
    field_error(field, code, err.to_string())
}

/// `?limit=N` query shared by the listing endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Maximum number of rows, 1 to 100.
    pub limit: Option<i64>,
}

/// Validate an optional `limit` query parameter.
pub(crate) fn parse_limit(raw: Option<i64>, default: ResultLimit) -> Result<ResultLimit, Error> {
    ResultLimit::or_default(raw, default).map_err(|err: LimitOutOfRange| {
        field_error(FieldName::new("limit"), ErrorCode::OutOfRange, err.to_string())
    })
}
