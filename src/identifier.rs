//! Identifier and timestamp helpers shared by every registry.

use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use crate::error::RepositoryError;

/// Parses a caller supplied identifier, naming the entity kind in the error.
pub fn parse_id(kind: &str, raw: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| RepositoryError::invalid_argument(format!("invalid {} ID {}", kind, raw)))
}

/// Parses an optional identifier; empty strings count as absent.
pub fn parse_optional_id(kind: &str, raw: Option<&str>) -> Result<Option<Uuid>, RepositoryError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_id(kind, value).map(Some),
        None => Ok(None),
    }
}

/// Fresh identifier for a new record.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Current UTC time in the column representation used by every table.
pub fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}
