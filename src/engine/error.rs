use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::DATE_FORMAT;
use crate::store::StoreError;

#[derive(Debug)]
pub enum EngineError {
    InvalidDate(String),
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    NotFound {
        entity: &'static str,
        id: String,
    },
    Conflict(Ulid),
    StorageUnavailable,
    Invalid(&'static str),
    LimitExceeded(&'static str),
    Storage(String),
}

impl EngineError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidDate(raw) => {
                write!(f, "invalid date {raw:?}, use YYYY-MM-DD")
            }
            EngineError::InvalidRange { check_in, check_out } => write!(
                f,
                "check-out {} must be after check-in {}",
                check_out.format(DATE_FORMAT),
                check_in.format(DATE_FORMAT)
            ),
            EngineError::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            EngineError::Conflict(id) => {
                write!(f, "selected dates overlap with existing booking {id}")
            }
            EngineError::StorageUnavailable => write!(f, "storage not configured"),
            EngineError::Invalid(msg) => write!(f, "invalid request: {msg}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Storage(err.to_string())
    }
}
