//! Error types.
//!
//! Two kinds matter to callers:
//! - [`ValidationError`]: the request itself is out of bounds (bad pool, bad draw size).
//! - [`DomainError`]: the combinatorial math disagrees with itself. A well-formed caller
//!   never sees one; treat it as a bug.

use serde::Serialize;
use thiserror::Error;

use crate::store::SetId;

/// Internal invariant violations in the combinatorial core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("draw size {k} is larger than the pool size {n}")]
    InvalidDrawSize { n: usize, k: usize },

    #[error("C({n}, {k}) does not fit in 128 bits")]
    CountOverflow { n: usize, k: usize },

    #[error("combination index {index} out of range (total {total})")]
    IndexOutOfRange { index: u128, total: u128 },

    #[error("invalid combination for C({n}, {k}): {reason}")]
    InvalidCombination {
        n: usize,
        k: usize,
        reason: &'static str,
    },

    #[error("refusing to enumerate {count} combinations (limit {limit})")]
    EnumerationTooLarge { count: u128, limit: usize },

    #[error("enumerated {got} combinations, expected {expected}")]
    EnumerationMismatch { expected: u128, got: usize },
}

/// Caller-supplied input outside the accepted bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pool must have between {min} and {max} distinct numbers (got {got})")]
    PoolSize { min: usize, max: usize, got: usize },

    #[error("invalid draw size {k} for a pool of {n} numbers")]
    InvalidDrawSize { n: usize, k: usize },

    #[error("invalid combination count for C({n}, {k})")]
    InvalidCombinationCount { n: usize, k: usize },

    #[error("draw must have {expected} distinct numbers in {min}..={max} (got {got:?})")]
    InvalidDraw {
        expected: usize,
        min: u32,
        max: u32,
        got: Vec<i64>,
    },

    #[error("unknown lottery: {0}")]
    UnknownLottery(String),
}

/// Configuration errors, returned by `Config::load` on their own.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Top-level error returned by the service layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("set not found: {0}")]
    SetNotFound(SetId),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl Error {
    /// HTTP status a route handler should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::SetNotFound(_) => 404,
            Self::Domain(_) | Self::Storage(_) => 500,
        }
    }

    /// `{ "error": "..." }` body for this error.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type Result<T> = std::result::Result<T, Error>;
