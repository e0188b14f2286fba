use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Hour count that is not one of the canonical periods.
    InvalidPeriod(u32),
    /// `period` text that is not a number of hours.
    UnparsedPeriod(String),
    /// `orderBy` token that names neither successful nor failed transfers.
    InvalidDirection(String),
    /// `sortOrder` token other than `asc` / `desc`.
    InvalidSortOrder(String),
    EmptyZoneId,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidPeriod(hours) => {
                write!(f, "invalid period: {hours}h is not a canonical period")
            }
            ModelError::UnparsedPeriod(raw) => {
                write!(f, "invalid period: {raw:?} is not a number of hours")
            }
            ModelError::InvalidDirection(raw) => {
                write!(f, "invalid transfer direction: {raw:?}")
            }
            ModelError::InvalidSortOrder(raw) => {
                write!(f, "invalid sort order: {raw:?}")
            }
            ModelError::EmptyZoneId => write!(f, "zone id cannot be empty"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
