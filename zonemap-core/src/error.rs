use thiserror::Error;
use zonemap_model::ModelError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid period: {period} is not one of 24, 168 or 720 hours")]
    InvalidPeriod { period: String },

    #[error("unknown leaderboard column: {key}")]
    UnknownColumnKey { key: String },

    #[error("malformed query string: {reason}")]
    MalformedQuery { reason: String },

    #[error("navigation requires a source zone")]
    MissingSource,
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedQuery {
            reason: reason.into(),
        }
    }
}

impl From<ModelError> for CodecError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidPeriod(hours) => CodecError::InvalidPeriod {
                period: hours.to_string(),
            },
            ModelError::UnparsedPeriod(period) => {
                CodecError::InvalidPeriod { period }
            }
            ModelError::InvalidDirection(raw) => CodecError::malformed(
                format!("unrecognised orderBy value {raw:?}"),
            ),
            ModelError::InvalidSortOrder(raw) => CodecError::malformed(
                format!("unrecognised sortOrder value {raw:?}"),
            ),
            ModelError::EmptyZoneId => CodecError::malformed("empty zone id"),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
