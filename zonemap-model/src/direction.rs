use std::{fmt, str::FromStr};

use crate::error::ModelError;

/// Which transfer outcome a leaderboard metric counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    #[default]
    Success,
    Failed,
}

impl Direction {
    pub const FAILED_MARKER: &'static str = "failed";

    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Success => "success",
            Direction::Failed => "failed",
        }
    }

    /// Suffix appended to a period's column token.
    pub const fn column_suffix(self) -> &'static str {
        match self {
            Direction::Success => "",
            Direction::Failed => "_failed",
        }
    }

    /// Interpret an `orderBy` query value.
    ///
    /// Only `success` selects successful transfers; every other value reads
    /// as failed, the way the dashboard always interpreted the key.
    pub fn from_query_value(raw: &str) -> Self {
        if raw == Direction::Success.as_str() {
            Direction::Success
        } else {
            Direction::Failed
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Direction::Success),
            "failed" => Ok(Direction::Failed),
            other => Err(ModelError::InvalidDirection(other.to_string())),
        }
    }
}
