//! Sort state exchanged with the leaderboard table.

use std::{fmt, str::FromStr};

use crate::{direction::Direction, error::ModelError, period::Period};

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    #[cfg_attr(feature = "serde", serde(rename = "asc"))]
    Ascending,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "desc"))]
    Descending,
}

impl SortOrder {
    pub const fn from_descending(desc: bool) -> Self {
        if desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub const fn is_descending(self) -> bool {
        matches!(self, SortOrder::Descending)
    }

    /// Interpret a `sortOrder` query value: `desc` (any case) or
    /// `descending` sorts descending, anything else ascending.
    pub fn from_query_value(raw: &str) -> Self {
        let descending = raw.eq_ignore_ascii_case("desc")
            || raw.eq_ignore_ascii_case("descending");
        SortOrder::from_descending(descending)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(ModelError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Identifier of a sortable leaderboard column, e.g. `ibc_tx_7d_failed`.
///
/// Keys arriving from the table are untrusted strings; only the codec decides
/// whether one names a known column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ColumnKey(String);

impl ColumnKey {
    /// Build the canonical key for a period/direction pair.
    pub fn for_metric(period: Period, direction: Direction) -> Self {
        ColumnKey(format!(
            "{}{}",
            period.column_token(),
            direction.column_suffix()
        ))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        ColumnKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Initial sort handed to the table: `{ id, desc }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortDescriptor {
    pub id: ColumnKey,
    pub desc: bool,
}

impl SortDescriptor {
    pub fn new(id: ColumnKey, desc: bool) -> Self {
        Self { id, desc }
    }

    pub fn is_descending(&self) -> bool {
        self.desc
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_descending(self.desc)
    }
}

/// Sort-change event emitted by the table when the user clicks a header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SortChange {
    pub id: ColumnKey,
    pub is_sorted_desc: bool,
}

impl SortChange {
    pub fn new(id: impl Into<String>, is_sorted_desc: bool) -> Self {
        Self {
            id: ColumnKey::from_raw(id),
            is_sorted_desc,
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_descending(self.is_sorted_desc)
    }
}
