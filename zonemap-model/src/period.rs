use std::fmt;

use crate::error::ModelError;

/// Aggregation window for transfer statistics.
///
/// Each member has exactly one canonical hour count, which is also the value
/// carried in the `period` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    /// Canonical periods in switcher order. The first entry is the default.
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub const fn hours(self) -> u32 {
        match self {
            Period::Day => 24,
            Period::Week => 168,
            Period::Month => 720,
        }
    }

    pub const fn from_hours(hours: u32) -> Option<Self> {
        match hours {
            24 => Some(Period::Day),
            168 => Some(Period::Week),
            720 => Some(Period::Month),
            _ => None,
        }
    }

    /// Base leaderboard column token, without the failed-transfer suffix.
    pub const fn column_token(self) -> &'static str {
        match self {
            Period::Day => "ibc_tx_1d",
            Period::Week => "ibc_tx_7d",
            Period::Month => "ibc_tx_30d",
        }
    }

    /// Exact-match lookup of a base column token.
    pub fn from_column_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|period| period.column_token() == token)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::Month => "30d",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<u32> for Period {
    type Error = ModelError;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Period::from_hours(hours).ok_or(ModelError::InvalidPeriod(hours))
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.hours()
    }
}

/// Raw `period` value as it appeared in a URL.
///
/// Parsing keeps whatever hour count the URL carried; it only becomes a
/// [`Period`] when something needs the canonical member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PeriodHours(pub u32);

impl PeriodHours {
    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn resolve(self) -> Result<Period, ModelError> {
        Period::try_from(self.0)
    }

    pub const fn is_canonical(self) -> bool {
        Period::from_hours(self.0).is_some()
    }
}

impl Default for PeriodHours {
    fn default() -> Self {
        Period::default().into()
    }
}

impl From<Period> for PeriodHours {
    fn from(period: Period) -> Self {
        PeriodHours(period.hours())
    }
}

impl fmt::Display for PeriodHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `period` value as it appeared in a URL.
///
/// Numeric values keep their hour count and anything else keeps its text.
/// Neither is checked against the canonical periods until resolved, and both
/// are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum PeriodParam {
    Hours(PeriodHours),
    Unparsed(String),
}

impl PeriodParam {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(hours) => PeriodParam::Hours(PeriodHours(hours)),
            Err(_) => PeriodParam::Unparsed(raw.to_string()),
        }
    }

    pub fn resolve(&self) -> Result<Period, ModelError> {
        match self {
            PeriodParam::Hours(hours) => hours.resolve(),
            PeriodParam::Unparsed(raw) => {
                Err(ModelError::UnparsedPeriod(raw.clone()))
            }
        }
    }
}

impl Default for PeriodParam {
    fn default() -> Self {
        PeriodParam::Hours(PeriodHours::default())
    }
}

impl From<PeriodHours> for PeriodParam {
    fn from(hours: PeriodHours) -> Self {
        PeriodParam::Hours(hours)
    }
}

impl From<Period> for PeriodParam {
    fn from(period: Period) -> Self {
        PeriodParam::Hours(period.into())
    }
}

impl fmt::Display for PeriodParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParam::Hours(hours) => write!(f, "{hours}"),
            PeriodParam::Unparsed(raw) => f.write_str(raw),
        }
    }
}
