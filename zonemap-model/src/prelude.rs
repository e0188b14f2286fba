//! Presentation-facing snapshot of the types surface.
//! Prefer importing from this module when wiring the leaderboard table or
//! the routing layer.

pub use super::direction::Direction;
pub use super::error::ModelError;
pub use super::ids::ZoneId;
pub use super::period::{Period, PeriodHours, PeriodParam};
pub use super::sort::{ColumnKey, SortChange, SortDescriptor, SortOrder};
