//! Core data model definitions shared across zonemap crates.
#![allow(missing_docs)]

pub mod direction;
pub mod error;
pub mod ids;
pub mod period;
pub mod prelude;
pub mod sort;

pub use direction::Direction;
pub use error::{ModelError, Result as ModelResult};
pub use ids::ZoneId;
pub use period::{Period, PeriodHours, PeriodParam};
pub use sort::{ColumnKey, SortChange, SortDescriptor, SortOrder};
