//! Common imports for consumers of the codec.

pub use crate::error::{CodecError, Result};
pub use crate::graph::{
    TransferCounts, ZoneGraph, ZoneNode, remove_duplicated_counterparties,
};
pub use crate::navigation::{
    HistoryState, Location, MemoryHistory, Navigator, RouteConfig,
    ZoneDetailsController,
};
pub use crate::query::{
    QueryDefaults, QueryState, build_navigation_query, parse_navigation_query,
    parse_navigation_query_with,
};
pub use crate::ranking::{RankedZone, rank_zones};
pub use crate::selection::{
    TargetSelection, build_selection_query, reconcile_targets,
};
pub use crate::sorting::{
    from_column_key, query_for_sort_change, sort_descriptor, to_sort_descriptor,
};

pub use zonemap_model::prelude::*;
