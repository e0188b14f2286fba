//! # Zonemap Core
//!
//! URL-state codec for the zone details leaderboard of the IBC zone map.
//!
//! The zone details view shows, for one source zone, the counterparties it
//! exchanged IBC transfers with. Its whole state lives in the URL query
//! string so that a view can be bookmarked and shared:
//!
//! ```text
//! /zone?period=168&orderBy=failed&sortOrder=asc&source=cosmoshub-4&targets=osmosis-1,juno-1
//! ```
//!
//! ## Architecture
//!
//! - [`sorting`]: mapping between `(period, direction, order)` and the
//!   leaderboard's column sort descriptor
//! - [`query`]: parsing and building the query string
//! - [`selection`]: collapsing a counterparty selection to "all" or a subset
//! - [`graph`]: the zone statistics payload the selection is checked against
//! - [`ranking`]: ordering counterparties by a sort descriptor
//! - [`navigation`]: the controller that turns UI events into history pushes
//!
//! ## Example
//!
//! ```
//! use zonemap_core::{
//!     query::parse_navigation_query,
//!     sorting::query_for_sort_change,
//! };
//! use zonemap_model::SortChange;
//!
//! let state =
//!     parse_navigation_query("source=cosmoshub&period=168&orderBy=failed")?;
//! let sort = state.sort_descriptor()?;
//! assert_eq!(sort.id.as_str(), "ibc_tx_7d_failed");
//! assert!(sort.desc);
//!
//! let next = query_for_sort_change(
//!     &SortChange::new("ibc_tx_30d", false),
//!     state.source.as_ref(),
//! )?;
//! assert_eq!(
//!     next,
//!     "period=720&orderBy=success&sortOrder=asc&source=cosmoshub"
//! );
//! # Ok::<(), zonemap_core::error::CodecError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Codec error types
pub mod error;

/// Zone statistics graph payload
pub mod graph;

/// Zone details navigation controller and history abstraction
pub mod navigation;

pub mod prelude;

/// Query-string parsing and building
pub mod query;

/// Leaderboard ordering
pub mod ranking;

/// Counterparty selection reconciliation
pub mod selection;

/// Sort descriptor mapping
pub mod sorting;

pub use error::{CodecError, Result};
