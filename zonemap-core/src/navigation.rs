//! Navigation wiring for the zone details view.
//!
//! The controller never touches the browser history itself. It derives the
//! next location from the current [`QueryState`] and hands it to an injected
//! [`Navigator`], which owns the history stack and applies navigations in call
//! order.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zonemap_model::{SortChange, SortDescriptor, ZoneId};

use crate::{
    error::Result,
    graph::ZoneGraph,
    query::{QueryDefaults, QueryState, parse_navigation_query_with},
    selection::{build_selection_query, reconcile_targets},
    sorting::query_for_sort_change,
};

/// Route paths the controller navigates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Zone details view, e.g. `/zone`.
    pub zone: String,
    /// Main map page, e.g. `/`.
    pub home: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            zone: "/zone".to_string(),
            home: "/".to_string(),
        }
    }
}

/// A path plus an optional query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            path: path.into(),
            query: (!query.is_empty()).then_some(query),
        }
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
        }
    }

    /// Split an href such as `/zone?period=24` into path and query.
    pub fn parse(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Location::new(path, query),
            None => Location::path(href),
        }
    }

    pub fn href(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// State attached to a history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    /// Href the user came from; closing the view returns there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_from: Option<String>,
}

/// Routing collaborator. Navigation is fire-and-forget from the caller's
/// point of view.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    fn push(&mut self, location: &Location, state: &HistoryState);
    fn replace(&mut self, location: &Location, state: &HistoryState);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn push(&mut self, location: &Location, state: &HistoryState) {
        (**self).push(location, state);
    }

    fn replace(&mut self, location: &Location, state: &HistoryState) {
        (**self).replace(location, state);
    }
}

/// In-memory history stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<(Location, HistoryState)>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Location, HistoryState)] {
        &self.entries
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.last().map(|(location, _)| location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for MemoryHistory {
    fn push(&mut self, location: &Location, state: &HistoryState) {
        self.entries.push((location.clone(), state.clone()));
    }

    fn replace(&mut self, location: &Location, state: &HistoryState) {
        let entry = (location.clone(), state.clone());
        match self.entries.last_mut() {
            Some(current) => *current = entry,
            None => self.entries.push(entry),
        }
    }
}

/// Drives navigation for one rendered zone details view.
///
/// Holds the state parsed for the current location; a navigation produces a
/// new location and the router builds a fresh controller for it.
#[derive(Debug)]
pub struct ZoneDetailsController<N> {
    query: QueryState,
    routes: RouteConfig,
    history_state: HistoryState,
    navigator: N,
}

impl<N: Navigator> ZoneDetailsController<N> {
    pub fn new(
        query: QueryState,
        routes: RouteConfig,
        history_state: HistoryState,
        navigator: N,
    ) -> Self {
        Self {
            query,
            routes,
            history_state,
            navigator,
        }
    }

    /// Build a controller from the current location's query string.
    pub fn from_search(
        search: &str,
        defaults: &QueryDefaults,
        routes: RouteConfig,
        history_state: HistoryState,
        navigator: N,
    ) -> Result<Self> {
        let query = parse_navigation_query_with(search, defaults)?;
        Ok(Self::new(query, routes, history_state, navigator))
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    /// Initial sort state for the leaderboard table.
    pub fn initial_sort(&self) -> Result<SortDescriptor> {
        self.query.sort_descriptor()
    }

    /// Push the location for a header click in the leaderboard.
    ///
    /// The history state of the current entry is carried over so closing the
    /// view still returns to where the user came from.
    pub fn on_sort_change(&mut self, change: &SortChange) -> Result<Location> {
        let query = query_for_sort_change(change, self.query.source.as_ref())?;
        let location = Location::new(self.routes.zone.clone(), query);
        debug!("Sort change navigates to {}", location);
        self.navigator.push(&location, &self.history_state);
        Ok(location)
    }

    /// Push the location for a new counterparty selection.
    ///
    /// Only `period` and `source` are kept; the sort keys go back to their
    /// defaults on the new location.
    pub fn select_zones(
        &mut self,
        targets: &[ZoneId],
        graph: &ZoneGraph,
    ) -> Result<Location> {
        let source = self.query.require_source()?;
        let selection = reconcile_targets(targets, &graph.nodes);
        let query =
            build_selection_query(&self.query.period, source, &selection);
        let location = Location::new(self.routes.zone.clone(), query);
        debug!("Zone selection navigates to {}", location);
        self.navigator.push(&location, &self.history_state);
        Ok(location)
    }

    pub fn navigate_to_main_page(&mut self) -> Location {
        let location = Location::path(self.routes.home.clone());
        self.navigator.push(&location, &HistoryState::default());
        location
    }

    /// Leave the view: back to the referring page when known, otherwise
    /// replace the current entry with the main page.
    pub fn close(&mut self) -> Location {
        match self.history_state.navigate_from.as_deref() {
            Some(from) => {
                let location = Location::parse(from);
                self.navigator.push(&location, &HistoryState::default());
                location
            }
            None => {
                let location = Location::path(self.routes.home.clone());
                self.navigator.replace(&location, &HistoryState::default());
                location
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use zonemap_model::{PeriodHours, PeriodParam, SortOrder};

    use super::*;
    use crate::{error::CodecError, graph::ZoneNode};

    fn zone(id: &str) -> ZoneId {
        ZoneId::new(id).unwrap()
    }

    fn referrer() -> HistoryState {
        HistoryState {
            navigate_from: Some("/?period=168".to_string()),
        }
    }

    fn controller<N: Navigator>(
        search: &str,
        state: HistoryState,
        navigator: N,
    ) -> ZoneDetailsController<N> {
        ZoneDetailsController::from_search(
            search,
            &QueryDefaults::default(),
            RouteConfig::default(),
            state,
            navigator,
        )
        .unwrap()
    }

    #[test]
    fn sort_change_pushes_with_current_history_state() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(
                eq(Location::new(
                    "/zone",
                    "period=168&orderBy=failed&sortOrder=asc&source=cosmoshub",
                )),
                eq(referrer()),
            )
            .times(1)
            .return_const(());
        navigator.expect_replace().never();

        let mut ctl =
            controller("source=cosmoshub&period=24", referrer(), navigator);
        ctl.on_sort_change(&SortChange::new("ibc_tx_7d_failed", false))
            .unwrap();
    }

    #[test]
    fn unknown_sort_column_does_not_navigate() {
        let mut navigator = MockNavigator::new();
        navigator.expect_push().never();

        let mut ctl =
            controller("source=cosmoshub", HistoryState::default(), navigator);
        let err = ctl
            .on_sort_change(&SortChange::new("channels", true))
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownColumnKey {
                key: "channels".into()
            }
        );
    }

    #[test]
    fn selecting_every_zone_drops_the_filter() {
        let graph = ZoneGraph {
            nodes: ["a", "b", "a", "c", "c"]
                .into_iter()
                .map(|id| ZoneNode::new(zone(id)))
                .collect(),
            selected_nodes: Vec::new(),
        };

        let mut ctl = controller(
            "source=cosmoshub&period=720&targets=a&sortOrder=asc",
            HistoryState::default(),
            MemoryHistory::new(),
        );
        let all = ctl
            .select_zones(&[zone("a"), zone("b"), zone("c")], &graph)
            .unwrap();
        assert_eq!(all.href(), "/zone?period=720&source=cosmoshub");

        let subset = ctl.select_zones(&[zone("b")], &graph).unwrap();
        assert_eq!(
            subset.href(),
            "/zone?period=720&source=cosmoshub&targets=b"
        );

        assert_eq!(ctl.navigator().len(), 2);
        assert_eq!(ctl.navigator().current(), Some(&subset));
    }

    #[test]
    fn selection_without_source_fails() {
        let mut ctl = controller(
            "period=24",
            HistoryState::default(),
            MemoryHistory::new(),
        );
        assert_eq!(
            ctl.select_zones(&[], &ZoneGraph::default()).unwrap_err(),
            CodecError::MissingSource
        );
        assert!(ctl.navigator().is_empty());
    }

    #[test]
    fn initial_sort_reflects_query() {
        let ctl = controller(
            "source=cosmoshub&period=168&orderBy=failed",
            HistoryState::default(),
            MemoryHistory::new(),
        );
        let sort = ctl.initial_sort().unwrap();
        assert_eq!(sort.id.as_str(), "ibc_tx_7d_failed");
        assert_eq!(sort.sort_order(), SortOrder::Descending);
        assert_eq!(ctl.query().period, PeriodParam::from(PeriodHours(168)));
    }

    #[test]
    fn uppercase_sort_order_still_builds_controller() {
        let graph = ZoneGraph {
            nodes: vec![ZoneNode::new(zone("b")), ZoneNode::new(zone("c"))],
            selected_nodes: Vec::new(),
        };
        let mut ctl = controller(
            "sortOrder=DESC&source=a",
            HistoryState::default(),
            MemoryHistory::new(),
        );
        assert_eq!(
            ctl.initial_sort().unwrap().sort_order(),
            SortOrder::Descending
        );

        let location = ctl.select_zones(&[zone("c")], &graph).unwrap();
        assert_eq!(location.href(), "/zone?period=24&source=a&targets=c");
    }

    #[test]
    fn unparsed_period_survives_selection_but_not_sorting() {
        let graph = ZoneGraph {
            nodes: vec![ZoneNode::new(zone("b"))],
            selected_nodes: Vec::new(),
        };
        let mut ctl = controller(
            "period=day&orderBy=volume&source=a",
            HistoryState::default(),
            MemoryHistory::new(),
        );
        assert_eq!(
            ctl.initial_sort().unwrap_err(),
            CodecError::InvalidPeriod {
                period: "day".into()
            }
        );

        let location = ctl.select_zones(&[zone("b")], &graph).unwrap();
        assert_eq!(location.href(), "/zone?period=day&source=a");
    }

    #[test]
    fn close_returns_to_referrer() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(
                eq(Location::parse("/?period=168")),
                eq(HistoryState::default()),
            )
            .times(1)
            .return_const(());
        navigator.expect_replace().never();

        let mut ctl = controller("source=cosmoshub", referrer(), navigator);
        ctl.close();
    }

    #[test]
    fn close_without_referrer_replaces_with_home() {
        let mut history = MemoryHistory::new();
        history.push(
            &Location::parse("/zone?source=cosmoshub"),
            &HistoryState::default(),
        );

        let mut ctl = controller(
            "source=cosmoshub",
            HistoryState::default(),
            &mut history,
        );
        let location = ctl.close();
        assert_eq!(location, Location::path("/"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&Location::path("/")));
    }

    #[test]
    fn main_page_push_drops_history_state() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_push()
            .with(eq(Location::path("/")), eq(HistoryState::default()))
            .times(1)
            .return_const(());

        let mut ctl = controller("source=cosmoshub", referrer(), navigator);
        ctl.navigate_to_main_page();
    }

    #[test]
    fn location_href_round_trip() {
        let location = Location::parse("/zone?period=24");
        assert_eq!(location.path, "/zone");
        assert_eq!(location.query.as_deref(), Some("period=24"));
        assert_eq!(location.href(), "/zone?period=24");
        assert_eq!(Location::parse("/zone?").query, None);
    }
}
