//! Zone statistics graph delivered by the data service.
//!
//! Only the parts the codec relies on are modelled: zone ids, display names
//! and the per-column transfer counters the leaderboard sorts by. Unknown
//! fields are ignored on deserialization.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use zonemap_model::{Direction, Period, ZoneId};

/// Counterparty graph for one source zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneGraph {
    /// Every counterparty edge endpoint. A zone connected over several
    /// channels appears once per channel.
    #[serde(default)]
    pub nodes: Vec<ZoneNode>,
    /// Nodes matching the current `targets` filter.
    #[serde(default)]
    pub selected_nodes: Vec<ZoneNode>,
}

impl ZoneGraph {
    /// Counterparties with duplicates collapsed, in first-seen order.
    pub fn distinct_counterparties(&self) -> Vec<&ZoneNode> {
        remove_duplicated_counterparties(&self.nodes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneNode {
    pub zone: ZoneId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub transfers: TransferCounts,
}

impl ZoneNode {
    pub fn new(zone: ZoneId) -> Self {
        Self {
            zone,
            name: None,
            transfers: TransferCounts::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transfers(mut self, transfers: TransferCounts) -> Self {
        self.transfers = transfers;
        self
    }
}

/// IBC transfer counters keyed by leaderboard column id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferCounts {
    pub ibc_tx_1d: u64,
    pub ibc_tx_1d_failed: u64,
    pub ibc_tx_7d: u64,
    pub ibc_tx_7d_failed: u64,
    pub ibc_tx_30d: u64,
    pub ibc_tx_30d_failed: u64,
}

impl TransferCounts {
    pub fn count(&self, period: Period, direction: Direction) -> u64 {
        match (period, direction) {
            (Period::Day, Direction::Success) => self.ibc_tx_1d,
            (Period::Day, Direction::Failed) => self.ibc_tx_1d_failed,
            (Period::Week, Direction::Success) => self.ibc_tx_7d,
            (Period::Week, Direction::Failed) => self.ibc_tx_7d_failed,
            (Period::Month, Direction::Success) => self.ibc_tx_30d,
            (Period::Month, Direction::Failed) => self.ibc_tx_30d_failed,
        }
    }

    pub fn set(&mut self, period: Period, direction: Direction, value: u64) {
        let slot = match (period, direction) {
            (Period::Day, Direction::Success) => &mut self.ibc_tx_1d,
            (Period::Day, Direction::Failed) => &mut self.ibc_tx_1d_failed,
            (Period::Week, Direction::Success) => &mut self.ibc_tx_7d,
            (Period::Week, Direction::Failed) => &mut self.ibc_tx_7d_failed,
            (Period::Month, Direction::Success) => &mut self.ibc_tx_30d,
            (Period::Month, Direction::Failed) => &mut self.ibc_tx_30d_failed,
        };
        *slot = value;
    }
}

/// Keep the first node for each zone id, preserving order.
pub fn remove_duplicated_counterparties(nodes: &[ZoneNode]) -> Vec<&ZoneNode> {
    let mut seen: HashSet<&ZoneId> = HashSet::with_capacity(nodes.len());
    nodes.iter().filter(|node| seen.insert(&node.zone)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> ZoneNode {
        ZoneNode::new(ZoneId::new(id).unwrap())
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let nodes = vec![
            node("osmosis-1").with_name("Osmosis"),
            node("juno-1"),
            node("osmosis-1").with_name("Osmosis (channel-2)"),
            node("juno-1"),
            node("stargaze-1"),
        ];
        let distinct = remove_duplicated_counterparties(&nodes);
        let ids: Vec<_> = distinct.iter().map(|n| n.zone.as_str()).collect();
        assert_eq!(ids, ["osmosis-1", "juno-1", "stargaze-1"]);
        assert_eq!(distinct[0].name.as_deref(), Some("Osmosis"));
    }

    #[test]
    fn counters_follow_column_ids() {
        let mut counts = TransferCounts::default();
        counts.set(Period::Week, Direction::Failed, 7);
        assert_eq!(counts.ibc_tx_7d_failed, 7);
        assert_eq!(counts.count(Period::Week, Direction::Failed), 7);
        assert_eq!(counts.count(Period::Week, Direction::Success), 0);
    }

    #[test]
    fn deserializes_service_payload() {
        let graph: ZoneGraph = serde_json::from_str(
            r#"{
                "nodes": [
                    {
                        "zone": "osmosis-1",
                        "name": "Osmosis",
                        "ibc_tx_1d": 120,
                        "ibc_tx_1d_failed": 3,
                        "ibcPercentage": 0.4
                    },
                    {"zone": "juno-1"}
                ],
                "selectedNodes": []
            }"#,
        )
        .unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].transfers.ibc_tx_1d, 120);
        assert_eq!(graph.nodes[0].transfers.ibc_tx_1d_failed, 3);
        assert_eq!(graph.nodes[1].transfers, TransferCounts::default());
    }

    #[test]
    fn blank_zone_ids_are_rejected() {
        let parsed =
            serde_json::from_str::<ZoneGraph>(r#"{"nodes": [{"zone": ""}]}"#);
        assert!(parsed.is_err());
    }
}
