//! Leaderboard ordering for the counterparty table.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;
use zonemap_model::SortDescriptor;

use crate::{error::Result, graph::ZoneNode, sorting::from_column_key};

/// A counterparty row in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedZone<'a> {
    /// 1-based position in the displayed order.
    pub position: usize,
    /// Metric value for the sorted column.
    pub value: u64,
    pub zone: &'a ZoneNode,
}

/// Order `nodes` by the column named in `sort`.
///
/// Rows with equal values are ordered by zone id ascending in both
/// directions, so the same input always renders the same table.
pub fn rank_zones<'a>(
    nodes: &'a [ZoneNode],
    sort: &SortDescriptor,
) -> Result<Vec<RankedZone<'a>>> {
    let (period, direction) = from_column_key(&sort.id)?;

    let mut rows: Vec<(&ZoneNode, u64)> = nodes
        .iter()
        .map(|node| (node, node.transfers.count(period, direction)))
        .collect();
    rows.sort_by(|(a, a_value), (b, b_value)| {
        compare_values(*a_value, *b_value, sort.desc)
            .then_with(|| a.zone.cmp(&b.zone))
    });

    debug!(
        "Ranked {} zone(s) by {} ({})",
        rows.len(),
        sort.id,
        sort.sort_order()
    );

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, (zone, value))| RankedZone {
            position: index + 1,
            value,
            zone,
        })
        .collect())
}

fn compare_values(a: u64, b: u64, descending: bool) -> Ordering {
    if descending { b.cmp(&a) } else { a.cmp(&b) }
}

#[cfg(test)]
mod tests {
    use zonemap_model::{ColumnKey, Direction, Period, ZoneId};

    use super::*;
    use crate::{error::CodecError, graph::TransferCounts};

    fn node(id: &str, week: u64, week_failed: u64) -> ZoneNode {
        let mut counts = TransferCounts::default();
        counts.set(Period::Week, Direction::Success, week);
        counts.set(Period::Week, Direction::Failed, week_failed);
        ZoneNode::new(ZoneId::new(id).unwrap()).with_transfers(counts)
    }

    fn ids(ranked: &[RankedZone<'_>]) -> Vec<String> {
        ranked.iter().map(|row| row.zone.zone.to_string()).collect()
    }

    #[test]
    fn descending_with_tie_break_on_zone_id() {
        let nodes = vec![
            node("juno-1", 10, 0),
            node("osmosis-1", 40, 1),
            node("akash", 10, 5),
        ];
        let sort = SortDescriptor::new(ColumnKey::from_raw("ibc_tx_7d"), true);
        let ranked = rank_zones(&nodes, &sort).unwrap();
        assert_eq!(ids(&ranked), ["osmosis-1", "akash", "juno-1"]);
        assert_eq!(
            ranked.iter().map(|row| row.position).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert_eq!(ranked[0].value, 40);
    }

    #[test]
    fn ascending_keeps_tie_break_direction() {
        let nodes = vec![
            node("juno-1", 10, 0),
            node("osmosis-1", 40, 1),
            node("akash", 10, 5),
        ];
        let sort = SortDescriptor::new(ColumnKey::from_raw("ibc_tx_7d"), false);
        let ranked = rank_zones(&nodes, &sort).unwrap();
        assert_eq!(ids(&ranked), ["akash", "juno-1", "osmosis-1"]);
    }

    #[test]
    fn failed_column_uses_failed_counters() {
        let nodes = vec![node("juno-1", 10, 0), node("akash", 1, 5)];
        let sort =
            SortDescriptor::new(ColumnKey::from_raw("ibc_tx_7d_failed"), true);
        let ranked = rank_zones(&nodes, &sort).unwrap();
        assert_eq!(ids(&ranked), ["akash", "juno-1"]);
        assert_eq!(ranked[0].value, 5);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let nodes = vec![node("juno-1", 1, 0)];
        let sort = SortDescriptor::new(ColumnKey::from_raw("totalTxs"), true);
        assert_eq!(
            rank_zones(&nodes, &sort).unwrap_err(),
            CodecError::UnknownColumnKey {
                key: "totalTxs".into()
            }
        );
    }
}
