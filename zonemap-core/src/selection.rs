//! Reconciling a counterparty selection with the `targets` filter.

use std::collections::HashSet;

use tracing::{debug, warn};
use zonemap_model::{PeriodParam, ZoneId};

use crate::{
    graph::{ZoneNode, remove_duplicated_counterparties},
    query::{PERIOD_KEY, QueryWriter, SOURCE_KEY, TARGETS_KEY},
};

/// Outcome of comparing a selection against the available counterparties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// Every distinct counterparty is selected; the URL carries no filter.
    All,
    /// A strict subset, in the order the user picked it.
    Subset(Vec<ZoneId>),
}

impl TargetSelection {
    pub fn targets(&self) -> &[ZoneId] {
        match self {
            TargetSelection::All => &[],
            TargetSelection::Subset(targets) => targets,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, TargetSelection::All)
    }
}

/// Decide whether `selected` means "all counterparties".
///
/// Both sides are de-duplicated before their sizes are compared. A zone
/// reachable over several channels shows up several times in `counterparties`,
/// and without collapsing those entries selecting every distinct zone would
/// never be recognised as the full set.
pub fn reconcile_targets(
    selected: &[ZoneId],
    counterparties: &[ZoneNode],
) -> TargetSelection {
    let available = remove_duplicated_counterparties(counterparties).len();

    let mut seen = HashSet::with_capacity(selected.len());
    let distinct: Vec<ZoneId> = selected
        .iter()
        .filter(|zone| seen.insert(*zone))
        .cloned()
        .collect();
    if distinct.len() != selected.len() {
        warn!(
            "Selection contained {} duplicate target(s); collapsing",
            selected.len() - distinct.len()
        );
    }

    let selection = if distinct.len() == available {
        TargetSelection::All
    } else {
        TargetSelection::Subset(distinct)
    };
    debug!(
        "Reconciled selection: selected={} available={} all={}",
        selected.len(),
        available,
        selection.is_all()
    );
    selection
}

/// Query pushed after the user changes the counterparty selection:
/// `period, source[, targets]`. The period is echoed as the URL carried it.
pub fn build_selection_query(
    period: &PeriodParam,
    source: &ZoneId,
    selection: &TargetSelection,
) -> String {
    let mut writer = QueryWriter::default();
    writer
        .pair(PERIOD_KEY, &period.to_string())
        .pair(SOURCE_KEY, source.as_str())
        .list(TARGETS_KEY, selection.targets());
    writer.finish()
}

#[cfg(test)]
mod tests {
    use zonemap_model::PeriodHours;

    use super::*;

    fn zone(id: &str) -> ZoneId {
        ZoneId::new(id).unwrap()
    }

    fn nodes(ids: &[&str]) -> Vec<ZoneNode> {
        ids.iter().map(|id| ZoneNode::new(zone(id))).collect()
    }

    #[test]
    fn all_distinct_counterparties_with_duplicates_is_all() {
        let available = nodes(&["a", "b", "a", "c", "b"]);
        let selected = vec![zone("c"), zone("a"), zone("b")];
        assert_eq!(
            reconcile_targets(&selected, &available),
            TargetSelection::All
        );
    }

    #[test]
    fn strict_subset_keeps_user_order() {
        let available = nodes(&["a", "b", "c"]);
        let selected = vec![zone("c"), zone("a")];
        assert_eq!(
            reconcile_targets(&selected, &available),
            TargetSelection::Subset(vec![zone("c"), zone("a")])
        );
    }

    #[test]
    fn duplicate_picks_do_not_fake_a_full_selection() {
        let available = nodes(&["a", "b", "c"]);
        let selected = vec![zone("a"), zone("a"), zone("b")];
        assert_eq!(
            reconcile_targets(&selected, &available),
            TargetSelection::Subset(vec![zone("a"), zone("b")])
        );
    }

    #[test]
    fn selection_query_omits_targets_for_all() {
        let query = build_selection_query(
            &PeriodHours(168).into(),
            &zone("cosmoshub"),
            &TargetSelection::All,
        );
        assert_eq!(query, "period=168&source=cosmoshub");
    }

    #[test]
    fn selection_query_lists_subset() {
        let query = build_selection_query(
            &PeriodHours(24).into(),
            &zone("cosmoshub"),
            &TargetSelection::Subset(vec![zone("osmosis-1"), zone("juno-1")]),
        );
        assert_eq!(
            query,
            "period=24&source=cosmoshub&targets=osmosis-1,juno-1"
        );
    }

    #[test]
    fn selection_query_echoes_unparsed_period() {
        let query = build_selection_query(
            &PeriodParam::parse("day"),
            &zone("cosmoshub"),
            &TargetSelection::All,
        );
        assert_eq!(query, "period=day&source=cosmoshub");
    }
}
