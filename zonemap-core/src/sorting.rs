//! Translation between leaderboard sort state and table column ids.
//!
//! The table only knows column ids (`ibc_tx_7d_failed`) and a descending
//! flag; the URL only knows a period, a direction and a sort order. The
//! functions here are the single place where one is turned into the other.

use tracing::{debug, warn};
use zonemap_model::{
    ColumnKey, Direction, Period, PeriodParam, SortChange, SortDescriptor,
    SortOrder, ZoneId,
};

use crate::{
    error::{CodecError, Result},
    query::build_navigation_query,
};

/// Descriptor for a canonical period. Infallible counterpart of
/// [`to_sort_descriptor`].
pub fn sort_descriptor(
    period: Period,
    order_by: Direction,
    sort_order: SortOrder,
) -> SortDescriptor {
    SortDescriptor::new(
        ColumnKey::for_metric(period, order_by),
        sort_order.is_descending(),
    )
}

/// Derive the table's sort descriptor from URL state.
///
/// Fails with [`CodecError::InvalidPeriod`] when the period is not a number
/// of hours or not one of the canonical periods, instead of producing a key
/// for a column that does not exist.
pub fn to_sort_descriptor(
    period: impl Into<PeriodParam>,
    order_by: Direction,
    sort_order: SortOrder,
) -> Result<SortDescriptor> {
    let period = period.into();
    let resolved = period.resolve().map_err(|err| {
        warn!("Refusing to derive sort descriptor: {}", err);
        CodecError::from(err)
    })?;

    let descriptor = sort_descriptor(resolved, order_by, sort_order);
    debug!(
        "Derived sort descriptor: period={} order_by={} -> id={} desc={}",
        period, order_by, descriptor.id, descriptor.desc
    );
    Ok(descriptor)
}

/// Recover the period and direction a column id stands for.
///
/// Direction detection is a substring test: any key mentioning `failed`
/// counts as failed. The period is then looked up by exact match after
/// stripping the `_failed` suffix, so keys that only pass the substring test
/// still fail with [`CodecError::UnknownColumnKey`].
pub fn from_column_key(key: &ColumnKey) -> Result<(Period, Direction)> {
    let raw = key.as_str();
    let direction = if raw.contains(Direction::FAILED_MARKER) {
        Direction::Failed
    } else {
        Direction::Success
    };

    let token = raw
        .strip_suffix(Direction::Failed.column_suffix())
        .unwrap_or(raw);

    match Period::from_column_token(token) {
        Some(period) => Ok((period, direction)),
        None => {
            warn!("Unknown leaderboard column id: {:?}", raw);
            Err(CodecError::UnknownColumnKey {
                key: raw.to_string(),
            })
        }
    }
}

/// Navigation query for a sort-change event coming back from the table.
pub fn query_for_sort_change(
    change: &SortChange,
    source: Option<&ZoneId>,
) -> Result<String> {
    let (period, order_by) = from_column_key(&change.id)?;
    Ok(build_navigation_query(
        period,
        source,
        order_by,
        change.sort_order(),
    ))
}

#[cfg(test)]
mod tests {
    use zonemap_model::PeriodHours;

    use super::*;

    const ALL_DIRECTIONS: [Direction; 2] =
        [Direction::Success, Direction::Failed];
    const ALL_ORDERS: [SortOrder; 2] =
        [SortOrder::Ascending, SortOrder::Descending];

    #[test]
    fn week_failed_descending() {
        let descriptor = to_sort_descriptor(
            Period::Week,
            Direction::Failed,
            SortOrder::Descending,
        )
        .unwrap();
        assert_eq!(descriptor.id.as_str(), "ibc_tx_7d_failed");
        assert!(descriptor.desc);
    }

    #[test]
    fn column_key_round_trip_ignores_sort_order() {
        for period in Period::ALL {
            for direction in ALL_DIRECTIONS {
                for order in ALL_ORDERS {
                    let descriptor =
                        to_sort_descriptor(period, direction, order).unwrap();
                    assert_eq!(descriptor.desc, order.is_descending());
                    assert_eq!(
                        from_column_key(&descriptor.id).unwrap(),
                        (period, direction)
                    );
                }
            }
        }
    }

    #[test]
    fn non_canonical_period_fails() {
        let err = to_sort_descriptor(
            PeriodHours(48),
            Direction::Success,
            SortOrder::Descending,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidPeriod {
                period: "48".into()
            }
        );

        let err = to_sort_descriptor(
            PeriodParam::parse("day"),
            Direction::Success,
            SortOrder::Descending,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidPeriod {
                period: "day".into()
            }
        );
    }

    #[test]
    fn unknown_columns_fail_closed() {
        for raw in [
            "ibc_tx_99d",
            "ibc_tx_99d_failed",
            "totalIbcTxs",
            "",
            "failed",
        ] {
            let err = from_column_key(&ColumnKey::from_raw(raw)).unwrap_err();
            assert_eq!(
                err,
                CodecError::UnknownColumnKey {
                    key: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn failed_marker_must_be_the_suffix_to_resolve() {
        for raw in ["failed_ibc_tx_1d", "ibc_tx_1dfailed"] {
            assert!(from_column_key(&ColumnKey::from_raw(raw)).is_err());
        }
    }

    #[test]
    fn sort_change_becomes_navigation_query() {
        let source = ZoneId::new("cosmoshub").unwrap();
        let query = query_for_sort_change(
            &SortChange::new("ibc_tx_30d", false),
            Some(&source),
        )
        .unwrap();
        assert_eq!(
            query,
            "period=720&orderBy=success&sortOrder=asc&source=cosmoshub"
        );
    }
}
