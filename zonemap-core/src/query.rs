//! URL query-string codec for the zone details view.
//!
//! Every default applied to navigation state lives in
//! [`parse_navigation_query_with`]; other modules receive a fully populated
//! [`QueryState`] and never re-derive fallbacks themselves.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use zonemap_model::{
    Direction, Period, PeriodParam, SortDescriptor, SortOrder, ZoneId,
};

use crate::{
    error::{CodecError, Result},
    sorting::to_sort_descriptor,
};

pub const PERIOD_KEY: &str = "period";
pub const ORDER_BY_KEY: &str = "orderBy";
pub const SORT_ORDER_KEY: &str = "sortOrder";
pub const SOURCE_KEY: &str = "source";
pub const TARGETS_KEY: &str = "targets";

const TARGETS_SEPARATOR: char = ',';

/// Base used to resolve path-only hrefs; only the query part is read.
const HREF_BASE: &str = "http://zonemap.invalid/";

/// Navigation state carried by the zone details URL.
///
/// Built once per navigation and never mutated; a new navigation produces a
/// new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub source: Option<ZoneId>,
    pub targets: Vec<ZoneId>,
    /// Raw `period` value; checked against the canonical periods on use.
    pub period: PeriodParam,
    pub order_by: Direction,
    pub sort_order: SortOrder,
}

/// Values used for keys that are absent from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryDefaults {
    pub period: Period,
    pub order_by: Direction,
    pub sort_order: SortOrder,
}

impl QueryState {
    /// State for a source zone with every other field at its default.
    pub fn for_source(source: ZoneId, defaults: &QueryDefaults) -> Self {
        Self {
            source: Some(source),
            targets: Vec::new(),
            period: defaults.period.into(),
            order_by: defaults.order_by,
            sort_order: defaults.sort_order,
        }
    }

    /// Parse the query part of a full URL or of a `/path?query` href.
    pub fn from_href(href: &str, defaults: &QueryDefaults) -> Result<Self> {
        let base = Url::parse(HREF_BASE)
            .map_err(|err| CodecError::malformed(err.to_string()))?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(href)
            .map_err(|err| {
                CodecError::malformed(format!("invalid href {href:?}: {err}"))
            })?;
        parse_navigation_query_with(url.query().unwrap_or_default(), defaults)
    }

    pub fn period(&self) -> Result<Period> {
        Ok(self.period.resolve()?)
    }

    pub fn require_source(&self) -> Result<&ZoneId> {
        self.source.as_ref().ok_or(CodecError::MissingSource)
    }

    /// Initial table sort for this state.
    pub fn sort_descriptor(&self) -> Result<SortDescriptor> {
        to_sort_descriptor(self.period.clone(), self.order_by, self.sort_order)
    }

    /// Serialise every field, including `targets`.
    ///
    /// Key order is `period, orderBy, sortOrder, source, targets`; `source`
    /// and `targets` are omitted when empty.
    pub fn to_query_string(&self) -> String {
        let mut writer = QueryWriter::default();
        writer
            .pair(PERIOD_KEY, &self.period.to_string())
            .pair(ORDER_BY_KEY, self.order_by.as_str())
            .pair(SORT_ORDER_KEY, self.sort_order.as_str());
        if let Some(source) = &self.source {
            writer.pair(SOURCE_KEY, source.as_str());
        }
        writer.list(TARGETS_KEY, &self.targets);
        writer.finish()
    }
}

/// Build the query pushed after a sort change.
///
/// Keys are written as `period, orderBy, sortOrder, source`. A missing source
/// leaves the key out entirely rather than writing an empty value.
pub fn build_navigation_query(
    period: Period,
    source: Option<&ZoneId>,
    order_by: Direction,
    sort_order: SortOrder,
) -> String {
    let mut writer = QueryWriter::default();
    writer
        .pair(PERIOD_KEY, &period.hours().to_string())
        .pair(ORDER_BY_KEY, order_by.as_str())
        .pair(SORT_ORDER_KEY, sort_order.as_str());
    if let Some(source) = source {
        writer.pair(SOURCE_KEY, source.as_str());
    }
    let query = writer.finish();
    debug!("Built navigation query: {}", query);
    query
}

/// Parse a query string with the built-in defaults.
pub fn parse_navigation_query(raw: &str) -> Result<QueryState> {
    parse_navigation_query_with(raw, &QueryDefaults::default())
}

/// Parse a query string (with or without the leading `?`).
///
/// Absent or empty values fall back to `defaults`. Only the shape of the
/// string can fail here. `orderBy` and `sortOrder` always map to a member,
/// and `period` is carried as given until a sort descriptor is derived.
pub fn parse_navigation_query_with(
    raw: &str,
    defaults: &QueryDefaults,
) -> Result<QueryState> {
    let pairs = tokenize(raw).inspect_err(|err| {
        warn!("Rejecting query string {:?}: {}", raw, err);
    })?;
    let lookup = |key: &str| first_value(&pairs, key);

    let source = lookup(SOURCE_KEY)
        .map(decode_component)
        .transpose()?
        .filter(|value| !value.trim().is_empty())
        .map(ZoneId::new)
        .transpose()?;

    let targets = match lookup(TARGETS_KEY) {
        Some(value) => parse_targets(value)?,
        None => Vec::new(),
    };

    let period = match lookup(PERIOD_KEY) {
        Some(value) => PeriodParam::parse(&decode_component(value)?),
        None => defaults.period.into(),
    };

    let order_by = match lookup(ORDER_BY_KEY) {
        Some(value) => Direction::from_query_value(&decode_component(value)?),
        None => defaults.order_by,
    };

    let sort_order = match lookup(SORT_ORDER_KEY) {
        Some(value) => SortOrder::from_query_value(&decode_component(value)?),
        None => defaults.sort_order,
    };

    let state = QueryState {
        source,
        targets,
        period,
        order_by,
        sort_order,
    };
    debug!(
        "Parsed navigation query: source={:?} targets={} period={} \
         order_by={} sort_order={}",
        state.source.as_ref().map(ZoneId::as_str),
        state.targets.len(),
        state.period,
        state.order_by,
        state.sort_order
    );
    Ok(state)
}

/// Split `targets` on commas before decoding so that an encoded comma inside
/// a zone id survives. Empty segments are dropped, order is kept.
fn parse_targets(raw: &str) -> Result<Vec<ZoneId>> {
    raw.split(TARGETS_SEPARATOR)
        .map(decode_component)
        .filter(|segment| {
            segment
                .as_ref()
                .map(|value| !value.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|segment| -> Result<ZoneId> { Ok(ZoneId::new(segment?)?) })
        .collect()
}

/// First non-empty value for `key`; later duplicates are ignored.
fn first_value<'a>(
    pairs: &'a [(String, String)],
    key: &str,
) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

/// Split a query string into `(decoded key, raw value)` pairs.
fn tokenize(raw: &str) -> Result<Vec<(String, String)>> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut pairs = Vec::new();

    for segment in raw.split('&').filter(|segment| !segment.is_empty()) {
        let Some((key, value)) = segment.split_once('=') else {
            return Err(CodecError::malformed(format!(
                "segment {segment:?} is not a key=value pair"
            )));
        };
        let key = decode_component(key)?;
        if key.is_empty() {
            return Err(CodecError::malformed(format!(
                "segment {segment:?} has an empty key"
            )));
        }
        pairs.push((key, value.to_string()));
    }

    Ok(pairs)
}

/// Percent-decode one component, treating `+` as a space.
fn decode_component(raw: &str) -> Result<String> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|err| {
            CodecError::malformed(format!(
                "invalid percent-encoding in {raw:?}: {err}"
            ))
        })
}

/// Appends `key=value` pairs in call order, percent-encoding values.
#[derive(Debug, Default)]
pub(crate) struct QueryWriter {
    buf: String,
}

impl QueryWriter {
    pub(crate) fn pair(&mut self, key: &str, value: &str) -> &mut Self {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&urlencoding::encode(value));
        self
    }

    /// Comma-joined list; nothing is written for an empty list.
    pub(crate) fn list(&mut self, key: &str, values: &[ZoneId]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(|value| urlencoding::encode(value.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&joined);
        self
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
