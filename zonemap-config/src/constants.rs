//! Environment variable names and built-in defaults.

pub const CONFIG_PATH_VAR: &str = "ZONEMAP_CONFIG_PATH";
pub const ZONE_ROUTE_VAR: &str = "ZONEMAP_ZONE_ROUTE";
pub const HOME_ROUTE_VAR: &str = "ZONEMAP_HOME_ROUTE";
pub const DEFAULT_PERIOD_VAR: &str = "ZONEMAP_DEFAULT_PERIOD";
pub const DEFAULT_ORDER_BY_VAR: &str = "ZONEMAP_DEFAULT_ORDER_BY";
pub const DEFAULT_SORT_ORDER_VAR: &str = "ZONEMAP_DEFAULT_SORT_ORDER";

/// Every variable the loader reads, in documentation order.
pub const MANAGED_VARS: &[&str] = &[
    CONFIG_PATH_VAR,
    ZONE_ROUTE_VAR,
    HOME_ROUTE_VAR,
    DEFAULT_PERIOD_VAR,
    DEFAULT_ORDER_BY_VAR,
    DEFAULT_SORT_ORDER_VAR,
];

pub const DEFAULT_ZONE_ROUTE: &str = "/zone";
pub const DEFAULT_HOME_ROUTE: &str = "/";
