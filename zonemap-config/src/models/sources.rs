use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use zonemap_model::{Direction, SortOrder};

use crate::{
    constants::{
        CONFIG_PATH_VAR, DEFAULT_ORDER_BY_VAR, DEFAULT_PERIOD_VAR,
        DEFAULT_SORT_ORDER_VAR, HOME_ROUTE_VAR, ZONE_ROUTE_VAR,
    },
    util::env_var,
};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub routes: FileRoutesConfig,
    #[serde(default)]
    pub defaults: FileDefaultsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileRoutesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDefaultsConfig {
    /// Hours; checked against the canonical periods after merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Environment-derived configuration values, unparsed.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub zone_route: Option<String>,
    pub home_route: Option<String>,
    pub default_period: Option<String>,
    pub default_order_by: Option<String>,
    pub default_sort_order: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: env_var(CONFIG_PATH_VAR).map(PathBuf::from),
            zone_route: env_var(ZONE_ROUTE_VAR),
            home_route: env_var(HOME_ROUTE_VAR),
            default_period: env_var(DEFAULT_PERIOD_VAR),
            default_order_by: env_var(DEFAULT_ORDER_BY_VAR),
            default_sort_order: env_var(DEFAULT_SORT_ORDER_VAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_parses() {
        let file: FileConfig = toml::from_str(
            r#"
            [defaults]
            period = 168
            sort_order = "asc"
            "#,
        )
        .unwrap();
        assert_eq!(file.defaults.period, Some(168));
        assert_eq!(file.defaults.sort_order, Some(SortOrder::Ascending));
        assert_eq!(file.defaults.order_by, None);
        assert!(file.routes.zone.is_none());
    }

    #[test]
    fn direction_uses_query_spelling() {
        let file: FileConfig = toml::from_str(
            r#"
            [routes]
            zone = "/zones"

            [defaults]
            order_by = "failed"
            "#,
        )
        .unwrap();
        assert_eq!(file.routes.zone.as_deref(), Some("/zones"));
        assert_eq!(file.defaults.order_by, Some(Direction::Failed));
    }
}
