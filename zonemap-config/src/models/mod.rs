pub mod sources;

use std::path::PathBuf;

use serde::Serialize;
use zonemap_core::{navigation::RouteConfig, query::QueryDefaults};
use zonemap_model::{Direction, Period, SortOrder};

use crate::constants::{DEFAULT_HOME_ROUTE, DEFAULT_ZONE_ROUTE};

/// Effective configuration after merging defaults, file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub routes: RoutesConfig,
    pub defaults: DefaultsConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn route_config(&self) -> RouteConfig {
        RouteConfig {
            zone: self.routes.zone.clone(),
            home: self.routes.home.clone(),
        }
    }

    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            period: self.defaults.period,
            order_by: self.defaults.order_by,
            sort_order: self.defaults.sort_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutesConfig {
    pub zone: String,
    pub home: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE_ROUTE.to_string(),
            home: DEFAULT_HOME_ROUTE.to_string(),
        }
    }
}

/// Values applied to query keys missing from a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultsConfig {
    pub period: Period,
    pub order_by: Direction,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
