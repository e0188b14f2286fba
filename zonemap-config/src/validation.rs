use serde::Serialize;
use thiserror::Error;
use zonemap_model::SortOrder;

use super::models::{Config, RoutesConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("{field} route {route:?} {reason}")]
    InvalidRoute {
        field: &'static str,
        route: String,
        reason: &'static str,
    },
    #[error("default period {hours}h is not one of 24, 168 or 720")]
    NonCanonicalPeriod { hours: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_routes(&config.routes)?;

    if config.routes.zone == config.routes.home {
        warnings.push_with_hint(
            "Zone details and main page share the same route",
            "Closing the zone view will not leave the page",
        );
    }

    if config.defaults.sort_order == SortOrder::Ascending {
        warnings.push_with_hint(
            "Default sort order is ascending; the busiest counterparties \
             will be listed last",
            "Set ZONEMAP_DEFAULT_SORT_ORDER=desc unless this is intended",
        );
    }

    Ok(warnings)
}

fn validate_routes(routes: &RoutesConfig) -> Result<(), ConfigGuardRailError> {
    validate_route("zone", &routes.zone)?;
    validate_route("home", &routes.home)
}

fn validate_route(
    field: &'static str,
    route: &str,
) -> Result<(), ConfigGuardRailError> {
    let reason = if !route.starts_with('/') {
        Some("must start with '/'")
    } else if route.contains(['?', '#']) {
        Some("must not contain a query or fragment")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigGuardRailError::InvalidRoute {
            field,
            route: route.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&Config::default()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn relative_route_is_rejected() {
        let mut config = Config::default();
        config.routes.zone = "zone".into();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidRoute { field: "zone", .. })
        ));
    }

    #[test]
    fn route_with_query_is_rejected() {
        let mut config = Config::default();
        config.routes.home = "/?period=24".into();
        assert!(matches!(
            apply_guard_rails(&config),
            Err(ConfigGuardRailError::InvalidRoute { field: "home", .. })
        ));
    }

    #[test]
    fn ascending_default_warns() {
        let mut config = Config::default();
        config.defaults.sort_order = SortOrder::Ascending;
        let warnings = apply_guard_rails(&config).unwrap();
        assert_eq!(warnings.items.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }
}
