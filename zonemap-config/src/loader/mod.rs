pub mod error;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};
use zonemap_model::{Direction, Period, SortOrder};

use crate::{
    constants::{
        DEFAULT_ORDER_BY_VAR, DEFAULT_PERIOD_VAR, DEFAULT_SORT_ORDER_VAR,
    },
    models::{
        Config, ConfigMetadata, DefaultsConfig, RoutesConfig,
        sources::{EnvConfig, FileConfig},
    },
    util::parse_env_value,
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("zonemap.toml"),
        PathBuf::from("config/zonemap.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Loaded configuration together with non-fatal findings.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env_config = EnvConfig::gather();

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = self.compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        for warning in &warnings.items {
            warn!("{}", warning.message);
        }

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        } else {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            debug!("No zonemap.toml found; using environment and defaults");
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        debug!(
            "Loaded configuration from {} ({:?})",
            path.display(),
            provenance
        );
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let FileConfig {
            routes: file_routes,
            defaults: file_defaults,
        } = file_config.unwrap_or_default();
        let base = Config::default();

        let routes = RoutesConfig {
            zone: env
                .zone_route
                .or(file_routes.zone)
                .unwrap_or(base.routes.zone),
            home: env
                .home_route
                .or(file_routes.home)
                .unwrap_or(base.routes.home),
        };

        let period_hours = parse_env_value::<u32>(
            DEFAULT_PERIOD_VAR,
            env.default_period.as_deref(),
        )?
        .or(file_defaults.period)
        .unwrap_or(base.defaults.period.hours());
        let period = Period::from_hours(period_hours).ok_or(
            ConfigGuardRailError::NonCanonicalPeriod {
                hours: period_hours,
            },
        )?;

        let order_by = parse_env_value::<Direction>(
            DEFAULT_ORDER_BY_VAR,
            env.default_order_by.as_deref(),
        )?
        .or(file_defaults.order_by)
        .unwrap_or(base.defaults.order_by);

        let sort_order = parse_env_value::<SortOrder>(
            DEFAULT_SORT_ORDER_VAR,
            env.default_sort_order.as_deref(),
        )?
        .or(file_defaults.sort_order)
        .unwrap_or(base.defaults.sort_order);

        let config = Config {
            routes,
            defaults: DefaultsConfig {
                period,
                order_by,
                sort_order,
            },
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        let mut warnings = ConfigWarnings::default();
        if config.metadata.config_path.is_none() {
            warnings.push_with_hint(
                "No zonemap.toml detected; using environment variables and \
                 built-in defaults",
                "Create zonemap.toml or set ZONEMAP_CONFIG_PATH to customise \
                 routes",
            );
        }
        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok((config, warnings))
    }
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}
