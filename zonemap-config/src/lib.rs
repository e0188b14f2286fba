//! Configuration library for zonemap.
//!
//! Resolves the routes and query defaults the zone details view runs with
//! from a `.env` file, an optional `zonemap.toml` and the process
//! environment, and hosts the `zonemapctl` command line that exercises the
//! codec from a shell.

#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{Config, ConfigMetadata, DefaultsConfig, RoutesConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
