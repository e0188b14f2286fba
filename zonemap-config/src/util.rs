use std::str::FromStr;

use crate::loader::error::ConfigLoadError;

/// Read an environment variable, treating blank values as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a gathered environment value, naming the variable on failure.
pub fn parse_env_value<T>(
    var: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ConfigLoadError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|err| ConfigLoadError::InvalidEnv {
            var,
            value: value.to_string(),
            reason: err.to_string(),
        })
    })
    .transpose()
}
