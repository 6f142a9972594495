//! Configuration file upgrades: detect keys missing from an older file and
//! fill them with their defaults, leaving existing values untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(
            "configuration root must be a mapping".to_string(),
        )),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()).map_err(|e| AppError::Config(e.to_string()))? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

/// List the top-level keys the file at `path` does not define.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value.
/// Returns the names of the keys that were added.
pub fn migrate_config(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut added = Vec::new();
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        info("Configuration already up to date.");
        return Ok(added);
    }

    let yaml =
        serde_yaml::to_string(&Value::Mapping(current)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;

    success(format!("Added missing keys: {}", added.join(", ")));
    Ok(added)
}
