//! Flat JSON persistence shared by the config and state files.

use crate::error::{Result, UsageError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Read `path` and merge it over `T::default()`.
///
/// Never fails: a missing file, unreadable file, or non-object JSON yields
/// the default, and individual keys with bad values keep their default.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    if !path.exists() {
        debug!("'{}' not found; using defaults.", path.display());
        return T::default();
    }

    let merged = std::fs::read_to_string(path)
        .map_err(UsageError::from)
        .and_then(|raw| merge_over_defaults(&raw));

    match merged {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding '{}': {e}; using defaults.", path.display());
            T::default()
        }
    }
}

/// Overlay the keys of the JSON object in `raw` onto `T::default()`, one key
/// at a time. A key whose value makes `T` fail to deserialize is skipped.
pub fn merge_over_defaults<T>(raw: &str) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let Value::Object(mut merged) = serde_json::to_value(T::default())? else {
        return Err(UsageError::Store("default value is not a JSON object".into()));
    };
    let Value::Object(overrides) = serde_json::from_str::<Value>(raw)? else {
        return Err(UsageError::Store("top level is not a JSON object".into()));
    };

    for (key, value) in overrides {
        let Some(slot) = merged.get_mut(&key) else {
            debug!("Ignoring unknown key '{key}'");
            continue;
        };
        let previous = std::mem::replace(slot, value);
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            warn!("Ignoring invalid value for '{key}'");
            merged.insert(key, previous);
        }
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
