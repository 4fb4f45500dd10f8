use std::fs;
use std::path::{Path, PathBuf};

use crate::model::AppConfig;

/// Commented template written by `config init`
pub const DEFAULT_CONFIG: &str = include_str!("../templates/config.toml");

/// Dotted keys accepted by `config set`
pub const SETTABLE_KEYS: &[&str] = &[
    "api.model",
    "api.base_url",
    "api.temperature",
    "api.api_key_env",
    "api.timeout_secs",
    "api.grounding",
    "log.level",
];

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a config directory; pass --config <PATH>")]
    NoConfigDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
    #[error("unknown config key '{0}' (expected one of: {keys})", keys = SETTABLE_KEYS.join(", "))]
    UnknownKey(String),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Location of the config file: the explicit override if given,
/// otherwise `<config dir>/giftdeck/config.toml`.
pub fn config_path(override_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join("giftdeck").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Read the config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the commented default template, creating parent directories
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Convert a raw CLI string into a typed TOML value for `key`
fn typed_value(key: &str, raw: &str) -> Result<toml_edit::Item, ConfigError> {
    match key {
        "api.model" | "api.base_url" | "api.api_key_env" | "log.level" => {
            if raw.trim().is_empty() {
                return Err(invalid(key, "must not be empty"));
            }
            Ok(toml_edit::value(raw))
        }
        "api.temperature" => {
            let t: f64 = raw
                .parse()
                .map_err(|_| invalid(key, "expected a number"))?;
            if !(0.0..=2.0).contains(&t) {
                return Err(invalid(key, "must be between 0.0 and 2.0"));
            }
            Ok(toml_edit::value(t))
        }
        "api.timeout_secs" => {
            let secs: i64 = raw
                .parse()
                .map_err(|_| invalid(key, "expected a whole number of seconds"))?;
            if secs <= 0 {
                return Err(invalid(key, "must be greater than zero"));
            }
            Ok(toml_edit::value(secs))
        }
        "api.grounding" => {
            let flag: bool = raw
                .parse()
                .map_err(|_| invalid(key, "expected true or false"))?;
            Ok(toml_edit::value(flag))
        }
        _ => Err(ConfigError::UnknownKey(key.to_string())),
    }
}

/// Set a dotted key in the config document, preserving comments and layout
pub fn set_value_in(doc: &mut toml_edit::DocumentMut, key: &str, raw: &str) -> Result<(), ConfigError> {
    let Some((section, field)) = key.split_once('.') else {
        return Err(ConfigError::UnknownKey(key.to_string()));
    };
    let item = typed_value(key, raw)?;

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let Some(table) = doc[section].as_table_like_mut() else {
        return Err(invalid(key, format!("[{}] is not a table", section)));
    };
    table.insert(field, item);
    Ok(())
}

/// Read, edit and rewrite the config file. A missing file is created.
pub fn set_value(path: &Path, key: &str, raw: &str) -> Result<(), ConfigError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_value_in(&mut doc, key, raw)?;

    let updated = doc.to_string();
    // The result must still load
    toml::from_str::<AppConfig>(&updated)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;
    Ok(())
}
