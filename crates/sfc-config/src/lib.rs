//! sfc-config: controls configuration file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ConfigResult<ConfigFile> {
    let config: ConfigFile = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn from_json_str(content: &str) -> ConfigResult<ConfigFile> {
    let config: ConfigFile = serde_json::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<ConfigFile> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn to_yaml_string(config: &ConfigFile) -> ConfigResult<String> {
    validate_config(config)?;
    Ok(serde_yaml::to_string(config)?)
}

pub fn save_yaml(path: &std::path::Path, config: &ConfigFile) -> ConfigResult<()> {
    std::fs::write(path, to_yaml_string(config)?)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<ConfigFile> {
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn save_json(path: &std::path::Path, config: &ConfigFile) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &std::path::Path) -> ConfigResult<ConfigFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
