// src/config/loader.rs
//! Configuration loader that layers TOML files over the built-in defaults

use std::path::{Path, PathBuf};

use crate::config::LabConfig;
use crate::error::{LabErrorBuilder, LabResult};

/// Environment variable prefix for single-value overrides
pub const ENV_PREFIX: &str = "ADAPTIVE_LAB_";

/// Loads [`LabConfig`] from an ordered list of TOML files
///
/// Later files override earlier ones key by key; missing files are skipped.
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    use_environment: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader over the conventional search paths
    pub fn new() -> Self {
        Self {
            config_paths: Self::discover_config_paths(),
            use_environment: true,
        }
    }

    /// Create loader with custom paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            use_environment: false,
        }
    }

    /// Enable or disable `ADAPTIVE_LAB_*` environment overrides
    pub fn with_environment(mut self, enabled: bool) -> Self {
        self.use_environment = enabled;
        self
    }

    /// Paths this loader reads, in merge order
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load, merge and validate the configuration
    pub fn load(&self) -> LabResult<LabConfig> {
        let mut merged = toml::Value::try_from(LabConfig::default()).map_err(|e| {
            LabErrorBuilder::new("config", "load").configuration(&e.to_string())
        })?;

        for path in &self.config_paths {
            if !path.exists() {
                tracing::debug!(path = %path.display(), "config file not present, skipping");
                continue;
            }
            let overlay = Self::load_config_file(path)?;
            merge_toml_values(&mut merged, overlay);
            tracing::debug!(path = %path.display(), "merged config file");
        }

        if self.use_environment {
            apply_environment_overrides(&mut merged, std::env::vars());
        }

        let config: LabConfig = merged.try_into()?;
        Self::validated(config)
    }

    /// Parse a single TOML document over the defaults
    pub fn from_toml_str(content: &str) -> LabResult<LabConfig> {
        let config: LabConfig = toml::from_str(content)?;
        Self::validated(config)
    }

    /// Write a configuration as pretty TOML
    pub fn export_config<P: AsRef<Path>>(config: &LabConfig, path: P) -> LabResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| {
            LabErrorBuilder::new("config", "export").configuration(&e.to_string())
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validated(config: LabConfig) -> LabResult<LabConfig> {
        config.validate_consistency().map_err(|errors| {
            LabErrorBuilder::new("config", "validate").configuration(&errors.join("; "))
        })?;
        Ok(config)
    }

    fn load_config_file(path: &Path) -> LabResult<toml::Value> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LabErrorBuilder::new("config", "read_file").io(e))?;
        let value: toml::Value = toml::from_str(&content)?;
        Ok(value)
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("adaptive_lab.toml")];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".config/adaptive_lab/config.toml"));
        }
        paths
    }
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

/// `ADAPTIVE_LAB_ANALYSIS__IMPULSE_LENGTH=64` sets `analysis.impulse_length`
fn apply_environment_overrides<I>(config: &mut toml::Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let config_key = stripped.to_lowercase().replace("__", ".");
        set_nested_value(config, &config_key, parse_env_value(&value));
    }
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn set_nested_value(config: &mut toml::Value, path: &str, value: toml::Value) {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = config;

    for (i, part) in parts.iter().enumerate() {
        let toml::Value::Table(table) = current else {
            return;
        };
        if i == parts.len() - 1 {
            table.insert(part.to_string(), value);
            return;
        }
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
    }
}
