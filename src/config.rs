use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::duration::Duration;
use crate::error::RacePaceError;
use crate::intensity::IntensityModel;
use crate::logging::LogConfig;
use crate::units::DistanceUnit;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Values used when a command-line argument is omitted
    pub defaults: CalculatorDefaults,

    /// Input limits for untrusted values
    pub limits: Limits,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Calculator defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorDefaults {
    /// Unit for paces and distances
    pub unit: DistanceUnit,

    /// Intensity model for percentage calculations
    pub intensity_model: IntensityModel,

    /// Race finish time for pace calculations
    pub finish_time: Duration,

    /// Race distance in `unit` for pace calculations
    pub race_distance: f64,

    /// Race pace for finish-time calculations
    pub race_pace: Duration,

    /// Race distance in meters for finish-time calculations
    pub race_distance_meters: f64,

    /// Goal marathon pace for long-run ladders
    pub marathon_pace: Duration,

    /// Long-run length in `unit`
    pub long_run_length: u32,

    /// Maximum heart rate in bpm
    pub max_heart_rate: u16,

    /// Reference pace for percentage and workout tables
    pub reference_pace: Duration,

    /// Percentage of the reference pace
    pub percentage: u32,

    /// Race distance in meters for VDOT estimation
    pub vdot_distance_meters: f64,

    /// Race time for VDOT estimation
    pub vdot_time: Duration,
}

/// Input limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Longest long-run ladder the CLI will generate
    pub max_long_run_length: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            defaults: CalculatorDefaults::default(),
            limits: Limits::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        AppConfig::default().metadata
    }
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        CalculatorDefaults {
            unit: DistanceUnit::Mi,
            intensity_model: IntensityModel::Pace,
            finish_time: Duration::from_mins(20),
            race_distance: 3.0,
            race_pace: Duration::from_secs(390),
            race_distance_meters: 5000.0,
            marathon_pace: Duration::from_secs(390),
            long_run_length: 15,
            max_heart_rate: 185,
            reference_pace: Duration::from_mins(6),
            percentage: 95,
            vdot_distance_meters: 5000.0,
            vdot_time: Duration::from_mins(20),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_long_run_length: 1000,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".racepace")
            .join("config.toml")
    }

    /// Load an explicit file, or the default file if it exists, or defaults.
    ///
    /// An explicitly named file must exist; a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::load_from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Every setting as a dotted key and its TOML value
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).context("Failed to serialize configuration")?;
        let mut entries = Vec::new();
        flatten_into(&mut entries, String::new(), &value);
        Ok(entries)
    }

    /// Look up a dotted key such as `defaults.max_heart_rate`
    pub fn get_value(&self, key: &str) -> Result<String> {
        self.entries()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| unknown_key(key).into())
    }

    /// Set a dotted key, keeping the existing value's type.
    ///
    /// The updated document is deserialized again, so a value of the wrong shape
    /// (an unparseable duration, an unknown unit) is rejected and `self` is left
    /// unchanged.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<()> {
        let mut document =
            toml::Value::try_from(&*self).context("Failed to serialize configuration")?;

        let (section_path, field) = key.rsplit_once('.').ok_or_else(|| unknown_key(key))?;
        let mut table = &mut document;
        for part in section_path.split('.') {
            table = table.get_mut(part).ok_or_else(|| unknown_key(key))?;
        }
        let table = table.as_table_mut().ok_or_else(|| unknown_key(key))?;

        let value = match table.get(field) {
            Some(toml::Value::Integer(_)) => toml::Value::Integer(
                raw.parse()
                    .with_context(|| format!("{} expects an integer, got {:?}", key, raw))?,
            ),
            Some(toml::Value::Float(_)) => toml::Value::Float(
                raw.parse()
                    .with_context(|| format!("{} expects a number, got {:?}", key, raw))?,
            ),
            Some(toml::Value::Boolean(_)) => toml::Value::Boolean(
                raw.parse()
                    .with_context(|| format!("{} expects true or false, got {:?}", key, raw))?,
            ),
            // Strings, and optional fields that are currently unset
            _ => toml::Value::String(raw.to_string()),
        };
        table.insert(field.to_string(), value);

        let mut updated: AppConfig = document
            .try_into()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw))?;
        updated.metadata.updated_at = Utc::now();
        *self = updated;
        Ok(())
    }
}

fn unknown_key(key: &str) -> RacePaceError {
    RacePaceError::Configuration(format!("Unknown configuration key: {}", key))
}

fn flatten_into(entries: &mut Vec<(String, String)>, prefix: String, value: &toml::Value) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(entries, path, child);
            }
        }
        toml::Value::String(s) => entries.push((prefix, s.clone())),
        other => entries.push((prefix, other.to_string())),
    }
}
