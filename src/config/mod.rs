use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::SplitStrategy,
    errors::SplitError,
    money::{Amount, LocaleConfig, DEFAULT_GROUPING_SEPARATOR, MAX_AMOUNT},
    utils::{app_data_dir, ensure_dir},
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences that shape input handling and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound for any amount typed by the user, in minor units.
    pub max_amount: Amount,
    pub grouping_separator: char,
    /// Strategy a fresh pending expense starts with.
    pub default_strategy: SplitStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_amount: MAX_AMOUNT,
            grouping_separator: DEFAULT_GROUPING_SEPARATOR,
            default_strategy: SplitStrategy::Equal,
        }
    }
}

impl Config {
    pub fn locale(&self) -> LocaleConfig {
        LocaleConfig {
            grouping_separator: self.grouping_separator,
        }
    }

    /// Rejects settings that would make amount input unusable: a non-positive
    /// maximum, or a separator that could be mistaken for part of a number.
    pub fn validate(&self) -> Result<(), SplitError> {
        if !self.max_amount.is_positive() {
            return Err(SplitError::InvalidConfig(format!(
                "max_amount must be positive, got {}",
                self.max_amount
            )));
        }
        let separator = self.grouping_separator;
        if separator.is_ascii_digit() || separator.is_whitespace() || separator.is_control() {
            return Err(SplitError::InvalidConfig(format!(
                "grouping_separator must be a visible non-digit character, got {:?}",
                separator
            )));
        }
        Ok(())
    }
}

/// Loads and stores [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, SplitError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, SplitError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config, SplitError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), SplitError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), SplitError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
