use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tally_finance::classifier::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub import: ImportSection,
    pub classifier: ClassifierSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSection {
    /// Statement year: BMO transaction rows carry only month + day, so the
    /// year has to come from here or from --year.
    pub year: i32,
    /// Run the categorization stage (rules + zero-shot fallback).
    pub categorize: bool,
    /// Default transaction log path when --log is not given.
    pub log_file: String,
    /// Extra literal markers to drop while scanning, e.g. the account-holder
    /// name line on your statements.
    pub skip_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSection {
    pub endpoint: String,
    pub model: String,
    pub confidence_threshold: f64,
    /// Falls back to the HF_API_TOKEN env var when unset.
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            import: ImportSection {
                year: 2025,
                categorize: false,
                log_file: "transactions_log.csv".to_string(),
                skip_markers: Vec::new(),
            },
            classifier: ClassifierSection {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                model: DEFAULT_MODEL.to_string(),
                confidence_threshold: 0.7,
                api_token: None,
            },
        }
    }
}

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.import.year, 2025);
        assert!(!back.import.categorize);
        assert_eq!(back.classifier.confidence_threshold, 0.7);
    }
}
