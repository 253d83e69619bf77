use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::services::search_service::{Credentials, DEFAULT_ENDPOINT};
use crate::utils::app_paths::AppPaths;

pub const KEYWORD_VAR: &str = "SEARCH_KEYWORD";
pub const CLIENT_ID_VAR: &str = "NAVER_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "NAVER_CLIENT_SECRET";
pub const MODE_VAR: &str = "MODE";
pub const ENDPOINT_VAR: &str = "NEWS_EXPORT_ENDPOINT";
pub const OUTPUT_DIR_VAR: &str = "NEWS_EXPORT_OUTPUT_DIR";

/// Run mode. Only affects log verbosity and the output file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Dev,
    Prod,
}

impl RunMode {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_log_level(&self) -> &'static str {
        match self {
            RunMode::Dev => "info",
            RunMode::Prod => "error",
        }
    }

    /// Suffix appended to export file names
    pub fn file_suffix(&self) -> &'static str {
        match self {
            RunMode::Dev => "_dev",
            RunMode::Prod => "",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Dev => f.write_str("DEV"),
            RunMode::Prod => f.write_str("PROD"),
        }
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(Error::Configuration("mode is missing".to_string())),
            "DEV" => Ok(RunMode::Dev),
            "PROD" => Ok(RunMode::Prod),
            other => Err(Error::Configuration(format!(
                "unknown mode '{other}', expected DEV or PROD"
            ))),
        }
    }
}

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub search: SearchSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Provider endpoint, without query string
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Directory the spreadsheet is written into
    pub directory: PathBuf,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl FileConfig {
    /// Load from the default location; a missing file means defaults
    pub fn load() -> Result<Self> {
        match AppPaths::config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
            .map_err(|e| Error::Configuration(format!("invalid {}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Everything the program needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub keyword: String,
    pub credentials: Credentials,
    pub mode: RunMode,
    pub endpoint: String,
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load from `.env`, the process environment and the optional config file
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let file = FileConfig::load()?;
        Self::from_lookup(|name| std::env::var(name).ok(), file)
    }

    /// Resolve settings through `lookup`, falling back to `file` for optional ones
    pub fn from_lookup<F>(lookup: F, file: FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode: RunMode = lookup(MODE_VAR).unwrap_or_default().parse()?;
        let keyword = required(&lookup, KEYWORD_VAR)?;
        let client_id = required(&lookup, CLIENT_ID_VAR)?;
        let client_secret = required(&lookup, CLIENT_SECRET_VAR)?;
        let credentials = Credentials::new(client_id, client_secret)?;

        let endpoint = optional(&lookup, ENDPOINT_VAR).unwrap_or(file.search.endpoint);
        let output_dir = optional(&lookup, OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(file.output.directory);

        Ok(Self {
            keyword,
            credentials,
            mode,
            endpoint,
            output_dir,
        })
    }

    /// Destination for this run's spreadsheet
    pub fn output_path(&self, now: DateTime<Utc>) -> PathBuf {
        AppPaths::export_path(&self.output_dir, now, &self.keyword, self.mode)
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or_else(|| Error::Configuration(format!("{name} is missing")))
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}
