use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::config::RunMode;

pub const APP_DIR: &str = "news-export";
pub const CONFIG_ENV_VAR: &str = "NEWS_EXPORT_CONFIG";

pub struct AppPaths;

impl AppPaths {
    /// `$NEWS_EXPORT_CONFIG`, else `<config_dir>/news-export/config.toml`
    pub fn config_file() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// `<epoch-millis>_<keyword>[_dev].xlsx`
    pub fn export_file_name(now: DateTime<Utc>, keyword: &str, mode: RunMode) -> String {
        format!(
            "{}_{}{}.xlsx",
            now.timestamp_millis(),
            keyword,
            mode.file_suffix()
        )
    }

    pub fn export_path(dir: &Path, now: DateTime<Utc>, keyword: &str, mode: RunMode) -> PathBuf {
        dir.join(Self::export_file_name(now, keyword, mode))
    }
}
