//! Configuration module
//!
//! Settings are resolved once at startup from the environment, an optional
//! `.env` file and an optional `config.toml`, then passed around explicitly.

pub mod config;

pub use config::{AppConfig, FileConfig, RunMode};
