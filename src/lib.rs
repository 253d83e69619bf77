pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
pub mod utils;

pub use error::{Error, ExportCause, Result};
