//! Utility functions and helpers
//!
//! Filesystem locations and logging setup.

pub mod app_paths;
pub mod logging;
