//! Error types shared by the request, search and export stages.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way the pipeline can fail. Nothing is recovered internally; each
/// variant propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing, blank or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not be built or validated, so it was never sent.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Network-level failure while talking to the provider.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider body did not decode as a search result page.
    #[error("failed to decode provider response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response text, kept for diagnostics.
        body: String,
    },

    /// The spreadsheet could not be built or written.
    #[error("failed to export spreadsheet to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: ExportCause,
    },
}

/// Underlying cause of an [`Error::Export`].
#[derive(Debug, Error)]
pub enum ExportCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Excel keeps `History` for its own use, in any letter case.
    #[error("sheet name '{0}' is reserved by Excel")]
    ReservedSheetName(String),
}

impl Error {
    /// Raw response body for decode failures.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Error::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, source: impl Into<ExportCause>) -> Self {
        Error::Export {
            path: path.into(),
            source: source.into(),
        }
    }
}
