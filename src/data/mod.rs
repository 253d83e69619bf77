//! Search result records and their spreadsheet export
//!
//! The records mirror the provider's JSON; the exporter turns a list of
//! them into a workbook.

pub mod data_exporter;
pub mod search_result;

pub use data_exporter::{SpreadsheetExporter, HEADER};
pub use search_result::{SearchResultItem, SearchResultPage};
