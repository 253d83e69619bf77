use std::fs::File;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::{debug, info};

use crate::data::search_result::SearchResultItem;
use crate::error::{Error, ExportCause, Result};

/// Header row written above the results: Date, Link, Title, Description.
pub const HEADER: [&str; 4] = ["날짜", "링크", "제목", "설명"];

/// Sheet name Excel refuses to open, compared case-insensitively
const RESERVED_SHEET_NAME: &str = "History";

/// Writes search results to a single-sheet xlsx workbook
pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    /// Cell values for each data row, in the same column order as [`HEADER`].
    pub fn rows(items: &[SearchResultItem]) -> Vec<[&str; 4]> {
        items
            .iter()
            .map(|item| {
                [
                    item.pub_date.as_str(),
                    item.link.as_str(),
                    item.title.as_str(),
                    item.description.as_str(),
                ]
            })
            .collect()
    }

    /// Export `items` to `destination` on a sheet named after `keyword`.
    ///
    /// The workbook is assembled in memory before the file is created, so a
    /// bad sheet name or oversized cell never leaves a file behind. A failure
    /// while writing can still leave a partial file at `destination`.
    pub fn export(keyword: &str, items: &[SearchResultItem], destination: &Path) -> Result<()> {
        if keyword.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
            return Err(Error::export(
                destination,
                ExportCause::ReservedSheetName(keyword.to_string()),
            ));
        }

        let mut workbook = Self::build_workbook(keyword, items)
            .map_err(|e| Error::export(destination, e))?;

        let mut file = File::create(destination).map_err(|e| Error::export(destination, e))?;
        workbook
            .save_to_writer(&mut file)
            .map_err(|e| Error::export(destination, e))?;

        info!(
            "Exported {} rows to spreadsheet: {}",
            items.len(),
            destination.display()
        );
        Ok(())
    }

    fn build_workbook(
        keyword: &str,
        items: &[SearchResultItem],
    ) -> std::result::Result<Workbook, rust_xlsxwriter::XlsxError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // set_name rejects illegal names instead of truncating them
        sheet.set_name(keyword)?;

        for (col, title) in (0u16..).zip(HEADER) {
            sheet.write_string(0, col, title)?;
        }

        for (row, cells) in (1u32..).zip(Self::rows(items)) {
            for (col, value) in (0u16..).zip(cells) {
                sheet.write_string(row, col, value)?;
            }
        }

        debug!("Built worksheet '{}' with {} data rows", keyword, items.len());
        Ok(workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn item(n: usize) -> SearchResultItem {
        SearchResultItem {
            title: format!("title {n}"),
            link: format!("https://news.example.com/{n}"),
            description: format!("description {n}"),
            pub_date: format!("Mon, 0{n} Mar 2025 09:00:00 +0900"),
        }
    }

    #[test]
    fn test_rows_follow_header_column_order() {
        let items = vec![item(1), item(2)];
        let rows = SpreadsheetExporter::rows(&items);
        assert_eq!(
            rows,
            vec![
                [
                    "Mon, 01 Mar 2025 09:00:00 +0900",
                    "https://news.example.com/1",
                    "title 1",
                    "description 1"
                ],
                [
                    "Mon, 02 Mar 2025 09:00:00 +0900",
                    "https://news.example.com/2",
                    "title 2",
                    "description 2"
                ],
            ]
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        SpreadsheetExporter::export("java", &[item(1)], &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_illegal_sheet_name_fails_without_creating_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        let err = SpreadsheetExporter::export("a/b", &[item(1)], &path).unwrap_err();
        assert!(matches!(
            err,
            Error::Export {
                source: ExportCause::Xlsx(_),
                ..
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_reserved_sheet_name_fails_without_creating_file() {
        let dir = tempdir().unwrap();
        for keyword in ["History", "history", "HISTORY"] {
            let path = dir.path().join(format!("{keyword}.xlsx"));
            let err = SpreadsheetExporter::export(keyword, &[item(1)], &path).unwrap_err();
            assert!(matches!(
                err,
                Error::Export {
                    source: ExportCause::ReservedSheetName(ref name),
                    ..
                } if name == keyword
            ));
            assert!(!path.exists());
        }

        let path = dir.path().join("histories.xlsx");
        SpreadsheetExporter::export("Histories", &[item(1)], &path).unwrap();
    }

    #[test]
    fn test_long_sheet_name_is_not_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.xlsx");
        let keyword = "k".repeat(40);
        let err = SpreadsheetExporter::export(&keyword, &[], &path).unwrap_err();
        assert!(matches!(err, Error::Export { .. }));
    }

    #[test]
    fn test_missing_directory_is_an_io_export_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        let err = SpreadsheetExporter::export("java", &[item(1)], &path).unwrap_err();
        match err {
            Error::Export { path: failed, source } => {
                assert_eq!(failed, path);
                assert!(matches!(source, ExportCause::Io(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
