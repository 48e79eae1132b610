//! CSV export of the currently filtered records.
//!
//! Encoding is pure and happens in the plugin; writing the file happens in the
//! worker, which owns filesystem access.
//!
//! - [`encoder`]: [`FlatRecord`] and [`to_csv`]
//! - [`download`]: delivers CSV text as a file in the export directory

pub mod encoder;

pub use encoder::{to_csv, FlatRecord};

use crate::domain::error::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// MIME type of exported files.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// `stock_actions_<YYYY-MM-DD>.csv` for the given export date.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("stock_actions_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `content` to `dir/filename`, replacing an existing file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written. Callers log the failure and carry on; it never reaches the user.
pub fn download(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let _span = tracing::info_span!("download", dir = ?dir, filename = %filename).entered();

    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, content)?;

    tracing::info!(path = ?path, bytes = content.len(), mime = CSV_MIME, "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        assert_eq!(export_filename(date), "stock_actions_2024-07-05.csv");
    }

    #[test]
    fn download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = download(dir.path(), "out.csv", "a\r\n\"1\"").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a\r\n\"1\"");
    }

    #[test]
    fn download_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        assert!(download(&blocker, "out.csv", "a").is_err());
    }
}
