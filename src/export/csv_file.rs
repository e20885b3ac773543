use crate::errors::{AppError, AppResult};
use crate::export::model::{ReportRow, headers, row_to_record};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Write the report as `;`-separated CSV with a UTF-8 BOM.
pub(crate) fn export_csv(rows: &[ReportRow], path: &Path, with_user: bool) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(file);

    wtr.write_record(headers(with_user))
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for row in rows {
        wtr.write_record(row_to_record(row, with_user))
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}
