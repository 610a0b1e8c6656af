//! History Module - Append-only CSV scan log
//!
//! Rows accumulate without bound; there is no deduplication or compaction.
//! Appends follow the column order of the header already on disk, so logs
//! written by older tools (without `ScannedAt`/`ScanId`) keep loading.

mod row;


use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::HistoryError;
use super::scanner::ScanRecord;
use row::HistoryRow;

/// Column set of a history log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySchema {
    /// `SSID,BSSID,Signal` - written by the CLI scanner
    Basic,
    /// `SSID,BSSID,Signal,Channel,Vendor,ScannedAt,ScanId` - written by the HTTP scanner
    Rich,
}

impl HistorySchema {
    /// Columns written for a new file
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            HistorySchema::Basic => &["SSID", "BSSID", "Signal"],
            HistorySchema::Rich => &["SSID", "BSSID", "Signal", "Channel", "Vendor", "ScannedAt", "ScanId"],
        }
    }

    /// Columns an existing file must carry
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            HistorySchema::Basic => &["SSID", "BSSID", "Signal"],
            HistorySchema::Rich => &["SSID", "BSSID", "Signal", "Channel", "Vendor"],
        }
    }
}

pub struct HistoryStore {
    path: PathBuf,
    schema: HistorySchema,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, schema: HistorySchema) -> Self {
        Self {
            path: path.into(),
            schema,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> HistorySchema {
        self.schema
    }

    /// Append a scan batch. Empty batches leave the file untouched.
    pub fn append(&self, records: &[ScanRecord]) -> Result<(), HistoryError> {
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let existing_header = self.read_header()?;
        let (header, write_header) = match existing_header {
            Some(header) => {
                self.check_columns(&header)?;
                (header, false)
            }
            None => (
                self.schema.columns().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
                true,
            ),
        };

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if !write_header && !ends_with_newline(&self.path)? {
            // Last row was cut short (e.g. hand edit); start on a fresh line
            file.write_all(b"\n")?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(&header)?;
        }
        for record in records {
            writer.write_record(header.iter().map(|column| row::field(record, column)))?;
        }
        writer.flush()?;

        log::debug!("Appended {} rows to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Load the whole log. A missing or empty file is an empty history.
    pub fn load(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        let _guard = self.lock.lock();

        if !self.path.exists() {
            log::info!("No history at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.iter().all(|h| h.is_empty()) {
            return Ok(Vec::new());
        }
        self.check_columns(&header)?;

        let mut records = Vec::new();
        for result in reader.deserialize::<HistoryRow>() {
            records.push(result?.into_record());
        }

        Ok(records)
    }

    /// Number of rows currently in the log
    pub fn row_count(&self) -> Result<usize, HistoryError> {
        self.load().map(|rows| rows.len())
    }

    fn read_header(&self) -> Result<Option<Vec<String>>, HistoryError> {
        if !self.path.exists() || fs::metadata(&self.path)?.len() == 0 {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let header = reader.headers()?.iter().map(str::to_string).collect();
        Ok(Some(header))
    }

    fn check_columns(&self, header: &[String]) -> Result<(), HistoryError> {
        for column in self.schema.required_columns() {
            if !header.iter().any(|h| h == column) {
                return Err(HistoryError::MissingColumn {
                    path: self.path.display().to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
