use std::fs;
use std::io::Write;
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use tempfile::NamedTempFile;

use crate::models::{Record, RecordRow, COLUMNS};
use crate::store::{RecordStore, StoreError};

/// Record set kept in a Latin-1 encoded CSV file with a header row.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, text: &str) -> Result<Vec<Record>, StoreError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::None)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (index, result) in reader.deserialize::<RecordRow>().enumerate() {
            let row = result.map_err(|error| StoreError::csv(&self.path, error))?;
            let record = Record::try_from(row)
                .map_err(|source| StoreError::Row { row: index + 1, source })?;
            records.push(record);
        }

        Ok(records)
    }

    fn render(&self, records: &[Record]) -> Result<Vec<u8>, StoreError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(COLUMNS)
            .map_err(|error| StoreError::csv(&self.path, error))?;
        for record in records {
            writer
                .serialize(RecordRow::from(record))
                .map_err(|error| StoreError::csv(&self.path, error))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|error| StoreError::write(&self.path, error.into_error()))?;

        encode_latin1(&String::from_utf8_lossy(&bytes))
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|error| StoreError::read(&self.path, error))?;
        let records = self.parse(&decode_latin1(&bytes))?;

        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        // Encoding failures surface here, before the file is touched.
        let bytes = self.render(records)?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = NamedTempFile::new_in(&directory)
            .map_err(|error| StoreError::write(&self.path, error))?;
        file.write_all(&bytes)
            .and_then(|_| file.as_file().sync_all())
            .map_err(|error| StoreError::write(&self.path, error))?;
        // Temp files are created owner-only; keep the existing file's mode.
        if let Ok(metadata) = fs::metadata(&self.path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|error| StoreError::write(&self.path, error))?;
        }
        file.persist(&self.path)
            .map_err(|error| StoreError::write(&self.path, error.error))?;

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Every Latin-1 byte maps to the Unicode code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

pub fn encode_latin1(text: &str) -> Result<Vec<u8>, StoreError> {
    text.chars()
        .map(|character| u8::try_from(u32::from(character)).map_err(|_| StoreError::Encoding { character }))
        .collect()
}
