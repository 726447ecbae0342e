use std::sync::Arc;

use log::info;
use tokio::sync::Mutex;
use tokio::task::spawn_blocking;

use crate::models::Record;
use crate::store::{RecordStore, StoreError};

/// Load / append / delete over an injected [`RecordStore`].
///
/// Every read-modify-write cycle holds `write_lock`, so writers in the same
/// process never lose each other's updates. Plain loads skip the lock: the
/// backends replace the whole set at once, so a reader always sees a
/// complete snapshot.
pub struct RecordRepository {
    store: Arc<dyn RecordStore>,
    write_lock: Mutex<()>,
}

impl RecordRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The full record set, including rows whose date does not parse.
    pub async fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let store = self.store.clone();
        spawn_blocking(move || store.load()).await?
    }

    /// Appends `record` and rewrites the store. Fails with
    /// [`StoreError::DuplicateSerial`] when the serial number is already taken.
    pub async fn append(&self, record: Record) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_all().await?;
        if records.iter().any(|existing| existing.serial_number == record.serial_number) {
            return Err(StoreError::DuplicateSerial { serial: record.serial_number });
        }

        let serial = record.serial_number;
        records.push(record);
        self.save_all(records).await?;

        info!("Appended record {serial}");
        Ok(())
    }

    /// Removes every record with `serial` and rewrites the store, even when
    /// nothing matched. Returns the number of removed records.
    pub async fn delete_by_serial(&self, serial: i64) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load_all().await?;
        let before = records.len();
        records.retain(|record| record.serial_number != serial);
        let removed = before - records.len();
        self.save_all(records).await?;

        info!("Deleted {removed} record(s) with serial {serial}");
        Ok(removed)
    }

    async fn save_all(&self, records: Vec<Record>) -> Result<(), StoreError> {
        let store = self.store.clone();
        spawn_blocking(move || store.save(&records)).await?
    }
}
