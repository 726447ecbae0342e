use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::io;

use crate::models::Record;
use crate::store::{RecordStore, StoreError};

/// In-memory stand-in for the CSV file.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Record> {
        self.records.lock().expect("memory store poisoned").clone()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write("memory", io::Error::other("writes disabled")));
        }

        *self.records.lock().expect("memory store poisoned") = records.to_vec();
        Ok(())
    }
}
