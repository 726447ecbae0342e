mod csv_store;
mod errors;
#[cfg(test)]
mod memory;
mod repository;

use crate::models::Record;

pub use csv_store::CsvStore;
pub use errors::StoreError;
#[cfg(test)]
pub use memory::MemoryStore;
pub use repository::RecordRepository;

/// Backing storage for the full record set. Implementations are blocking and
/// are driven from `spawn_blocking` by [`RecordRepository`].
pub trait RecordStore: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<Record>, StoreError>;
    fn save(&self, records: &[Record]) -> Result<(), StoreError>;
}
