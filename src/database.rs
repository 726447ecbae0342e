use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::store::{CsvStore, RecordRepository, StoreError};

pub type Database = Arc<RecordRepository>;

pub async fn open_database(data_file: &Path) -> Result<Database, StoreError> {
    let repository = RecordRepository::new(Arc::new(CsvStore::new(data_file)));

    // Check the file is readable and well-formed before serving requests.
    let records = repository.load_all().await?;

    info!("Opened {} with {} records", data_file.display(), records.len());
    Ok(Arc::new(repository))
}
