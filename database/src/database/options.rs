use std::path::PathBuf;

use uuid::Uuid;

use crate::persistence::{storage::StorageEngine, transaction::TransactionWriteMode};

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub restore: bool,
    pub write_mode: TransactionWriteMode,
    pub storage_engine: StorageEngine,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    /// Defines whether we should rebuild the table from the transaction log on startup
    pub fn set_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Defines whether we should sync the file write to disk before answering the caller.
    /// This is useful for durability but can be slow ~3ms per sync
    pub fn set_write_mode(mut self, write_mode: TransactionWriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        // Defaults to $CWD/data
        Self {
            write_mode: TransactionWriteMode::Sync,
            storage_engine: StorageEngine::File(PathBuf::from("data")),
            restore: true,
        }
    }
}

impl DatabaseOptions {
    pub fn new_memory() -> Self {
        DatabaseOptions::default()
            .set_storage_engine(StorageEngine::Memory)
            .set_restore(false)
    }

    /// File backed options in a fresh directory under /tmp/people
    pub fn new_test() -> Self {
        let database_dir: PathBuf = ["/", "tmp", "people", &Uuid::new_v4().to_string()]
            .iter()
            .collect();

        DatabaseOptions::default()
            .set_storage_engine(StorageEngine::File(database_dir))
            .set_write_mode(TransactionWriteMode::OSBuffered)
    }
}
