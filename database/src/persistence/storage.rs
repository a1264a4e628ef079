use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Read, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::consts::consts::TRANSACTION_LOG_FILE_NAME;

use super::{PersistenceError, PersistenceResult};

/// Where the database keeps its records
#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    /// Nothing is written, records live for the lifetime of the process
    Memory,
    /// Transactions are appended to a log inside the directory
    File(PathBuf),
}

impl StorageEngine {
    pub fn create_storage(&self) -> PersistenceResult<Box<dyn Storage + Send>> {
        let storage: Box<dyn Storage + Send> = match self {
            StorageEngine::Memory => Box::new(MemoryStorage),
            StorageEngine::File(path) => Box::new(FileStorage::new(path.clone())?),
        };

        Ok(storage)
    }
}

/// Parses a connection string such as `memory://`, `file://data` or a bare directory path
impl FromStr for StorageEngine {
    type Err = PersistenceError;

    fn from_str(connection_string: &str) -> Result<Self, Self::Err> {
        let connection_string = connection_string.trim();

        if connection_string == "memory" || connection_string == "memory://" {
            return Ok(StorageEngine::Memory);
        }

        let path = match connection_string.split_once("://") {
            Some(("file", path)) => path,
            Some(_) => {
                return Err(PersistenceError::InvalidConnectionString(
                    connection_string.to_string(),
                ))
            }
            None => connection_string,
        };

        if path.is_empty() {
            return Err(PersistenceError::InvalidConnectionString(
                connection_string.to_string(),
            ));
        }

        Ok(StorageEngine::File(PathBuf::from(path)))
    }
}

pub trait Storage {
    /// Appends bytes to the transaction log, may be buffered by the OS
    fn transaction_write(&mut self, transaction: &[u8]) -> PersistenceResult<()>;
    /// Makes previous writes durable
    fn transaction_sync(&self) -> PersistenceResult<()>;
    /// Reads back everything previously written to the transaction log
    fn transaction_load(&mut self) -> PersistenceResult<String>;
    /// Current size of the transaction log in bytes
    fn transaction_len(&self) -> PersistenceResult<u64>;
    /// Cuts the transaction log back to `len` bytes, dropping a commit that did not complete
    fn transaction_truncate(&mut self, len: u64) -> PersistenceResult<()>;
    fn describe(&self) -> String;
}

pub struct MemoryStorage;

impl Storage for MemoryStorage {
    fn transaction_write(&mut self, _: &[u8]) -> PersistenceResult<()> {
        Ok(())
    }

    fn transaction_sync(&self) -> PersistenceResult<()> {
        Ok(())
    }

    fn transaction_load(&mut self) -> PersistenceResult<String> {
        Ok(String::new())
    }

    fn transaction_len(&self) -> PersistenceResult<u64> {
        Ok(0)
    }

    fn transaction_truncate(&mut self, _: u64) -> PersistenceResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

pub struct FileStorage {
    log_file: File,
    transaction_file_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> PersistenceResult<Self> {
        let transaction_file_path = base_path.join(TRANSACTION_LOG_FILE_NAME);

        fs::create_dir_all(&base_path).map_err(PersistenceError::UnableToInitializePersistence)?;

        let log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&transaction_file_path)
            .map_err(PersistenceError::UnableToInitializePersistence)?;

        Ok(Self {
            log_file,
            transaction_file_path,
        })
    }
}

impl Storage for FileStorage {
    fn transaction_write(&mut self, transaction: &[u8]) -> PersistenceResult<()> {
        // Buffered OS write, is not 'durable' without the fsync
        self.log_file
            .write_all(transaction)
            .map_err(PersistenceError::UnableToWriteTransaction)
    }

    fn transaction_sync(&self) -> PersistenceResult<()> {
        self.log_file
            .sync_all()
            .map_err(PersistenceError::UnableToSyncTransactionBufferToPersistentStorage)
    }

    // File may or may not exist
    fn transaction_load(&mut self) -> PersistenceResult<String> {
        let mut contents = String::new();

        let mut file = match File::open(&self.transaction_file_path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(contents),
            Err(err) => return Err(PersistenceError::UnableToLoadPreviousTransactions(err)),
        };

        file.read_to_string(&mut contents)
            .map_err(PersistenceError::UnableToLoadPreviousTransactions)?;

        Ok(contents)
    }

    fn transaction_len(&self) -> PersistenceResult<u64> {
        self.log_file
            .metadata()
            .map(|metadata| metadata.len())
            .map_err(PersistenceError::UnableToTruncateTransactionLog)
    }

    // The file is opened in append mode, later writes land at the new end
    fn transaction_truncate(&mut self, len: u64) -> PersistenceResult<()> {
        self.log_file
            .set_len(len)
            .map_err(PersistenceError::UnableToTruncateTransactionLog)?;

        self.log_file
            .sync_all()
            .map_err(PersistenceError::UnableToSyncTransactionBufferToPersistentStorage)
    }

    fn describe(&self) -> String {
        self.transaction_file_path.display().to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_memory_connection_strings() {
        assert_eq!("memory://".parse::<StorageEngine>().ok(), Some(StorageEngine::Memory));
        assert_eq!("memory".parse::<StorageEngine>().ok(), Some(StorageEngine::Memory));
    }

    #[test]
    fn parses_file_connection_strings() {
        assert_eq!(
            "file://data/people".parse::<StorageEngine>().ok(),
            Some(StorageEngine::File(PathBuf::from("data/people")))
        );
        assert_eq!(
            "/var/lib/people".parse::<StorageEngine>().ok(),
            Some(StorageEngine::File(PathBuf::from("/var/lib/people")))
        );
    }

    #[test]
    fn rejects_unknown_schemes() {
        let result = "mongodb://localhost:27017/people".parse::<StorageEngine>();

        assert!(matches!(
            result,
            Err(PersistenceError::InvalidConnectionString(_))
        ));
    }

    #[test]
    fn rejects_empty_paths() {
        assert!("file://".parse::<StorageEngine>().is_err());
        assert!("".parse::<StorageEngine>().is_err());
    }
}
