use std::io;

use thiserror::Error;

pub mod storage;
pub mod transaction;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Invalid connection string [{0}], expected memory:// or file://<path>")]
    InvalidConnectionString(String),

    #[error("Unable to initialize persistence: {0}")]
    UnableToInitializePersistence(#[source] io::Error),

    #[error("Unable to write transaction: {0}")]
    UnableToWriteTransaction(#[source] io::Error),

    #[error("Unable to sync transaction buffer to persistent storage: {0}")]
    UnableToSyncTransactionBufferToPersistentStorage(#[source] io::Error),

    #[error("Unable to truncate transaction log: {0}")]
    UnableToTruncateTransactionLog(#[source] io::Error),

    #[error("Unable to load previous transactions: {0}")]
    UnableToLoadPreviousTransactions(#[source] io::Error),

    #[error("Unable to serialize transaction: {0}")]
    UnableToSerializeTransaction(#[source] serde_json::Error),

    #[error("Corrupt transaction on line {line}: {source}")]
    CorruptTransaction {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
