use serde::{Deserialize, Serialize};

use crate::consts::consts::TransactionId;
use crate::model::statement::Statement;

use super::storage::Storage;
use super::{PersistenceError, PersistenceResult};

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionWriteMode {
    /// Writes the log and performs an fsync before the caller is answered
    Sync,
    /// Writes the log, lets the OS buffer the writes
    OSBuffered,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub statement: Statement,
}

/// Append-only log of committed mutations, one JSON document per line
pub struct TransactionLog {
    storage: Box<dyn Storage + Send>,
    write_mode: TransactionWriteMode,
    current_transaction_id: TransactionId,
}

impl TransactionLog {
    pub fn new(storage: Box<dyn Storage + Send>, write_mode: TransactionWriteMode) -> Self {
        Self {
            storage,
            write_mode,
            current_transaction_id: TransactionId::new_first_transaction(),
        }
    }

    pub fn get_current_transaction_id(&self) -> &TransactionId {
        &self.current_transaction_id
    }

    pub fn set_current_transaction_id(&mut self, transaction_id: TransactionId) {
        self.current_transaction_id = transaction_id;
    }

    pub fn location(&self) -> String {
        self.storage.describe()
    }

    pub fn commit(
        &mut self,
        applied_transaction_id: TransactionId,
        statement: &Statement,
    ) -> PersistenceResult<()> {
        let transaction_json = serde_json::to_string(&Transaction {
            id: applied_transaction_id.clone(),
            statement: statement.clone(),
        })
        .map_err(PersistenceError::UnableToSerializeTransaction)?;

        let committed_len = self.storage.transaction_len()?;

        // A failed commit must not leave its line (or half of it) behind for the next restore
        if let Err(err) = self.append(&transaction_json) {
            if let Err(truncate_err) = self.storage.transaction_truncate(committed_len) {
                log::error!(
                    "Transaction log may hold an incomplete commit [TX: {}]: {}",
                    applied_transaction_id,
                    truncate_err
                );
            }

            return Err(err);
        }

        self.current_transaction_id = applied_transaction_id;

        Ok(())
    }

    fn append(&mut self, transaction_json: &str) -> PersistenceResult<()> {
        self.storage
            .transaction_write(format!("{}\n", transaction_json).as_bytes())?;

        if self.write_mode == TransactionWriteMode::Sync {
            self.storage.transaction_sync()?;
        }

        Ok(())
    }

    pub fn restore(&mut self) -> PersistenceResult<Vec<Transaction>> {
        let contents = self.storage.transaction_load()?;

        let mut transactions: Vec<Transaction> = vec![];

        for (index, transaction_string) in contents.split('\n').enumerate() {
            if transaction_string.is_empty() {
                continue;
            }

            let transaction = serde_json::from_str(transaction_string).map_err(|source| {
                PersistenceError::CorruptTransaction {
                    line: index + 1,
                    source,
                }
            })?;

            transactions.push(transaction);
        }

        Ok(transactions)
    }
}
