use std::{io, thread, time::Instant};

use flume::Receiver;
use num_format::{Locale, ToFormattedString};
use thiserror::Error;

use crate::{
    consts::consts::{EntityId, TransactionId},
    model::statement::{Statement, StatementResult},
    persistence::{storage::Storage, transaction::TransactionLog, PersistenceError},
};

use super::{
    options::DatabaseOptions,
    request_manager::{
        DatabaseRequest, DatabaseRequestAction, DatabaseResponseAction, RequestManager,
    },
    table::{
        row::PersonRow,
        table::{ApplyErrors, PersonTable},
    },
};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Unable to replay transaction {0}: {1}")]
    UnableToReplayTransaction(TransactionId, #[source] ApplyErrors),

    #[error("Unable to start database thread: {0}")]
    UnableToStartThread(#[source] io::Error),
}

pub struct Database {
    person_table: PersonTable,
    transaction_log: TransactionLog,
}

impl Database {
    /// Opens the storage engine and, when enabled, rebuilds the table from the transaction log
    pub fn new(options: DatabaseOptions) -> Result<Self, DatabaseError> {
        let storage = options.storage_engine.create_storage()?;

        Self::from_storage(storage, &options)
    }

    /// Same as `new`, on a storage the caller has already opened
    pub fn from_storage(
        storage: Box<dyn Storage + Send>,
        options: &DatabaseOptions,
    ) -> Result<Self, DatabaseError> {
        let mut database = Self {
            person_table: PersonTable::new(),
            transaction_log: TransactionLog::new(storage, options.write_mode.clone()),
        };

        log::info!(
            "Transaction Log Location: [{}]",
            database.transaction_log.location()
        );

        if options.restore {
            database.restore()?;
        }

        Ok(database)
    }

    fn restore(&mut self) -> Result<(), DatabaseError> {
        let now = Instant::now();

        let restored_transactions = self.transaction_log.restore()?;
        let restored_transaction_count = restored_transactions.len();

        for transaction in restored_transactions {
            self.person_table
                .apply(transaction.statement, transaction.id.clone())
                .map_err(|e| DatabaseError::UnableToReplayTransaction(transaction.id.clone(), e))?;

            self.transaction_log.set_current_transaction_id(transaction.id);
        }

        log::info!(
            "✅ Successful Restore [Duration: {}ms]",
            now.elapsed().as_millis(),
        );

        log::info!(
            "📀 Data               [Rows: {}, TransactionsApplied: {}, CurrentTxId: {}]",
            self.person_table.len().to_formatted_string(&Locale::en),
            restored_transaction_count.to_formatted_string(&Locale::en),
            self.transaction_log
                .get_current_transaction_id()
                .to_number()
                .to_formatted_string(&Locale::en)
        );

        Ok(())
    }

    /// Moves the database onto its own thread, the returned request manager is the only way to reach it
    pub fn run(self) -> Result<RequestManager, DatabaseError> {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseRequest>();

        thread::Builder::new()
            .name("Database".to_string())
            .spawn(move || self.listen(database_receiver))
            .map_err(DatabaseError::UnableToStartThread)?;

        Ok(RequestManager::new(database_sender))
    }

    // Process incoming requests from the channel until shutdown, or until every sender is dropped
    fn listen(mut self, database_receiver: Receiver<DatabaseRequest>) {
        while let Ok(DatabaseRequest {
            action,
            response_sender,
        }) = database_receiver.recv()
        {
            log::debug!("Received request: {}", action.log_format());

            let statement = match action {
                DatabaseRequestAction::Request(statement) => statement,
                DatabaseRequestAction::Shutdown => {
                    let _ = response_sender.send(DatabaseResponseAction::Response(
                        StatementResult::SuccessStatus("Successfully shutdown database".to_string()),
                    ));

                    log::info!("Database shut down");

                    return;
                }
            };

            let response = self.process_statement(statement);

            // The caller may have gone away, there is nobody left to tell
            let _ = response_sender.send(response);
        }
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseResponseAction {
        let applying_transaction_id = self.transaction_log.get_current_transaction_id().increment();

        // Kept so a mutation can be undone when the log cannot be written
        let previous_row = target_id(&statement).map(|id| {
            (
                id.clone(),
                self.person_table.person_rows.get(id).cloned(),
            )
        });

        let statement_result = match self
            .person_table
            .apply(statement.clone(), applying_transaction_id.clone())
        {
            Ok(statement_result) => statement_result,
            Err(err) => {
                log::warn!("⚠️  Rejected: {}", err);
                return DatabaseResponseAction::StatementFailed(err.to_string());
            }
        };

        if !statement_result.changed_table() {
            return DatabaseResponseAction::Response(statement_result);
        }

        match self
            .transaction_log
            .commit(applying_transaction_id.clone(), &statement)
        {
            Ok(()) => {
                log::info!("✅ Committed: [TX: {}]", applying_transaction_id);

                DatabaseResponseAction::Response(statement_result)
            }
            Err(err) => {
                log::error!(
                    "⚠️  Rolled back: [TX: {}] {}",
                    applying_transaction_id,
                    err
                );

                if let Some((id, row)) = previous_row {
                    self.rollback(id, row);
                }

                DatabaseResponseAction::StatementFailed(err.to_string())
            }
        }
    }

    fn rollback(&mut self, id: EntityId, previous_row: Option<PersonRow>) {
        match previous_row {
            Some(row) => {
                self.person_table.person_rows.insert(id, row);
            }
            None => {
                self.person_table.person_rows.remove(&id);
            }
        }
    }
}

fn target_id(statement: &Statement) -> Option<&EntityId> {
    match statement {
        Statement::Add(person) => Some(&person.id),
        Statement::Update(id, _) | Statement::Remove(id) => Some(id),
        Statement::List => None,
    }
}

pub mod test_utils {
    use crate::database::{options::DatabaseOptions, request_manager::RequestManager};

    use super::Database;

    /// Starts an in-memory database thread, used by tests and benchmarks
    pub fn start_memory_database() -> RequestManager {
        Database::new(DatabaseOptions::new_memory())
            .and_then(Database::run)
            .expect("in-memory database should always start")
    }
}
