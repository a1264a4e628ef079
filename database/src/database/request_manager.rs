use flume::Sender;
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::{NewPerson, Person, UpdatePersonData},
        statement::{Statement, StatementResult},
    },
};

pub enum DatabaseRequestAction {
    Request(Statement),
    Shutdown,
}

impl DatabaseRequestAction {
    pub fn log_format(&self) -> &'static str {
        match self {
            DatabaseRequestAction::Request(Statement::Add(_)) => "Add",
            DatabaseRequestAction::Request(Statement::Update(_, _)) => "Update",
            DatabaseRequestAction::Request(Statement::Remove(_)) => "Remove",
            DatabaseRequestAction::Request(Statement::List) => "List",
            DatabaseRequestAction::Shutdown => "Shutdown",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum DatabaseResponseAction {
    Response(StatementResult),
    StatementFailed(String),
}

pub struct DatabaseRequest {
    pub response_sender: oneshot::Sender<DatabaseResponseAction>,
    pub action: DatabaseRequestAction,
}

#[derive(Error, Debug, PartialEq)]
pub enum RequestManagerError {
    #[error("Database is not running")]
    DatabaseUnavailable,
    #[error("Statement failed: {0}")]
    StatementFailed(String),
}

/// Simple, type safe interface for talking to the database thread.
///
/// Every request is sent over the database channel together with a oneshot sender,
/// the database answers on it once the statement has been applied (and logged).
#[derive(Clone)]
pub struct RequestManager {
    database_sender: Sender<DatabaseRequest>,
}

impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseRequest>) -> Self {
        Self { database_sender }
    }

    /// Creates a person, the database assigns the id
    pub fn send_add(&self, new_person: NewPerson) -> Result<Person, RequestManagerError> {
        let statement_result =
            self.send_single_statement(Statement::Add(new_person.into_person()))?;

        Ok(statement_result.single())
    }

    pub fn send_list(&self) -> Result<Vec<Person>, RequestManagerError> {
        let statement_result = self.send_single_statement(Statement::List)?;

        Ok(statement_result.list())
    }

    /// Returns `None` when there is no person with the id
    pub fn send_update(
        &self,
        id: EntityId,
        person_update: UpdatePersonData,
    ) -> Result<Option<Person>, RequestManagerError> {
        let statement_result = self.send_single_statement(Statement::Update(id, person_update))?;

        Ok(statement_result.updated())
    }

    /// Returns the removed person, `None` when there was no person with the id
    pub fn send_remove(&self, id: EntityId) -> Result<Option<Person>, RequestManagerError> {
        let statement_result = self.send_single_statement(Statement::Remove(id))?;

        Ok(statement_result.removed())
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        let statement_result = self.send_database_request(DatabaseRequestAction::Shutdown)?;

        Ok(statement_result.success_status())
    }

    pub fn send_single_statement(
        &self,
        statement: Statement,
    ) -> Result<StatementResult, RequestManagerError> {
        self.send_database_request(DatabaseRequestAction::Request(statement))
    }

    fn send_database_request(
        &self,
        database_request: DatabaseRequestAction,
    ) -> Result<StatementResult, RequestManagerError> {
        let (response_sender, response_receiver) = oneshot::channel::<DatabaseResponseAction>();

        let request = DatabaseRequest {
            response_sender,
            action: database_request,
        };

        // Sends the request to the database worker, database will respond
        //  on the response_receiver once it's finished processing the request
        self.database_sender
            .send(request)
            .map_err(|_| RequestManagerError::DatabaseUnavailable)?;

        match response_receiver.recv() {
            Ok(DatabaseResponseAction::Response(statement_result)) => Ok(statement_result),
            Ok(DatabaseResponseAction::StatementFailed(s)) => {
                Err(RequestManagerError::StatementFailed(s))
            }
            Err(oneshot::RecvError) => Err(RequestManagerError::DatabaseUnavailable),
        }
    }
}
