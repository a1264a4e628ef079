use std::collections::HashMap;
use thiserror::Error;

use crate::{
    consts::consts::{EntityId, TransactionId},
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

use super::row::PersonRow;

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // CRUD - CREATE
    #[error("Cannot create, record already exists: {0}")]
    CannotCreateWhenAlreadyExists(EntityId),
}

#[derive(Debug, Default)]
pub struct PersonTable {
    pub person_rows: HashMap<EntityId, PersonRow>,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.person_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_rows.is_empty()
    }

    pub fn apply(
        &mut self,
        statement: Statement,
        transaction_id: TransactionId,
    ) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(person) => {
                if self.person_rows.contains_key(&person.id) {
                    return Err(ApplyErrors::CannotCreateWhenAlreadyExists(person.id));
                }

                self.person_rows.insert(
                    person.id.clone(),
                    PersonRow::new(person.clone(), transaction_id),
                );

                StatementResult::Single(person)
            }
            Statement::Update(id, update_person) => {
                // Updating a missing record is not an error, the caller gets nothing back
                let updated = self.person_rows.get_mut(&id).map(|row| {
                    row.person = row.person.with_update(&update_person);
                    row.person.clone()
                });

                StatementResult::Updated(updated)
            }
            Statement::Remove(id) => {
                let removed = self.person_rows.remove(&id).map(|row| row.person);

                StatementResult::Removed(removed)
            }
            Statement::List => StatementResult::List(self.list()),
        };

        Ok(statement_result)
    }

    /// Every person in the table, oldest first
    pub fn list(&self) -> Vec<Person> {
        let mut rows: Vec<&PersonRow> = self.person_rows.values().collect();

        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        rows.into_iter().map(|row| row.person.clone()).collect()
    }
}
