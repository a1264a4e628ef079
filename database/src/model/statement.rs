use serde::{Deserialize, Serialize};

use crate::consts::consts::EntityId;

use super::person::{Person, UpdatePersonData};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Statement {
    Add(Person),
    Update(EntityId, UpdatePersonData),
    Remove(EntityId),
    /// Returns every person currently in the table
    List,
}

impl Statement {
    pub fn is_query(&self) -> bool {
        !self.is_mutation()
    }

    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::Remove(_) | Statement::Update(_, _) => true,
            Statement::List => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum StatementResult {
    /// Used for database status messages
    SuccessStatus(String),
    Single(Person),
    List(Vec<Person>),
    /// `None` when there was no record with the requested id
    Updated(Option<Person>),
    /// The person that was removed, `None` when there was no record with the requested id
    Removed(Option<Person>),
}

impl StatementResult {
    /// A mutation that matched no record leaves the table untouched and is not logged
    pub fn changed_table(&self) -> bool {
        match self {
            StatementResult::Single(_) => true,
            StatementResult::Updated(person) | StatementResult::Removed(person) => {
                person.is_some()
            }
            StatementResult::SuccessStatus(_) | StatementResult::List(_) => false,
        }
    }

    pub fn single(self) -> Person {
        if let StatementResult::Single(p) = self {
            p
        } else {
            panic!("Statement result is not of type Single")
        }
    }

    pub fn list(self) -> Vec<Person> {
        if let StatementResult::List(l) = self {
            l
        } else {
            panic!("Statement result is not of type List")
        }
    }

    pub fn updated(self) -> Option<Person> {
        if let StatementResult::Updated(p) = self {
            p
        } else {
            panic!("Statement result is not of type Updated")
        }
    }

    pub fn removed(self) -> Option<Person> {
        if let StatementResult::Removed(p) = self {
            p
        } else {
            panic!("Statement result is not of type Removed")
        }
    }

    pub fn success_status(self) -> String {
        if let StatementResult::SuccessStatus(s) = self {
            s
        } else {
            panic!("Statement result is not of type SuccessStatus")
        }
    }
}
