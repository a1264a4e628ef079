use crate::{consts::consts::TransactionId, model::person::Person};

#[derive(Clone, Debug, PartialEq)]
pub struct PersonRow {
    /// Transaction that created the row, lists are ordered by it
    pub created_at: TransactionId,
    pub person: Person,
}

impl PersonRow {
    pub fn new(person: Person, transaction_id: TransactionId) -> Self {
        PersonRow {
            created_at: transaction_id,
            person,
        }
    }
}
