pub mod person;
pub mod statement;
