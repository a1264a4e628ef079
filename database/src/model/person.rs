use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::consts::consts::EntityId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    pub age: Number,
}

impl Person {
    pub fn new(name: String, age: Number) -> Self {
        Person {
            id: EntityId::new(),
            name,
            age,
        }
    }

    /// Returns a copy of the person with the given changes applied, the id never changes
    pub fn with_update(&self, update: &UpdatePersonData) -> Person {
        let mut updated = self.clone();

        if let Some(name) = &update.name {
            updated.name = name.clone();
        }

        if let Some(age) = &update.age {
            updated.age = age.clone();
        }

        updated
    }

    pub fn new_test() -> Self {
        Person {
            id: EntityId("1".to_string()),
            name: "Ann".to_string(),
            age: Number::from(30),
        }
    }
}

/// Payload used to create a person, the store assigns the id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub age: Number,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, age: impl Into<Number>) -> Self {
        NewPerson {
            name: name.into(),
            age: age.into(),
        }
    }

    pub fn into_person(self) -> Person {
        Person::new(self.name, self.age)
    }
}

/// Partial update of a person. Fields that are absent (or null) are left unchanged
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UpdatePersonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
}

impl UpdatePersonData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}
