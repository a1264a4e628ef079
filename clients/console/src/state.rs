use database::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person, UpdatePersonData},
};
use serde_json::Number;
use thiserror::Error;

/// Shown to the user instead of sending a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Alert {
    #[error("Enter name & age")]
    MissingNameOrAge,
    #[error("Age must be a number")]
    AgeNotNumeric,
}

/// Text typed into the form, kept exactly as entered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonForm {
    pub name: String,
    pub age: String,
}

impl PersonForm {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            age: person.age.to_string(),
        }
    }

    fn parsed_age(&self) -> Option<Number> {
        self.age.trim().parse::<Number>().ok()
    }

    pub fn to_new_person(&self) -> Result<NewPerson, Alert> {
        if self.name.is_empty() || self.age.is_empty() {
            return Err(Alert::MissingNameOrAge);
        }

        let age = self.parsed_age().ok_or(Alert::AgeNotNumeric)?;

        Ok(NewPerson {
            name: self.name.clone(),
            age,
        })
    }

    /// Blank or unparsable fields are left out so the server keeps their current value
    pub fn to_update(&self) -> UpdatePersonData {
        UpdatePersonData {
            name: Some(self.name.clone()).filter(|name| !name.is_empty()),
            age: self.parsed_age(),
        }
    }
}

/// Everything the view shows: the people we know about, the form and the record being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeopleState {
    pub people: Vec<Person>,
    pub form: PersonForm,
    pub editing: Option<EntityId>,
}

impl PeopleState {
    pub fn find(&self, id: &EntityId) -> Option<&Person> {
        self.people.iter().find(|person| &person.id == id)
    }

    pub fn replace_people(&mut self, people: Vec<Person>) {
        self.people = people;
    }

    pub fn append(&mut self, person: Person) {
        self.people.push(person);
    }

    pub fn start_edit(&mut self, person: &Person) {
        self.form = PersonForm::from_person(person);
        self.editing = Some(person.id.clone());
    }

    /// Swaps in the server's copy of the record, a missing copy means the record is gone
    pub fn apply_update(&mut self, id: &EntityId, updated: Option<Person>) {
        match updated {
            Some(person) => {
                if let Some(existing) = self.people.iter_mut().find(|p| &p.id == id) {
                    *existing = person;
                }
            }
            None => self.remove(id),
        }
    }

    pub fn remove(&mut self, id: &EntityId) {
        self.people.retain(|person| &person.id != id);
    }

    pub fn clear_form(&mut self) {
        self.form = PersonForm::default();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, age: i32) -> Person {
        Person::new(name.to_string(), Number::from(age))
    }

    mod form {
        use super::*;

        #[test]
        fn empty_fields_raise_the_alert() {
            let form = PersonForm {
                name: "Ann".to_string(),
                age: String::new(),
            };

            assert_eq!(form.to_new_person(), Err(Alert::MissingNameOrAge));
            assert_eq!(
                PersonForm::default().to_new_person(),
                Err(Alert::MissingNameOrAge)
            );
        }

        #[test]
        fn age_must_parse() {
            let form = PersonForm {
                name: "Ann".to_string(),
                age: "thirty".to_string(),
            };

            assert_eq!(form.to_new_person(), Err(Alert::AgeNotNumeric));
        }

        #[test]
        fn complete_form_becomes_new_person() {
            let form = PersonForm {
                name: "Ann".to_string(),
                age: " 30 ".to_string(),
            };

            assert_eq!(form.to_new_person(), Ok(NewPerson::new("Ann", 30)));
        }

        #[test]
        fn update_skips_blank_and_unparsable_fields() {
            let form = PersonForm {
                name: String::new(),
                age: "abc".to_string(),
            };

            assert!(form.to_update().is_empty());

            let form = PersonForm {
                name: "Ann".to_string(),
                age: "31".to_string(),
            };

            assert_eq!(
                form.to_update(),
                UpdatePersonData {
                    name: Some("Ann".to_string()),
                    age: Some(Number::from(31)),
                }
            );
        }
    }

    mod people {
        use super::*;

        #[test]
        fn start_edit_copies_the_record_into_the_form() {
            let ann = person("Ann", 30);
            let mut state = PeopleState::default();
            state.append(ann.clone());

            state.start_edit(&ann);

            assert_eq!(
                state.form,
                PersonForm {
                    name: "Ann".to_string(),
                    age: "30".to_string(),
                }
            );
            assert_eq!(state.editing, Some(ann.id));
        }

        #[test]
        fn apply_update_replaces_in_place() {
            let ann = person("Ann", 30);
            let bob = person("Bob", 41);
            let mut state = PeopleState::default();
            state.replace_people(vec![ann.clone(), bob.clone()]);

            let older_ann = Person {
                age: Number::from(31),
                ..ann.clone()
            };
            state.apply_update(&ann.id, Some(older_ann.clone()));

            assert_eq!(state.people, vec![older_ann, bob]);
        }

        #[test]
        fn apply_update_without_record_drops_it() {
            let ann = person("Ann", 30);
            let mut state = PeopleState::default();
            state.append(ann.clone());

            state.apply_update(&ann.id, None);

            assert!(state.people.is_empty());
        }

        #[test]
        fn clear_form_forgets_the_edit() {
            let ann = person("Ann", 30);
            let mut state = PeopleState::default();
            state.start_edit(&ann);

            state.clear_form();

            assert_eq!(state.form, PersonForm::default());
            assert_eq!(state.editing, None);
        }
    }
}
