use database::consts::consts::EntityId;

use crate::{
    api::PeopleApi,
    state::{Alert, PeopleState},
};

/// Owns the view state and turns user actions into API calls.
///
/// A failed request is logged and leaves the state exactly as it was.
pub struct App<A> {
    api: A,
    state: PeopleState,
}

impl<A: PeopleApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: PeopleState::default(),
        }
    }

    pub fn state(&self) -> &PeopleState {
        &self.state
    }

    pub fn set_name(&mut self, name: &str) {
        self.state.form.name = name.to_string();
    }

    pub fn set_age(&mut self, age: &str) {
        self.state.form.age = age.to_string();
    }

    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(people) => self.state.replace_people(people),
            Err(err) => log::error!("Fetch failed: {}", err),
        }
    }

    pub async fn add(&mut self) -> Result<(), Alert> {
        let new_person = self.state.form.to_new_person()?;

        match self.api.create(&new_person).await {
            Ok(person) => {
                self.state.append(person);
                self.state.clear_form();
            }
            Err(err) => log::error!("Add failed: {}", err),
        }

        Ok(())
    }

    /// Copies the person into the form, nothing is sent until the edit is saved
    pub fn start_edit(&mut self, id: &EntityId) -> bool {
        let person = match self.state.find(id) {
            Some(person) => person.clone(),
            None => return false,
        };

        self.state.start_edit(&person);

        true
    }

    pub fn cancel_edit(&mut self) {
        self.state.clear_form();
    }

    pub async fn save_edit(&mut self) {
        let id = match &self.state.editing {
            Some(id) => id.clone(),
            None => {
                log::warn!("Nothing is being edited");
                return;
            }
        };

        match self.api.update(&id, &self.state.form.to_update()).await {
            Ok(updated) => {
                if updated.is_none() {
                    log::warn!("Person {} no longer exists", id);
                }

                self.state.apply_update(&id, updated);
                self.state.clear_form();
            }
            Err(err) => log::error!("Update failed: {}", err),
        }
    }

    /// The form's single button, saves the edit when there is one and adds otherwise
    pub async fn submit(&mut self) -> Result<(), Alert> {
        if self.state.editing.is_some() {
            self.save_edit().await;
            return Ok(());
        }

        self.add().await
    }

    pub async fn delete(&mut self, id: &EntityId) {
        match self.api.delete(id).await {
            Ok(_) => self.state.remove(id),
            Err(err) => log::error!("Delete failed: {}", err),
        }
    }
}
