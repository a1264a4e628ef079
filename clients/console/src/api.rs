use async_trait::async_trait;
use database::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person, UpdatePersonData},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Server unavailable: {0}")]
    Unavailable(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeleteAcknowledgement {
    pub message: String,
}

/// The four calls the people API offers
#[async_trait]
pub trait PeopleApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Person>>;
    async fn create(&self, new_person: &NewPerson) -> ClientResult<Person>;
    /// `None` when the server has no person with the id
    async fn update(
        &self,
        id: &EntityId,
        person_update: &UpdatePersonData,
    ) -> ClientResult<Option<Person>>;
    async fn delete(&self, id: &EntityId) -> ClientResult<DeleteAcknowledgement>;
}

pub struct HttpPeopleApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPeopleApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn person_url(&self, id: &EntityId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl PeopleApi for HttpPeopleApi {
    async fn list(&self) -> ClientResult<Vec<Person>> {
        let people = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(people)
    }

    async fn create(&self, new_person: &NewPerson) -> ClientResult<Person> {
        let person = self
            .client
            .post(&self.base_url)
            .json(new_person)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(person)
    }

    async fn update(
        &self,
        id: &EntityId,
        person_update: &UpdatePersonData,
    ) -> ClientResult<Option<Person>> {
        let person = self
            .client
            .put(self.person_url(id))
            .json(person_update)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(person)
    }

    async fn delete(&self, id: &EntityId) -> ClientResult<DeleteAcknowledgement> {
        let acknowledgement = self
            .client
            .delete(self.person_url(id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(acknowledgement)
    }
}
