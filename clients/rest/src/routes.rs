use actix_web::{delete, get, post, put, web, HttpResponse};
use database::{
    consts::consts::EntityId,
    database::request_manager::RequestManager,
    model::person::{NewPerson, UpdatePersonData},
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub const DELETED_MESSAGE: &str = "Person Deleted";

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DeleteResponse {
    pub message: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_people)
        .service(create_person)
        .service(update_person)
        .service(delete_person);
}

/// Every person in the store
#[get("/")]
async fn list_people(
    request_manager: web::Data<RequestManager>,
) -> Result<HttpResponse, ServiceError> {
    let request_manager = request_manager.get_ref().clone();

    let people = web::block(move || request_manager.send_list()).await??;

    Ok(HttpResponse::Ok().json(people))
}

/// Creates a person and returns it with its new id
#[post("/")]
async fn create_person(
    request_manager: web::Data<RequestManager>,
    new_person: web::Json<NewPerson>,
) -> Result<HttpResponse, ServiceError> {
    let request_manager = request_manager.get_ref().clone();
    let new_person = new_person.into_inner();

    let person = web::block(move || request_manager.send_add(new_person)).await??;

    Ok(HttpResponse::Ok().json(person))
}

/// Applies the submitted fields, responds with `null` when there is no such person
#[put("/{id}")]
async fn update_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
    person_update: web::Json<UpdatePersonData>,
) -> Result<HttpResponse, ServiceError> {
    let request_manager = request_manager.get_ref().clone();
    let id = EntityId(id.into_inner());
    let person_update = person_update.into_inner();

    let updated = web::block(move || request_manager.send_update(id, person_update)).await??;

    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/{id}")]
async fn delete_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let request_manager = request_manager.get_ref().clone();
    let id = EntityId(id.into_inner());

    // Deleting an id that does not exist is acknowledged all the same
    let removed = web::block(move || request_manager.send_remove(id)).await??;

    if let Some(person) = removed {
        log::debug!("Deleted person: {}", person.id);
    }

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
