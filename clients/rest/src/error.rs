use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use database::database::request_manager::RequestManagerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] RequestManagerError),

    #[error("Blocking thread pool is gone")]
    Blocking(#[from] BlockingError),
}

// There is no error taxonomy for clients, every failure is a 500 carrying the message
impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Request failed: {}", self);

        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
