use crate::cache::KeyError;
use rocket::http::{ContentType, Status};
use std::io::Cursor;
use thiserror::Error;

pub const USAGE_HINT: &str = "No status code given! Try /200 or /404";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No status code given! Try /200 or /404")]
    MissingKey,

    #[error("{0}")]
    InvalidKey(KeyError),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Image larger than {0} bytes")]
    PayloadTooLarge(u64),

    #[error("Internal server error")]
    Io(#[from] std::io::Error),
}

impl From<KeyError> for ApiError {
    fn from(error: KeyError) -> Self {
        match error {
            KeyError::Empty => ApiError::MissingKey,
            invalid => ApiError::InvalidKey(invalid),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MissingKey | ApiError::InvalidKey(_) => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::MethodNotAllowed => Status::MethodNotAllowed,
            ApiError::PayloadTooLarge(_) => Status::PayloadTooLarge,
            ApiError::Io(_) => Status::InternalServerError,
        }
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        if let ApiError::Io(ref error) = self {
            log::error!("Server error: {}", error);
        }

        rocket::Response::build()
            .status(self.status())
            .header(ContentType::Plain)
            .sized_body(None, Cursor::new(self.to_string()))
            .ok()
    }
}
