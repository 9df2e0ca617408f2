use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;

use crate::model::response::{ErrorResponse, MessageResponse};

/// Failure kinds a handler can answer with.
///
/// Database errors are logged where they happen and collapse into
/// `Internal`, so the caller only ever sees the generic body.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    NotFound(&'static str),

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "Internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::NotFound(_) | ApiError::BadRequest(_) => {
                builder.json(MessageResponse::new(self.to_string()))
            }
            ApiError::Internal => builder.json(ErrorResponse {
                error: self.to_string(),
            }),
        }
    }
}
