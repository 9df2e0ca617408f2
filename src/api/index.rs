use actix_web::{HttpResponse, Responder, get};

use crate::model::response::MessageResponse;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service greeting", body = MessageResponse)
    ),
    tag = "Service"
)]
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::new(
        "Welcome to the Hospital Management System API",
    ))
}
