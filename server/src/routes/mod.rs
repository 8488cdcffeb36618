use actix_web::{web, HttpResponse};

use db::models::QUESTION_NOT_FOUND;
use errors::{Error, ErrorResponse};

pub mod questions;

pub fn routes(cfg: &mut web::ServiceConfig) {
    // ids that don't parse can't name a question
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|_, _| Error::NotFound(QUESTION_NOT_FOUND.into()).into()),
    );

    cfg.service(
        web::scope("/api").service(
            web::scope("/polls")
                .route("", web::get().to(questions::index))
                .route("/{id}", web::get().to(questions::detail)),
        ),
    );
}

/// Default service for any route `routes` doesn't match.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::from("Not Found"))
}
