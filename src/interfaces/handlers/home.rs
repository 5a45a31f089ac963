use actix_web::{get, HttpResponse, Responder};
use std::env;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Seeker Profile API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": "/api/v1/seekers"
    }))
}
