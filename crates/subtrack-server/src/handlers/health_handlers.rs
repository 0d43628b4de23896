//! Unauthenticated liveness endpoints.

use actix_web::{get, web, HttpResponse};
use serde_json::json;

pub const APP_NAME: &str = "Subscription Manager API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root).service(health);
}

#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": format!("Welcome to {APP_NAME}"),
        "version": APP_VERSION,
        "status": "running",
    }))
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": APP_VERSION,
    }))
}
