//! Staff account management. Every route requires an admin caller.

use actix_web::{delete, get, put, web, HttpResponse};
use subtrack_core::models::UserPatch;

use super::run_blocking;
use crate::errors::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;
use crate::validation::validate_user_patch;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/staff")
            .service(list_staff)
            .service(get_staff)
            .service(update_staff)
            .service(delete_staff),
    );
}

#[get("")]
async fn list_staff(_admin: AdminUser, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let staff = run_blocking(move || state.users.list_staff()).await?;
    Ok(HttpResponse::Ok().json(staff))
}

#[get("/{id}")]
async fn get_staff(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let user = run_blocking(move || state.users.get(&id)).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/{id}")]
async fn update_staff(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UserPatch>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();
    validate_user_patch(&patch)?;

    let user = run_blocking(move || state.users.update(&id, patch)).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{id}")]
async fn delete_staff(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    run_blocking(move || state.users.delete(&id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
