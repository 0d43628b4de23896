//! Login, admin-driven registration, and the current-user lookup.

use actix_web::{get, post, web, HttpResponse};
use subtrack_core::models::{LoginRequest, NewUser};

use super::run_blocking;
use crate::errors::ApiResult;
use crate::extractors::{AdminUser, AuthenticatedUser};
use crate::state::AppState;
use crate::validation::validate_new_user;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(login)
            .service(register)
            .service(me),
    );
}

/// Exchange email and password for a bearer token.
#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = body.into_inner();
    let response = run_blocking(move || {
        state
            .gate
            .login(&email, &password, state.users.storage(), state.users.credentials())
    })
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Create a user account. Admin only.
#[post("/register")]
async fn register(
    _admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> ApiResult<HttpResponse> {
    let new_user = body.into_inner();
    validate_new_user(&new_user)?;

    let user = run_blocking(move || state.users.register(new_user)).await?;
    Ok(HttpResponse::Created().json(user))
}

#[get("/me")]
async fn me(caller: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(caller.into_inner())
}
