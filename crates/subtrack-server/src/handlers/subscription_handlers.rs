//! Subscription CRUD. Reads need any signed-in caller; writes need an admin.

use actix_web::{delete, get, post, put, web, HttpResponse};
use subtrack_core::models::{NewSubscription, SubscriptionPatch};

use super::run_blocking;
use crate::errors::ApiResult;
use crate::extractors::{AdminUser, AuthenticatedUser};
use crate::state::AppState;
use crate::validation::{validate_new_subscription, validate_subscription_patch};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscriptions")
            .service(list_subscriptions)
            .service(get_subscription)
            .service(create_subscription)
            .service(update_subscription)
            .service(delete_subscription),
    );
}

#[get("")]
async fn list_subscriptions(
    _caller: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let subs = run_blocking(move || state.subscriptions.list()).await?;
    Ok(HttpResponse::Ok().json(subs))
}

#[get("/{id}")]
async fn get_subscription(
    _caller: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let sub = run_blocking(move || state.subscriptions.get(&id)).await?;
    Ok(HttpResponse::Ok().json(sub))
}

#[post("")]
async fn create_subscription(
    admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Json<NewSubscription>,
) -> ApiResult<HttpResponse> {
    let new_sub = body.into_inner();
    validate_new_subscription(&new_sub)?;

    let created_by = admin.into_inner().id;
    let sub = run_blocking(move || state.subscriptions.create(new_sub, &created_by)).await?;
    Ok(HttpResponse::Created().json(sub))
}

#[put("/{id}")]
async fn update_subscription(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SubscriptionPatch>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();
    validate_subscription_patch(&patch)?;

    let sub = run_blocking(move || state.subscriptions.update(&id, patch)).await?;
    Ok(HttpResponse::Ok().json(sub))
}

#[delete("/{id}")]
async fn delete_subscription(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    run_blocking(move || state.subscriptions.delete(&id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
