//! HTTP handlers, one module per route group. Each exposes a `configure`
//! function registering its scope.

pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod health_handlers;
pub mod staff_handlers;
pub mod subscription_handlers;

use actix_web::web;
use subtrack_core::SubtrackResult;

use crate::errors::ApiResult;

/// Run storage and bcrypt work on actix's blocking pool.
pub(crate) async fn run_blocking<F, T>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> SubtrackResult<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(f).await??)
}
