use actix_web::{get, web, HttpResponse};

use super::run_blocking;
use crate::errors::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").service(stats));
}

/// Renewal counts relative to today. Admin only.
#[get("/stats")]
async fn stats(_admin: AdminUser, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let stats = run_blocking(move || state.subscriptions.dashboard_stats()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
