//! Bearer-token identity middleware.
//!
//! Resolves `Authorization: Bearer <jwt>` through the [`AuthGate`] on the
//! blocking pool and turns the outcome into an [`AccessDecision`]. An allowed
//! caller is stored as [`AuthenticatedUser`]; an unauthenticated one is passed
//! through without identity so open routes still work and guarded handlers
//! reject it via their extractor. Storage failures during resolution abort the
//! request.
//!
//! [`AuthGate`]: subtrack_core::AuthGate

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use subtrack_core::auth::{AccessDecision, AccessPolicy};
use subtrack_core::SubtrackError;
use tracing::debug;

use crate::errors::ApiError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let header = req.headers().get(AUTHORIZATION).map(|value| {
                value
                    .to_str()
                    .ok()
                    .and_then(bearer_token)
                    .map(str::to_string)
            });
            let Some(token) = header else {
                return service.call(req).await;
            };

            let resolved = match token {
                Some(token) => {
                    let state = req
                        .app_data::<web::Data<AppState>>()
                        .cloned()
                        .ok_or_else(|| {
                            ApiError(SubtrackError::Internal("AppState not registered".into()))
                        })?;
                    web::block(move || state.resolve_token(&token))
                        .await
                        .map_err(ApiError::from)?
                }
                None => Err(SubtrackError::Unauthenticated),
            };

            match AccessPolicy::Authenticated.decide(resolved) {
                AccessDecision::Allow(user) => {
                    req.extensions_mut().insert(AuthenticatedUser(user));
                }
                AccessDecision::Deny(SubtrackError::Unauthenticated) => {
                    debug!(path = %req.path(), "request carries an unusable bearer token");
                }
                AccessDecision::Deny(err) => return Err(ApiError(err).into()),
            }

            service.call(req).await
        })
    }
}

/// Token from an `Authorization` value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
