//! Identity extractors.
//!
//! [`AuthMiddleware`](crate::middleware::AuthMiddleware) leaves an
//! [`AuthenticatedUser`] in the request extensions when a bearer token
//! resolves. Handlers take `AuthenticatedUser` to require any signed-in
//! caller, or [`AdminUser`] to additionally require the admin role.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use subtrack_core::auth::AccessPolicy;
use subtrack_core::models::User;
use subtrack_core::SubtrackError;

use crate::errors::ApiError;

#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl AuthenticatedUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl AdminUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

fn admit(req: &HttpRequest, policy: AccessPolicy) -> Result<User, ApiError> {
    let resolved = req
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|caller| caller.0.clone())
        .ok_or(SubtrackError::Unauthenticated);
    Ok(policy.decide(resolved).into_result()?)
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(admit(req, AccessPolicy::Authenticated).map(AuthenticatedUser))
    }
}

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(admit(req, AccessPolicy::AdminOnly).map(AdminUser))
    }
}
