//! Request payload checks applied before a body reaches the services.

use subtrack_core::models::{NewSubscription, NewUser, SubscriptionPatch, UserPatch};
use subtrack_core::{SubtrackError, SubtrackResult};

pub const MIN_PASSWORD_LEN: usize = 6;

fn invalid(message: impl Into<String>) -> SubtrackError {
    SubtrackError::Validation(message.into())
}

fn require_non_empty(field: &str, value: &str) -> SubtrackResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> SubtrackResult<()> {
    require_non_empty(field, value)?;
    if !value.contains('@') {
        return Err(invalid(format!("{field} must be a valid email address")));
    }
    Ok(())
}

fn require_password(value: &str) -> SubtrackResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn require_price(price: f64) -> SubtrackResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(invalid("price must be a non-negative number"));
    }
    Ok(())
}

pub fn validate_new_user(user: &NewUser) -> SubtrackResult<()> {
    require_non_empty("name", &user.name)?;
    require_email("email", &user.email)?;
    require_password(&user.password)
}

pub fn validate_user_patch(patch: &UserPatch) -> SubtrackResult<()> {
    if let Some(name) = &patch.name {
        require_non_empty("name", name)?;
    }
    if let Some(email) = &patch.email {
        require_email("email", email)?;
    }
    if let Some(password) = &patch.password {
        require_password(password)?;
    }
    Ok(())
}

pub fn validate_new_subscription(sub: &NewSubscription) -> SubtrackResult<()> {
    require_non_empty("client_name", &sub.client_name)?;
    require_non_empty("business_name", &sub.business_name)?;
    if let Some(email) = sub.client_email.as_deref().filter(|e| !e.is_empty()) {
        require_email("client_email", email)?;
    }
    require_price(sub.price)
}

pub fn validate_subscription_patch(patch: &SubscriptionPatch) -> SubtrackResult<()> {
    if let Some(name) = &patch.client_name {
        require_non_empty("client_name", name)?;
    }
    if let Some(name) = &patch.business_name {
        require_non_empty("business_name", name)?;
    }
    if let Some(email) = patch.client_email.as_deref().filter(|e| !e.is_empty()) {
        require_email("client_email", email)?;
    }
    if let Some(price) = patch.price {
        require_price(price)?;
    }
    Ok(())
}
