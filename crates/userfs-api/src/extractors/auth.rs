//! `AccountUser` extractor: reads the caller identity set by the gateway and
//! requires an activated account.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use userfs_core::error::AppError;
use userfs_core::types::UserKey;
use userfs_service::context::RequestContext;

use crate::error::ApiError;

/// Header carrying the caller's user key.
pub const USER_KEY_HEADER: &str = "x-user-key";

/// Header carrying the caller's account activation status.
pub const ACCOUNT_STATUS_HEADER: &str = "x-account-status";

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AccountUser(pub RequestContext);

impl AccountUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AccountUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AccountUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = header(parts, USER_KEY_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::authentication("Missing user key"))?;

        let user =
            UserKey::new(key).map_err(|_| AppError::authentication("Invalid user key"))?;

        let status = header(parts, ACCOUNT_STATUS_HEADER).unwrap_or_default();
        let ctx = RequestContext::new(user, status);

        if !ctx.is_activated() {
            return Err(AppError::authorization("Account activation is not completed").into());
        }

        Ok(AccountUser(ctx))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}
