//! Request extractors resolving a bearer token to a live account
//!
//! Every request re-validates the token and re-fetches the account; nothing
//! is cached. A bad header, a bad token, an unknown username, a username now
//! held by a different account and a disabled account all produce the same
//! `401`.

use crate::auth::AccessPolicy;
use crate::error::ApiError;
use crate::repositories::Account;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

/// The authenticated, active account making the request
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// An authenticated account holding the admin role
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Account);

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

impl CurrentAccount {
    /// Resolve a token to an active account
    pub async fn resolve(state: &AppState, token: &str) -> Result<Account, ApiError> {
        let identity = state.tokens().validate(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            ApiError::credentials_rejected()
        })?;

        match state.accounts().find_by_username(&identity.username).await? {
            Some(account) if account.id != identity.account_id => {
                debug!(
                    username = %identity.username,
                    token_account_id = identity.account_id,
                    account_id = account.id,
                    "Token issued to a different account"
                );
                Err(ApiError::credentials_rejected())
            }
            Some(account) if account.is_active => Ok(account),
            Some(_) => {
                debug!(username = %identity.username, "Token for disabled account");
                Err(ApiError::credentials_rejected())
            }
            None => {
                debug!(username = %identity.username, "Token for unknown account");
                Err(ApiError::credentials_rejected())
            }
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::credentials_rejected)?;
        let account = Self::resolve(&app_state, token).await?;
        Ok(CurrentAccount(account))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminAccount
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentAccount(account) = CurrentAccount::from_request_parts(parts, state).await?;
        AccessPolicy::require_admin(&account)?;
        Ok(AdminAccount(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
