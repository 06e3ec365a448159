//! Role-based access checks
//!
//! Every check yields `Forbidden`, never `Unauthorized`: by the time a policy
//! runs the caller has already been authenticated.

use crate::error::ApiError;
use crate::repositories::Account;
use course_enrollment_shared::Role;

const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

pub struct AccessPolicy;

impl AccessPolicy {
    /// Require the account's role to be one of `allowed`
    pub fn require_role<'a>(
        account: &'a Account,
        allowed: &[Role],
    ) -> Result<&'a Account, ApiError> {
        if allowed.contains(&account.role) {
            Ok(account)
        } else {
            Err(ApiError::Forbidden(INSUFFICIENT_PERMISSIONS.to_string()))
        }
    }

    #[inline]
    pub fn require_admin(account: &Account) -> Result<&Account, ApiError> {
        Self::require_role(account, &[Role::Admin])
    }

    /// The actor is the target account, or holds admin
    pub fn is_self_or_admin(actor: &Account, target_id: i64) -> bool {
        actor.id == target_id || actor.role.is_admin()
    }

    pub fn require_self_or_admin(actor: &Account, target_id: i64) -> Result<(), ApiError> {
        if Self::is_self_or_admin(actor, target_id) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(INSUFFICIENT_PERMISSIONS.to_string()))
        }
    }
}
