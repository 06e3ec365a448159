//! Account lifecycle: registration, login and account administration
//!
//! Operations take the acting account (already resolved from its token) and
//! the target id; authorization is checked here rather than in handlers so
//! every entry point enforces the same rules.
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{AccessPolicy, CredentialHasher, TokenService};
use crate::error::ApiError;
use crate::repositories::{Account, AccountStore, NewAccount};
use course_enrollment_shared::{
    validation::{validate_email, validate_password, validate_username},
    AccessToken, ChangePasswordRequest, RegisterRequest, Role, UpdateProfileRequest,
};
use tracing::{info, warn};

pub struct AccountService;

impl AccountService {
    /// Create a new active account
    pub async fn register(
        store: &dyn AccountStore,
        hasher: &CredentialHasher,
        req: RegisterRequest,
    ) -> Result<Account, ApiError> {
        validate_username(&req.username).map_err(ApiError::Validation)?;
        validate_email(&req.email).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        if store.username_taken(&req.username, None).await? {
            return Err(ApiError::Conflict("Username already registered".to_string()));
        }
        if store.email_taken(&req.email, None).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hasher.hash_async(req.password).await?;

        // The unique indexes still arbitrate a concurrent registration
        let account = store
            .create(NewAccount {
                username: req.username,
                email: req.email,
                password_hash,
                role: req.role,
            })
            .await?;

        info!(account_id = account.id, role = %account.role, "Account registered");
        Ok(account)
    }

    /// Exchange credentials for an access token
    ///
    /// Unknown user, wrong password and disabled account fail identically.
    pub async fn login(
        store: &dyn AccountStore,
        hasher: &CredentialHasher,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, ApiError> {
        let Some(account) = store.find_by_username(username).await? else {
            hasher.verify_missing_async(password.to_string()).await?;
            warn!(username, "Login failed: unknown user");
            return Err(ApiError::InvalidCredentials);
        };

        let valid = hasher
            .verify_async(password.to_string(), account.password_hash.clone())
            .await?;
        if !valid {
            warn!(username, "Login failed: wrong password");
            return Err(ApiError::InvalidCredentials);
        }
        if !account.is_active {
            warn!(username, "Login failed: account disabled");
            return Err(ApiError::InvalidCredentials);
        }

        let access_token = tokens.issue(account.id, &account.username, account.role)?;
        info!(account_id = account.id, "Login succeeded");

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: tokens.default_ttl_secs(),
        })
    }

    /// Replace the target's password
    ///
    /// Non-admin actors must prove the current password.
    pub async fn change_password(
        store: &dyn AccountStore,
        hasher: &CredentialHasher,
        actor: &Account,
        target_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<Account, ApiError> {
        let target = match store.find_by_id(target_id).await? {
            Some(account) if account.is_active => account,
            _ => return Err(ApiError::NotFound("User not found".to_string())),
        };
        AccessPolicy::require_self_or_admin(actor, target.id)?;
        validate_password(&req.new_password).map_err(ApiError::Validation)?;

        if !actor.role.is_admin() {
            let old_password = req
                .old_password
                .ok_or_else(|| ApiError::BadRequest("Old password is required".to_string()))?;
            let valid = hasher
                .verify_async(old_password, target.password_hash.clone())
                .await?;
            if !valid {
                warn!(account_id = target.id, "Password change with wrong old password");
                return Err(ApiError::BadRequest("Incorrect old password".to_string()));
            }
        }

        let password_hash = hasher.hash_async(req.new_password).await?;
        let account = store.set_password_hash(target.id, &password_hash).await?;

        info!(account_id = account.id, actor_id = actor.id, "Password changed");
        Ok(account)
    }

    /// Apply a partial profile update; only provided fields change
    pub async fn update_profile(
        store: &dyn AccountStore,
        actor: &Account,
        target_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<Account, ApiError> {
        AccessPolicy::require_self_or_admin(actor, target_id)?;
        let target = Self::find(store, target_id).await?;

        // Unchanged values are not re-checked against other accounts
        let username = req.username.filter(|u| *u != target.username);
        let email = req.email.filter(|e| *e != target.email);

        if let Some(username) = username.as_deref() {
            validate_username(username).map_err(ApiError::Validation)?;
            if store.username_taken(username, Some(target.id)).await? {
                return Err(ApiError::Conflict("Username already registered".to_string()));
            }
        }
        if let Some(email) = email.as_deref() {
            validate_email(email).map_err(ApiError::Validation)?;
            if store.email_taken(email, Some(target.id)).await? {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }

        if username.is_none() && email.is_none() {
            return Ok(target);
        }

        let account = store
            .update_profile(target.id, username.as_deref(), email.as_deref())
            .await?;
        info!(account_id = account.id, actor_id = actor.id, "Profile updated");
        Ok(account)
    }

    /// Assign a role; callers must already be admin
    pub async fn set_role(
        store: &dyn AccountStore,
        target_id: i64,
        role: Role,
    ) -> Result<Account, ApiError> {
        let account = store.set_role(target_id, role).await?;
        info!(account_id = account.id, role = %role, "Role changed");
        Ok(account)
    }

    /// Soft-delete an account
    ///
    /// Tokens already issued stay cryptographically valid until they expire;
    /// they stop resolving because the account is now inactive.
    pub async fn disable(store: &dyn AccountStore, target_id: i64) -> Result<Account, ApiError> {
        let account = store.set_active(target_id, false).await?;
        info!(account_id = account.id, "Account disabled");
        Ok(account)
    }

    /// Re-activate a disabled account
    pub async fn enable(store: &dyn AccountStore, target_id: i64) -> Result<Account, ApiError> {
        let target = Self::find(store, target_id).await?;
        if target.is_active {
            return Err(ApiError::BadRequest("User is already active".to_string()));
        }

        let account = store.set_active(target.id, true).await?;
        info!(account_id = account.id, "Account enabled");
        Ok(account)
    }

    pub async fn list(store: &dyn AccountStore) -> Result<Vec<Account>, ApiError> {
        Ok(store.list().await?)
    }

    /// Fetch one account as the actor; self-or-admin
    pub async fn get(
        store: &dyn AccountStore,
        actor: &Account,
        target_id: i64,
    ) -> Result<Account, ApiError> {
        AccessPolicy::require_self_or_admin(actor, target_id)?;
        Self::find(store, target_id).await
    }

    async fn find(store: &dyn AccountStore, id: i64) -> Result<Account, ApiError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
