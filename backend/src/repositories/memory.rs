//! In-process account store
//!
//! Same contract as [`PgAccountStore`](super::account::PgAccountStore),
//! including uniqueness enforcement, held in a single `RwLock`ed map. Every
//! write takes the write lock for its whole check-then-modify step, which
//! gives the per-row atomicity the database would.

use super::account::{
    Account, AccountStore, AccountStoreError, NewAccount, StoreResult, UniqueField,
};
use async_trait::async_trait;
use chrono::Utc;
use course_enrollment_shared::Role;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl Inner {
    fn conflict(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Option<UniqueField> {
        self.accounts
            .values()
            .filter(|a| Some(a.id) != exclude_id)
            .find_map(|a| {
                if username == Some(a.username.as_str()) {
                    Some(UniqueField::Username)
                } else if email == Some(a.email.as_str()) {
                    Some(UniqueField::Email)
                } else {
                    None
                }
            })
    }

    fn modify(&mut self, id: i64, f: impl FnOnce(&mut Account)) -> StoreResult<Account> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::NotFound)?;
        f(account);
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

/// Account store kept in memory; contents are lost on drop
#[derive(Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<Inner>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: NewAccount) -> StoreResult<Account> {
        let mut inner = self.inner.write().await;
        if let Some(field) = inner.conflict(
            Some(account.username.as_str()),
            Some(account.email.as_str()),
            None,
        ) {
            return Err(AccountStoreError::Duplicate(field));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let record = Account {
            id: inner.next_id,
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            role: account.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.accounts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Account>> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let inner = self.inner.read().await;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.conflict(Some(username), None, exclude_id).is_some())
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.conflict(None, Some(email), exclude_id).is_some())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> StoreResult<Account> {
        let mut inner = self.inner.write().await;
        if let Some(field) = inner.conflict(username, email, Some(id)) {
            return Err(AccountStoreError::Duplicate(field));
        }
        inner.modify(id, |a| {
            if let Some(username) = username {
                a.username = username.to_string();
            }
            if let Some(email) = email {
                a.email = email.to_string();
            }
        })
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> StoreResult<Account> {
        self.inner
            .write()
            .await
            .modify(id, |a| a.password_hash = password_hash.to_string())
    }

    async fn set_role(&self, id: i64, role: Role) -> StoreResult<Account> {
        self.inner.write().await.modify(id, |a| a.role = role)
    }

    async fn set_active(&self, id: i64, is_active: bool) -> StoreResult<Account> {
        self.inner.write().await.modify(id, |a| a.is_active = is_active)
    }
}
