//! In-Memory Repository
//!
//! Used by tests and by local development without a database.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{CredentialError, CredentialResult};

/// Mutex-guarded account map
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
    fail_updates: AtomicBool,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `update` calls fail (simulated store outage)
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Account>> {
        match self.accounts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn find_where<F>(&self, predicate: F) -> Option<Account>
    where
        F: Fn(&Account) -> bool,
    {
        self.lock().values().find(|a| predicate(a)).cloned()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> CredentialResult<()> {
        let mut accounts = self.lock();

        if accounts
            .values()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(CredentialError::DuplicateEmail);
        }

        accounts.insert(*account.account_id.as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>> {
        Ok(self.lock().get(account_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>> {
        Ok(self.find_where(|a| a.email.as_str() == email.as_str()))
    }

    async fn find_by_verification_token(&self, token: &str) -> CredentialResult<Option<Account>> {
        Ok(self.find_where(|a| a.verification_token.as_deref() == Some(token)))
    }

    async fn find_by_refresh_token(&self, token: &str) -> CredentialResult<Option<Account>> {
        Ok(self.find_where(|a| a.refresh_token.as_deref() == Some(token)))
    }

    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool> {
        Ok(self
            .lock()
            .values()
            .any(|a| a.email.as_str() == email.as_str()))
    }

    async fn update(&self, account: &Account) -> CredentialResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(CredentialError::Internal(
                "Simulated store failure".to_string(),
            ));
        }

        let mut accounts = self.lock();
        match accounts.get_mut(account.account_id.as_uuid()) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(CredentialError::Internal(
                "Account not found for update".to_string(),
            )),
        }
    }
}
