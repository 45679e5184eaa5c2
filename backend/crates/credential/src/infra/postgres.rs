//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use platform::rate_limit::{RateLimitConfig, RateLimitResult, RateLimitStore};

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, account_role::AccountRole,
    email::Email,
};
use crate::error::{CredentialError, CredentialResult};

const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    email,
    password_hash,
    admin_password_hash,
    account_role,
    is_verified,
    verification_token,
    refresh_token,
    last_login_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        condition: &str,
        value: &str,
    ) -> CredentialResult<Option<Account>> {
        let query = format!(
            "SELECT {} FROM accounts WHERE {}",
            ACCOUNT_COLUMNS, condition
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_account()).transpose()
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> CredentialResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_hash,
                admin_password_hash,
                account_role,
                is_verified,
                verification_token,
                refresh_token,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.admin_password_hash.as_ref().map(|h| h.as_str()))
        .bind(account.role.id())
        .bind(account.is_verified)
        .bind(&account.verification_token)
        .bind(&account.refresh_token)
        .bind(account.last_login_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>> {
        let query = format!(
            "SELECT {} FROM accounts WHERE account_id = $1",
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(account_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>> {
        self.fetch_one_by("email = $1", email.as_str()).await
    }

    async fn find_by_verification_token(&self, token: &str) -> CredentialResult<Option<Account>> {
        self.fetch_one_by("verification_token = $1", token).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> CredentialResult<Option<Account>> {
        self.fetch_one_by("refresh_token = $1", token).await
    }

    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> CredentialResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                password_hash = $3,
                admin_password_hash = $4,
                account_role = $5,
                is_verified = $6,
                verification_token = $7,
                refresh_token = $8,
                last_login_at = $9,
                updated_at = $10
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.admin_password_hash.as_ref().map(|h| h.as_str()))
        .bind(account.role.id())
        .bind(account.is_verified)
        .bind(&account.verification_token)
        .bind(&account.refresh_token)
        .bind(account.last_login_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Rate Limit Store Implementation
// ============================================================================

/// PostgreSQL-backed fixed-window rate limit store
///
/// Counters survive restarts and are shared across processes; the
/// in-memory store from platform is the single-process fallback.
#[derive(Clone)]
pub struct PgRateLimitStore {
    pool: PgPool,
}

impl PgRateLimitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete windows that ended before `now_ms`
    pub async fn cleanup_expired(&self, now_ms: i64, window_ms: i64) -> CredentialResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_rate_limits WHERE window_start_ms < $1")
            .bind(now_ms - window_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

impl RateLimitStore for PgRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let window_ms = config.window_ms();
        let window_start = (now_ms / window_ms) * window_ms;

        let row = sqlx::query_as::<_, (i32,)>(
            r#"
            INSERT INTO auth_rate_limits (client_key, window_start_ms, request_count)
            VALUES ($1, $2, 1)
            ON CONFLICT (client_key, window_start_ms)
            DO UPDATE SET request_count = auth_rate_limits.request_count + 1
            RETURNING request_count
            "#,
        )
        .bind(key)
        .bind(window_start)
        .fetch_one(&self.pool)
        .await?;

        let count = row.0 as u32;
        let allowed = count <= config.max_requests;

        if !allowed {
            tracing::warn!(
                key = %key,
                count,
                max = config.max_requests,
                "Rate limit exceeded"
            );
        }

        Ok(RateLimitResult {
            allowed,
            remaining: config.max_requests.saturating_sub(count),
            reset_at_ms: window_start + window_ms,
        })
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_hash: String,
    admin_password_hash: Option<String>,
    account_role: i16,
    is_verified: bool,
    verification_token: Option<String>,
    refresh_token: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> CredentialResult<Account> {
        let password_hash = AccountPassword::from_db(self.password_hash)
            .map_err(|e| CredentialError::Internal(format!("Invalid password hash: {}", e)))?;

        let admin_password_hash = self
            .admin_password_hash
            .map(AccountPassword::from_db)
            .transpose()
            .map_err(|e| CredentialError::Internal(format!("Invalid admin hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password_hash,
            admin_password_hash,
            role: AccountRole::from_id(self.account_role),
            is_verified: self.is_verified,
            verification_token: self.verification_token,
            refresh_token: self.refresh_token,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
