use super::*;
use vox_core::Error;
use vox_core::ID;

/// Credential store: persisted accounts keyed by email, plus the
/// refresh-token blacklist.
///
/// Implemented for the Postgres client and for the in-process [`Memory`]
/// store, and shared behind `Arc<dyn Credentials>`.
#[async_trait::async_trait]
pub trait Credentials: Send + Sync {
    /// Whether an account with this (normalized) email exists.
    async fn exists(&self, email: &str) -> Result<bool, Error>;
    /// Persists a new step-1 account. Duplicate emails are a validation error.
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), Error>;
    /// Account and password hash by email.
    async fn lookup(&self, email: &str) -> Result<Option<(Account, String)>, Error>;
    /// Account by id.
    async fn load(&self, id: ID<Account>) -> Result<Option<Account>, Error>;
    /// Persists a completed account, but only if the stored row is still at
    /// step 1. Returns false when another request completed it first.
    async fn activate(&self, account: &Account) -> Result<bool, Error>;
    /// Blacklists a refresh token id until `expires` (unix seconds).
    async fn revoke(&self, jti: uuid::Uuid, expires: i64) -> Result<(), Error>;
    /// Whether a refresh token id is blacklisted.
    async fn revoked(&self, jti: uuid::Uuid) -> Result<bool, Error>;
    /// Drops blacklist entries whose tokens have expired anyway.
    async fn purge(&self) -> Result<usize, Error>;
}
