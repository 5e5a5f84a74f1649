//! PostgreSQL connectivity and schema bootstrap.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a URL
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`migrate()`] — Idempotent `CREATE ... IF NOT EXISTS` bootstrap
//!
//! ## Table Names
//!
//! Constants for all persistent entities: accounts, revoked refresh
//! tokens, and feedback.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks and
/// actix workers. The connection driver is spawned onto the current runtime.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:       &str = "users";
/// Table for blacklisted refresh tokens.
#[rustfmt::skip]
pub const REVOCATIONS: &str = "revocations";
/// Table for submitted feedback.
#[rustfmt::skip]
pub const FEEDBACK:    &str = "feedback";
