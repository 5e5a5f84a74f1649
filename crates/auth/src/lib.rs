//! Registration, authentication, and sessions.
//!
//! Two-step signup for civilian and authority accounts, Argon2 password
//! hashing, and JWT access/refresh tokens carried in HTTP cookies.
//!
//! ## Accounts
//!
//! - [`Account`] — Registered user at some registration [`Step`]
//! - [`Role`] — Civilian or authority; selects the step-2 schema
//! - [`Profile`] — Role-specific fields captured at step 2
//! - [`Proof`] — Identity document reference
//! - [`Registration`] — The step-1 / step-2 state machine
//!
//! ## Storage
//!
//! - [`Credentials`] — Account and refresh-blacklist store
//! - [`Memory`] — In-process store
//!
//! ## Sessions
//!
//! - [`Crypto`] — JWT issuing, verification, refresh, and revocation
//! - [`Claims`] — JWT payload structure
//! - [`Cookies`] — Session cookie adapter
//! - [`password`] — Argon2 hashing and verification
mod account;
mod claims;
mod credentials;
mod crypto;
mod dto;
mod memory;
pub mod password;
mod profile;
mod proof;
mod registration;
mod role;
mod step;

pub use account::*;
pub use claims::*;
pub use credentials::*;
pub use crypto::*;
pub use dto::*;
pub use memory::*;
pub use profile::*;
pub use proof::*;
pub use registration::*;
pub use role::*;
pub use step::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod cookies;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use cookies::*;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
