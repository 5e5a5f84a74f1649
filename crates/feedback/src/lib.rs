//! Citizen feedback: submission, search, and owner-scoped moderation.
//!
//! - [`Feedback`] — A stored submission and its public [`FeedbackView`]
//! - [`Draft`] / [`Patch`] — Create and update payloads
//! - [`Filter`] — Listing filters, search, and [`Ordering`]
//! - [`Ledger`] — Feedback store with ownership checks
mod draft;
mod feedback;
mod filter;
mod keywords;
mod kinds;
mod ledger;

pub use draft::*;
pub use feedback::*;
pub use filter::*;
pub use keywords::*;
pub use kinds::*;
pub use ledger::*;

#[cfg(feature = "database")]
mod repository;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
