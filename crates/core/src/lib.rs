//! Core identifiers, error taxonomy, and constants for vox.
//!
//! This crate provides the foundational types and configuration parameters
//! shared by the authentication, feedback, and server crates.
mod error;
mod id;

pub use error::*;
pub use id::*;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// SESSION PARAMETERS
// ============================================================================
/// Lifetime of an access token (and of the cookie carrying it).
pub const ACCESS_TOKEN_TTL: std::time::Duration = std::time::Duration::from_secs(15 * 60);
/// Lifetime of a refresh token (and of the cookie carrying it).
pub const REFRESH_TOKEN_TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
/// Cookie holding the access token.
#[rustfmt::skip]
pub const ACCESS_COOKIE:  &str = "access_token";
/// Cookie holding the refresh token.
#[rustfmt::skip]
pub const REFRESH_COOKIE: &str = "refresh_token";
/// Cookie holding the client-side profile snapshot.
#[rustfmt::skip]
pub const PROFILE_COOKIE: &str = "user_data";
/// The only path the refresh cookie is sent to.
#[rustfmt::skip]
pub const REFRESH_PATH:   &str = "/auth/token/refresh";
/// Where a step-1 account continues its registration.
#[rustfmt::skip]
pub const STEP2_PATH:     &str = "/auth/register/step2";

// ============================================================================
// VALIDATION PARAMETERS
// ============================================================================
/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Maximum length of short free-text fields (names, titles, positions).
pub const MAX_FIELD_LEN: usize = 255;
/// Upper bound on the family member count of a civilian profile.
pub const MAX_FAMILY_MEMBERS: u32 = 64;
/// Maximum number of derived keywords kept per feedback item.
pub const MAX_KEYWORDS: usize = 12;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

/// Seconds since the unix epoch.
pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
