use clap::Parser;
use std::time::Duration;
use vox_auth::CookieConfig;
use vox_auth::Crypto;

/// Longest accepted token lifetime: one year.
const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Process configuration. Every flag can also be supplied through the
/// environment variable named next to it.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Civic feedback backend", long_about = None)]
pub struct Config {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8888")]
    pub bind: String,
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub db_url: String,
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
    /// Mark session cookies `Secure` (HTTPS only).
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: bool,
    #[arg(long, env = "ACCESS_TTL_SECS", default_value_t = vox_core::ACCESS_TOKEN_TTL.as_secs())]
    pub access_ttl_secs: u64,
    #[arg(long, env = "REFRESH_TTL_SECS", default_value_t = vox_core::REFRESH_TOKEN_TTL.as_secs())]
    pub refresh_ttl_secs: u64,
    #[arg(long, env = "WORKERS", default_value_t = 6)]
    pub workers: usize,
    /// Origin allowed to make credentialed cross-origin requests.
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.jwt_secret.trim().is_empty(), "JWT_SECRET must not be empty");
        anyhow::ensure!(self.access_ttl_secs > 0, "ACCESS_TTL_SECS must be positive");
        anyhow::ensure!(
            self.refresh_ttl_secs >= self.access_ttl_secs,
            "REFRESH_TTL_SECS must not be shorter than ACCESS_TTL_SECS"
        );
        anyhow::ensure!(
            self.refresh_ttl_secs <= MAX_TTL_SECS,
            "REFRESH_TTL_SECS must not exceed {} seconds",
            MAX_TTL_SECS
        );
        anyhow::ensure!(self.workers > 0, "WORKERS must be positive");
        Ok(())
    }
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_ttl_secs)
    }
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_secs)
    }
    pub fn crypto(&self) -> Crypto {
        Crypto::new(self.jwt_secret.as_bytes()).with_lifetimes(self.access_ttl(), self.refresh_ttl())
    }
    pub fn cookies(&self) -> CookieConfig {
        CookieConfig {
            secure: self.secure_cookies,
            access_ttl: self.access_ttl(),
            refresh_ttl: self.refresh_ttl(),
            ..CookieConfig::default()
        }
    }
}
