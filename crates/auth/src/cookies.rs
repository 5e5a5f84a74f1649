use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponseBuilder;
use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;
use actix_web::cookie::time::Duration;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Names and attributes of the session cookies.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub access: String,
    pub refresh: String,
    pub profile: String,
    pub refresh_path: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub access_ttl: std::time::Duration,
    pub refresh_ttl: std::time::Duration,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access: vox_core::ACCESS_COOKIE.to_string(),
            refresh: vox_core::REFRESH_COOKIE.to_string(),
            profile: vox_core::PROFILE_COOKIE.to_string(),
            refresh_path: vox_core::REFRESH_PATH.to_string(),
            secure: false,
            same_site: SameSite::Lax,
            access_ttl: vox_core::ACCESS_TOKEN_TTL,
            refresh_ttl: vox_core::REFRESH_TOKEN_TTL,
        }
    }
}

/// Which session cookie to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jar {
    Access,
    Refresh,
    Profile,
}

/// Session cookie adapter: turns tokens into response cookies and back.
///
/// The access cookie is sent everywhere (`Path=/`); the refresh cookie is
/// scoped to the refresh endpoint only. Both are HttpOnly.
///
/// The profile snapshot cookie is a client-readable cache of the account
/// summary. It is written whenever the profile changes (login, step-2
/// completion), removed on logout, and never read back by the server.
#[derive(Debug, Clone, Default)]
pub struct Cookies {
    config: CookieConfig,
}

impl Cookies {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &CookieConfig {
        &self.config
    }
    fn cookie(&self, name: &str, value: String, path: &str, ttl: std::time::Duration) -> Cookie<'static> {
        Cookie::build(name.to_string(), value)
            .path(path.to_string())
            .http_only(true)
            .secure(self.config.secure)
            .same_site(self.config.same_site)
            .max_age(Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)))
            .finish()
    }
    pub fn access_cookie(&self, token: &str) -> Cookie<'static> {
        self.cookie(&self.config.access, token.to_string(), "/", self.config.access_ttl)
    }
    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        self.cookie(
            &self.config.refresh,
            token.to_string(),
            &self.config.refresh_path,
            self.config.refresh_ttl,
        )
    }
    /// Base64url JSON of the account summary, readable by scripts.
    pub fn profile_cookie(&self, account: &Account) -> Cookie<'static> {
        let json = serde_json::to_vec(&UserInfo::from(account)).unwrap_or_default();
        let mut cookie = self.cookie(
            &self.config.profile,
            URL_SAFE_NO_PAD.encode(json),
            "/",
            self.config.refresh_ttl,
        );
        cookie.set_http_only(false);
        cookie
    }
    /// Sets the access cookie and, when given, the refresh cookie.
    pub fn write(&self, response: &mut HttpResponseBuilder, access: &str, refresh: Option<&str>) {
        response.cookie(self.access_cookie(access));
        if let Some(refresh) = refresh {
            response.cookie(self.refresh_cookie(refresh));
        }
    }
    /// Replaces the profile snapshot.
    pub fn snapshot(&self, response: &mut HttpResponseBuilder, account: &Account) {
        response.cookie(self.profile_cookie(account));
    }
    pub fn read(&self, request: &HttpRequest, jar: Jar) -> Option<String> {
        let name = match jar {
            Jar::Access => &self.config.access,
            Jar::Refresh => &self.config.refresh,
            Jar::Profile => &self.config.profile,
        };
        request
            .cookie(name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
    /// Expires every session cookie, each on the path it was set with.
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        for (name, path) in [
            (&self.config.access, "/"),
            (&self.config.refresh, self.config.refresh_path.as_str()),
            (&self.config.profile, "/"),
        ] {
            let mut cookie = Cookie::build(name.to_string(), "").path(path.to_string()).finish();
            cookie.make_removal();
            response.cookie(cookie);
        }
    }
    /// Decodes a profile snapshot, for clients and tests.
    pub fn decode_snapshot(value: &str) -> Option<UserInfo> {
        URL_SAFE_NO_PAD
            .decode(value)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }
}
