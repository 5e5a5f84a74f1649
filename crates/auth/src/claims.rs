use super::*;
use vox_core::ID;
use vox_core::Unique;

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Access,
    Refresh,
}

/// JWT payload. Carries enough identity for stateless authorization
/// downstream; the account row stays authoritative for activation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub jti: uuid::Uuid,
    pub typ: Kind,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub iat: i64,
    pub exp: i64,
    /// On access tokens, the id and expiry of the refresh token minted
    /// alongside, so a session can be revoked from the access token alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rjti: Option<uuid::Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rexp: Option<i64>,
}

impl Claims {
    pub fn new(account: &Account, typ: Kind, ttl: std::time::Duration) -> Self {
        let now = vox_core::now();
        Self {
            sub: account.id().inner(),
            jti: uuid::Uuid::now_v7(),
            typ,
            email: account.email().to_string(),
            role: account.role(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            iat: now,
            exp: now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)),
            rjti: None,
            rexp: None,
        }
    }
    /// Links an access token to the refresh token of its session.
    pub fn paired(self, refresh: &Claims) -> Self {
        Self {
            rjti: Some(refresh.jti),
            rexp: Some(refresh.exp),
            ..self
        }
    }
    /// Refresh token id and expiry of this session, if linked.
    pub fn session(&self) -> Option<(uuid::Uuid, i64)> {
        self.rjti.zip(self.rexp)
    }
    pub fn expired(&self) -> bool {
        self.exp < vox_core::now()
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
    pub fn kind(&self) -> Kind {
        self.typ
    }
}
