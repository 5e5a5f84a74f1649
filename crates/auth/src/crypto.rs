use super::*;
use vox_core::Error;

/// Access + refresh token pair minted at login and at step-2 completion.
#[derive(Debug, Clone)]
pub struct Pair {
    pub access: String,
    pub refresh: String,
}

/// Token issuer: signs, verifies, refreshes, and revokes JWTs.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    access: std::time::Duration,
    refresh: std::time::Duration,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            access: vox_core::ACCESS_TOKEN_TTL,
            refresh: vox_core::REFRESH_TOKEN_TTL,
        }
    }
    pub fn with_lifetimes(self, access: std::time::Duration, refresh: std::time::Duration) -> Self {
        Self {
            access,
            refresh,
            ..self
        }
    }
    pub fn access_ttl(&self) -> std::time::Duration {
        self.access
    }
    pub fn refresh_ttl(&self) -> std::time::Duration {
        self.refresh
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
            .map_err(Error::internal)
    }
    /// Verifies signature and expiry, and that the token is of the expected kind.
    pub fn decode(&self, token: &str, kind: Kind) -> Result<Claims, Error> {
        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &jsonwebtoken::Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| Error::auth(format!("invalid token: {}", e)))?;
        if claims.expired() {
            return Err(Error::auth("token expired"));
        }
        if claims.kind() != kind {
            return Err(Error::auth("wrong token type"));
        }
        Ok(claims)
    }
    /// Access token for `account`, bound to the session of `refresh`.
    pub fn access(&self, account: &Account, refresh: &Claims) -> Result<String, Error> {
        self.encode(&Claims::new(account, Kind::Access, self.access).paired(refresh))
    }
    pub fn issue(&self, account: &Account) -> Result<Pair, Error> {
        let refresh = Claims::new(account, Kind::Refresh, self.refresh);
        Ok(Pair {
            access: self.access(account, &refresh)?,
            refresh: self.encode(&refresh)?,
        })
    }
    /// Exchanges a refresh token for a new access token.
    ///
    /// Claims are rebuilt from the current account row, so a refresh picks
    /// up renamed users and refuses deleted or inactive ones.
    pub async fn refresh(
        &self,
        token: &str,
        store: &dyn Credentials,
    ) -> Result<(Account, String), Error> {
        let claims = self.decode(token, Kind::Refresh)?;
        if store.revoked(claims.jti).await? {
            return Err(Error::auth("token is blacklisted"));
        }
        let account = store
            .load(claims.user())
            .await?
            .filter(Account::is_active)
            .ok_or_else(|| Error::auth("user inactive or deleted"))?;
        let access = self.access(&account, &claims)?;
        Ok((account, access))
    }
    /// Blacklists a refresh token until its natural expiry.
    pub async fn revoke(&self, token: &str, store: &dyn Credentials) -> Result<(), Error> {
        let claims = self.decode(token, Kind::Refresh)?;
        store.revoke(claims.jti, claims.exp).await
    }
    /// Blacklists the refresh token paired with a verified access token.
    /// Returns false when the access token carries no session link.
    pub async fn end(&self, access: &Claims, store: &dyn Credentials) -> Result<bool, Error> {
        match access.session() {
            Some((jti, exp)) => store.revoke(jti, exp).await.map(|()| true),
            None => Ok(false),
        }
    }
}
