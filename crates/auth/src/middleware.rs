use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;
use vox_core::Error;
use vox_core::ID;

/// Extractor for authenticated requests.
///
/// Reads the access cookie, verifies it, and loads the account it names.
/// Absent or invalid tokens, deleted users, and inactive users are all
/// rejected with 401.
pub struct Auth {
    account: Account,
    claims: Claims,
}

impl Auth {
    pub fn account(&self) -> &Account {
        &self.account
    }
    pub fn claims(&self) -> &Claims {
        &self.claims
    }
    pub fn user(&self) -> ID<Account> {
        self.claims.user()
    }
}

/// Resolves the caller of `req` from its access cookie.
pub async fn authenticate(
    req: &HttpRequest,
    cookies: &Cookies,
    crypto: &Crypto,
    store: &dyn Credentials,
) -> Result<Auth, Error> {
    let token = cookies
        .read(req, Jar::Access)
        .ok_or_else(|| Error::auth("authentication credentials were not provided"))?;
    let claims = crypto.decode(&token, Kind::Access)?;
    let account = store
        .load(claims.user())
        .await?
        .ok_or_else(|| Error::auth("user not found"))?;
    if !account.is_active() {
        return Err(Error::auth("user inactive or deleted"));
    }
    Ok(Auth { account, claims })
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let cookies = req
                .app_data::<web::Data<Cookies>>()
                .ok_or_else(|| Error::internal("cookie adapter not configured"))?;
            let crypto = req
                .app_data::<web::Data<Crypto>>()
                .ok_or_else(|| Error::internal("token service not configured"))?;
            let store = req
                .app_data::<web::Data<dyn Credentials>>()
                .ok_or_else(|| Error::internal("credential store not configured"))?;
            authenticate(&req, cookies, crypto, store.get_ref())
                .await
                .inspect_err(|e| log::debug!("rejected {}: {}", req.path(), e))
                .map_err(actix_web::Error::from)
        })
    }
}

/// Optional authentication extractor; never fails.
pub struct MaybeAuth(pub Option<Auth>);

impl MaybeAuth {
    pub fn user(&self) -> Option<ID<Account>> {
        self.0.as_ref().map(Auth::user)
    }
}

impl FromRequest for MaybeAuth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth = Auth::from_request(req, payload);
        Box::pin(async move { Ok(MaybeAuth(auth.await.ok())) })
    }
}
