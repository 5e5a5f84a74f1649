use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;

pub async fn login(
    store: web::Data<dyn Credentials>,
    crypto: web::Data<Crypto>,
    cookies: web::Data<Cookies>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Error> {
    let email = normalize(&req.email);
    let account = match store.lookup(&email).await? {
        Some((account, hashword)) if password::verify(&req.password, &hashword) => account,
        _ => {
            log::warn!("failed login for {}", email);
            return Err(Error::auth("invalid credentials"));
        }
    };
    if !account.is_active() {
        return Err(Error::auth("registration incomplete"));
    }
    let pair = crypto.issue(&account)?;
    log::info!("user {} logged in", account.id());
    let mut response = HttpResponse::Ok();
    cookies.write(&mut response, &pair.access, Some(&pair.refresh));
    cookies.snapshot(&mut response, &account);
    Ok(response.json(AuthResponse {
        detail: "login successful".to_string(),
        user: UserInfo::from(&account),
    }))
}

pub async fn refresh(
    store: web::Data<dyn Credentials>,
    crypto: web::Data<Crypto>,
    cookies: web::Data<Cookies>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    let token = cookies
        .read(&req, Jar::Refresh)
        .ok_or_else(|| Error::auth("refresh token missing"))?;
    let (account, access) = crypto.refresh(&token, store.get_ref()).await?;
    log::debug!("refreshed access token for {}", account.id());
    let mut response = HttpResponse::Ok();
    cookies.write(&mut response, &access, None);
    Ok(response.json(serde_json::json!({ "detail": "token refreshed" })))
}

pub async fn logout(
    store: web::Data<dyn Credentials>,
    crypto: web::Data<Crypto>,
    cookies: web::Data<Cookies>,
    auth: Auth,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    if crypto.end(auth.claims(), store.get_ref()).await? {
        log::info!("user {} logged out, refresh token revoked", auth.user());
    }
    if let Some(token) = cookies.read(&req, Jar::Refresh) {
        match crypto.revoke(&token, store.get_ref()).await {
            Ok(()) => log::debug!("also revoked presented refresh token"),
            Err(Error::Auth(e)) => log::debug!("ignoring unusable refresh token: {}", e),
            Err(e) => return Err(e),
        }
    }
    let mut response = HttpResponse::Ok();
    cookies.clear(&mut response);
    Ok(response.json(serde_json::json!({ "detail": "logged out" })))
}

pub async fn step1(
    store: web::Data<dyn Credentials>,
    req: web::Json<Signup>,
) -> Result<HttpResponse, Error> {
    let account = Registration::new(store.get_ref())
        .step1(req.into_inner())
        .await?;
    log::info!("registered {} account {}", account.role(), account.id());
    Ok(HttpResponse::Created().json(Progress::from(&account)))
}

pub async fn step2(
    store: web::Data<dyn Credentials>,
    crypto: web::Data<Crypto>,
    cookies: web::Data<Cookies>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<serde_json::Value>,
) -> Result<HttpResponse, Error> {
    let id: ID<Account> = ID::from(path.into_inner());
    let account = Registration::new(store.get_ref())
        .step2(id, req.into_inner())
        .await?;
    log::info!("activated {} account {}", account.role(), account.id());
    let pair = crypto.issue(&account)?;
    let mut response = HttpResponse::Ok();
    cookies.write(&mut response, &pair.access, Some(&pair.refresh));
    cookies.snapshot(&mut response, &account);
    Ok(response.json(AuthResponse {
        detail: "registration complete".to_string(),
        user: UserInfo::from(&account),
    }))
}

pub async fn check_step(
    store: web::Data<dyn Credentials>,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Error> {
    let progress = Registration::new(store.get_ref())
        .check(ID::from(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

pub async fn profile(auth: Auth) -> HttpResponse {
    HttpResponse::Ok().json(ProfileView::from(auth.account()))
}
