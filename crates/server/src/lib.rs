//! Backend Server
//!
//! Assembles registration, session, and feedback routes into a single
//! actix-web server backed by PostgreSQL.
//!
//! - [`Config`] — Command-line / environment configuration
//! - [`State`] — Shared stores and session services, installable on any `App`
//! - [`run()`] — Connects, bootstraps the schema, and serves
mod config;

pub use config::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;
use vox_auth::Account;
use vox_auth::Cookies;
use vox_auth::Credentials;
use vox_auth::Crypto;
use vox_auth::Revocation;
use vox_core::Error;
use vox_feedback::Feedback;
use vox_feedback::Ledger;

/// How often expired refresh-token revocations are swept.
const PURGE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10 * 60);

/// Everything a worker needs to serve requests.
#[derive(Clone)]
pub struct State {
    credentials: web::Data<dyn Credentials>,
    ledger: web::Data<dyn Ledger>,
    crypto: web::Data<Crypto>,
    cookies: web::Data<Cookies>,
    client: Option<web::Data<Arc<Client>>>,
}

impl State {
    pub fn new(
        credentials: Arc<dyn Credentials>,
        ledger: Arc<dyn Ledger>,
        crypto: Crypto,
        cookies: Cookies,
    ) -> Self {
        Self {
            credentials: web::Data::from(credentials),
            ledger: web::Data::from(ledger),
            crypto: web::Data::new(crypto),
            cookies: web::Data::new(cookies),
            client: None,
        }
    }
    /// Postgres-backed state: the same client serves both stores.
    pub fn postgres(client: Arc<Client>, crypto: Crypto, cookies: Cookies) -> Self {
        Self {
            client: Some(web::Data::new(client.clone())),
            ..Self::new(client.clone(), client, crypto, cookies)
        }
    }
    pub fn credentials(&self) -> Arc<dyn Credentials> {
        self.credentials.clone().into_inner()
    }
    /// Registers app data, extractor error handlers, and every route.
    #[rustfmt::skip]
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        if let Some(client) = &self.client {
            cfg.app_data(client.clone());
        }
        cfg
            .app_data(self.credentials.clone())
            .app_data(self.ledger.clone())
            .app_data(self.crypto.clone())
            .app_data(self.cookies.clone())
            .app_data(web::JsonConfig::default().error_handler(|e, _| Error::validation(e.to_string()).into()))
            .app_data(web::QueryConfig::default().error_handler(|e, _| Error::validation(e.to_string()).into()))
            .app_data(web::PathConfig::default().error_handler(|_, _| Error::not_found("not found").into()))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(vox_auth::login))
                    .route("/logout", web::post().to(vox_auth::logout))
                    .route("/token/refresh", web::post().to(vox_auth::refresh))
                    .route("/register/step1", web::post().to(vox_auth::step1))
                    .route("/register/step2/{id}", web::patch().to(vox_auth::step2))
                    .route("/register/check-step/{id}", web::get().to(vox_auth::check_step))
                    .route("/profile", web::get().to(vox_auth::profile)),
            )
            .service(
                web::scope("/feedback")
                    .route("/create", web::post().to(vox_feedback::create))
                    .route("/list", web::get().to(vox_feedback::list))
                    .route("/update/{id}", web::patch().to(vox_feedback::update))
                    .route("/delete/{id}", web::delete().to(vox_feedback::delete))
                    .route("/{id}", web::get().to(vox_feedback::detail)),
            );
    }
}

async fn health(client: Option<web::Data<Arc<Client>>>) -> impl Responder {
    let Some(client) = client else {
        return HttpResponse::Ok().body("ok");
    };
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Periodically drops revocations whose tokens have expired on their own.
fn sweep(credentials: Arc<dyn Credentials>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match credentials.purge().await {
                Ok(0) => {}
                Ok(n) => log::debug!("purged {} expired revocations", n),
                Err(e) => log::warn!("revocation purge failed: {}", e),
            }
        }
    });
}

fn cors(origin: Option<&str>) -> Cors {
    match origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        None => Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header(),
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    let client = vox_database::db(&config.db_url).await?;
    vox_database::migrate::<Account>(&client).await?;
    vox_database::migrate::<Revocation>(&client).await?;
    vox_database::migrate::<Feedback>(&client).await?;
    let state = State::postgres(client, config.crypto(), Cookies::new(config.cookies()));
    sweep(state.credentials());
    let origin = config.allowed_origin.clone();
    log::info!("starting server on {}", config.bind);
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(cors(origin.as_deref()))
            .configure(move |cfg| state.configure(cfg))
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await?;
    Ok(())
}
