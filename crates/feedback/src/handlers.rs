use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use vox_auth::Auth;
use vox_auth::MaybeAuth;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;

pub async fn create(
    ledger: web::Data<dyn Ledger>,
    auth: Auth,
    req: web::Json<Draft>,
) -> Result<HttpResponse, Error> {
    let feedback = ledger.create(auth.user(), req.into_inner()).await?;
    log::info!("user {} submitted feedback {}", auth.user(), feedback.id());
    Ok(HttpResponse::Created().json(feedback.view(Some(auth.user()))))
}

pub async fn list(
    ledger: web::Data<dyn Ledger>,
    viewer: MaybeAuth,
    query: web::Query<Filter>,
) -> Result<HttpResponse, Error> {
    let views = ledger
        .list(&query)
        .await?
        .iter()
        .map(|f| f.view(viewer.user()))
        .collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(views))
}

pub async fn detail(
    ledger: web::Data<dyn Ledger>,
    viewer: MaybeAuth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Error> {
    let feedback = ledger.get(ID::from(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(feedback.view(viewer.user())))
}

pub async fn update(
    ledger: web::Data<dyn Ledger>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    req: web::Json<Patch>,
) -> Result<HttpResponse, Error> {
    let id = ID::from(path.into_inner());
    let feedback = ledger
        .update(id, auth.user(), req.into_inner())
        .await
        .inspect_err(|e| log::debug!("update of {} by {} refused: {}", id, auth.user(), e))?;
    log::info!("user {} updated feedback {}", auth.user(), id);
    Ok(HttpResponse::Ok().json(feedback.view(Some(auth.user()))))
}

pub async fn delete(
    ledger: web::Data<dyn Ledger>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Error> {
    let id = ID::from(path.into_inner());
    ledger
        .delete(id, auth.user())
        .await
        .inspect_err(|e| log::debug!("delete of {} by {} refused: {}", id, auth.user(), e))?;
    log::info!("user {} deleted feedback {}", auth.user(), id);
    Ok(HttpResponse::NoContent().finish())
}
