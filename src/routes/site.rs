//! Site chrome endpoints: FAQ entries, the footer singleton with its live
//! event stream, and the health/metrics probes.

use std::convert::Infallible;

use actix_web::{web, HttpResponse};
use futures_util::stream::{self, StreamExt as _};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::broadcast::error::RecvError;
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::events;
use crate::models::*;

pub async fn list_faqs(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_faqs().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_faq(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewFaq>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_faq(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_faq(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewFaq>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_faq(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_faq(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_faq(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/footer",
    responses(
        (status = 200, description = "Current footer settings", body = FooterSettings)
    )
)]
pub async fn get_footer(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let row = data.repo.get_footer_settings().await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn update_footer(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewFooterSettings>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.upsert_footer_settings(payload, Some(auth.0.email.clone())).await?;
    // Open event streams get the new row immediately
    data.feed.publish(row.clone());
    Ok(HttpResponse::Ok().json(row))
}

/// SSE stream of footer settings: one snapshot frame on connect, then a
/// frame per admin save for as long as the client stays connected.
pub async fn footer_events(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let snapshot = data.repo.get_footer_settings().await?;
    let rx = data.feed.subscribe();

    let initial = stream::iter(
        events::sse_frame(&snapshot)
            .into_iter()
            .map(Ok::<_, Infallible>),
    );
    let live = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(settings) => {
                    if let Some(frame) = events::sse_frame(&settings) {
                        return Some((Ok::<_, Infallible>(frame), rx));
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(initial.chain(live)))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

pub async fn metrics(handle: web::Data<PrometheusHandle>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(handle.render())
}
