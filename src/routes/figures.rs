//! Headline statistics and annual-report infographics, including the bulk
//! infographic upload and its title collision probe.

use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::listing;
use crate::models::*;

#[derive(Debug, serde::Deserialize)]
pub struct StatisticsQuery {
    pub category_id: Option<Id>,
}

#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    params(
        ("category_id" = Option<Id>, Query, description = "Restrict to one category")
    ),
    responses(
        (status = 200, description = "Statistics in display order", body = [Statistic])
    )
)]
pub async fn list_statistics(
    data: web::Data<AppState>,
    query: web::Query<StatisticsQuery>,
) -> Result<HttpResponse, ApiError> {
    let mut rows = data.repo.list_statistics().await?;
    if let Some(cid) = query.category_id {
        rows.retain(|s| s.category_id == Some(cid));
    }
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_statistic(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewStatistic>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_statistic(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_statistic(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewStatistic>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_statistic(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_statistic(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_statistic(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_infographics(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_infographics().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_infographic(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewInfographic>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_infographic(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_infographic(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewInfographic>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_infographic(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_infographic(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_infographic(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

const BULK_LIMIT: usize = 50;

#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct BulkInfographics {
    pub items: Vec<NewInfographic>,
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/infographics/bulk",
    request_body = BulkInfographics,
    responses(
        (status = 201, description = "All items stored; colliding titles were renamed", body = [Infographic]),
        (status = 400, description = "Empty or oversized batch"),
        (status = 403, description = "Forbidden – Admins only")
    )
)]
pub async fn bulk_create_infographics(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<BulkInfographics>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let items = payload.into_inner().items;
    if items.is_empty() {
        return Err(ApiError::BadRequest("empty batch".into()));
    }
    if items.len() > BULK_LIMIT {
        return Err(ApiError::BadRequest(format!("batch larger than {BULK_LIMIT} items")));
    }
    for item in &items {
        item.validate()?;
    }
    let rows = data.repo.create_infographics_bulk(items, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(rows))
}

#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct TitleProbeRequest {
    pub titles: Vec<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct TitleProbeResponse {
    pub titles: Vec<String>,
}

/// Advisory dry run for the bulk upload form: reports the names a batch
/// would get if stored right now. The bulk insert re-resolves on its own,
/// so a probe result can go stale if another admin writes in between.
#[utoipa::path(
    post,
    path = "/api/v1/admin/infographics/title-probe",
    request_body = TitleProbeRequest,
    responses(
        (status = 200, description = "Resolved titles, in request order", body = TitleProbeResponse),
        (status = 403, description = "Forbidden – Admins only")
    )
)]
pub async fn probe_titles(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<TitleProbeRequest>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let requested = payload.into_inner().titles;
    if requested.is_empty() {
        return Err(ApiError::BadRequest("no titles given".into()));
    }
    if requested.iter().any(|t| t.trim().is_empty() || t.len() > 200) {
        return Err(ApiError::BadRequest("titles must be 1-200 characters".into()));
    }
    let mut taken = data.repo.infographic_titles().await?;
    let mut resolved = Vec::with_capacity(requested.len());
    for title in requested {
        let name = listing::next_available_title(taken.iter().map(|t| t.as_str()), &title);
        taken.push(name.clone());
        resolved.push(name);
    }
    Ok(HttpResponse::Ok().json(TitleProbeResponse { titles: resolved }))
}
