//! The content library: categories plus the published documents and videos.
//! The public listing hides items with no usable URLs, keeps videos after
//! documents, and pages the result; admins see every row unfiltered.

use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::listing::{self, ContentPage, SortDir};
use crate::models::*;

pub async fn list_categories(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_categories().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_category(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewCategory>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_category(payload).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_category(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewCategory>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_category(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_category(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, serde::Deserialize)]
pub struct LibraryQuery {
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub category_id: Option<Id>,
    pub year: Option<i32>,
    #[serde(default)]
    pub sort: SortDir,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/library",
    params(
        ("type" = Option<ContentType>, Query, description = "pdf | flipbook | youtube"),
        ("category_id" = Option<Id>, Query, description = "Restrict to one category"),
        ("year" = Option<i32>, Query, description = "Restrict to one year"),
        ("sort" = Option<SortDir>, Query, description = "newest (default) or oldest"),
        ("page" = Option<u32>, Query, description = "1-based page, clamped into range"),
        ("per_page" = Option<u32>, Query, description = "Page size, 1-100, default 20")
    ),
    responses(
        (status = 200, description = "One page of visible items", body = ContentPage)
    )
)]
pub async fn library(
    data: web::Data<AppState>,
    query: web::Query<LibraryQuery>,
) -> Result<HttpResponse, ApiError> {
    let q = query.into_inner();
    let mut items = data.repo.list_content_items().await?;
    items.retain(listing::has_playable_urls);
    if let Some(ty) = q.content_type {
        items.retain(|i| i.content_type == ty);
    }
    if let Some(cid) = q.category_id {
        items.retain(|i| i.category_id == Some(cid));
    }
    if let Some(year) = q.year {
        items.retain(|i| i.year == year);
    }
    listing::sort_items(&mut items, q.sort);
    let page = listing::paginate(
        items,
        q.page.unwrap_or(1),
        q.per_page.unwrap_or(listing::DEFAULT_PER_PAGE),
    );
    Ok(HttpResponse::Ok().json(page))
}

/// Unfiltered view for the dashboard, hidden rows included.
pub async fn admin_list_content(auth: Auth, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let rows = data.repo.list_content_items().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/content",
    request_body = NewContentItem,
    responses(
        (status = 201, description = "Item created", body = ContentItem),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown category"),
        (status = 403, description = "Forbidden – Admins only")
    )
)]
pub async fn create_content_item(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewContentItem>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_content_item(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_content_item(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewContentItem>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_content_item(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_content_item(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_content_item(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
