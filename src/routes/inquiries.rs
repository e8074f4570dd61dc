use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::{ApiError, ApiErrorBody};
use crate::listing::{self, InquiryPage, DEFAULT_PER_PAGE};
use crate::models::*;

/// Public contact form intake. No auth and no throttling here; abuse
/// control for this path sits at the reverse proxy.
#[utoipa::path(
    post,
    path = "/api/v1/inquiries",
    request_body = NewInquiry,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Validation failed", body = ApiErrorBody)
    )
)]
pub async fn create_inquiry(
    data: web::Data<AppState>,
    payload: web::Json<NewInquiry>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_inquiry(payload).await?;
    metrics::increment_counter!("inquiries_created_total");
    Ok(HttpResponse::Created().json(row))
}

#[derive(Debug, Deserialize)]
pub struct InquiryListQuery {
    pub status: Option<InquiryStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/inquiries",
    params(
        ("status" = Option<InquiryStatus>, Query, description = "Filter by status"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("per_page" = Option<u32>, Query, description = "Page size, 1-100")
    ),
    responses(
        (status = 200, description = "Inquiries, newest first", body = InquiryPage),
        (status = 403, description = "Admin role required", body = ApiErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_inquiries(
    auth: Auth,
    data: web::Data<AppState>,
    query: web::Query<InquiryListQuery>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let mut rows = data.repo.list_inquiries().await?;
    if let Some(status) = query.status {
        rows.retain(|i| i.status == status);
    }
    let page = listing::paginate(
        rows,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    Ok(HttpResponse::Ok().json(page))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InquiryStatusUpdate {
    pub status: InquiryStatus,
}

pub async fn set_inquiry_status(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<InquiryStatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let row = data
        .repo
        .set_inquiry_status(path.into_inner(), payload.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(row))
}
