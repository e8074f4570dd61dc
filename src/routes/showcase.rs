//! Testimonials, client logos and the company timeline.

use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::*;

#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    responses(
        (status = 200, description = "Testimonials in display order", body = [Testimonial])
    )
)]
pub async fn list_testimonials(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_testimonials().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_testimonial(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewTestimonial>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_testimonial(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_testimonial(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewTestimonial>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_testimonial(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_testimonial(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_testimonial(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_clients(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_client_logos().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_client(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewClientLogo>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_client_logo(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_client(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewClientLogo>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_client_logo(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_client(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_client_logo(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_timeline(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_timeline_entries().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_timeline_entry(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewTimelineEntry>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_timeline_entry(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_timeline_entry(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewTimelineEntry>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_timeline_entry(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_timeline_entry(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_timeline_entry(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
