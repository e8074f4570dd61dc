//! Home page building blocks: hero slides, experience items, advantages and
//! company values. Public reads are open; writes are admin only.

use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::*;

#[utoipa::path(
    get,
    path = "/api/v1/hero-slides",
    responses(
        (status = 200, description = "Slides in display order", body = [HeroSlide])
    )
)]
pub async fn list_hero_slides(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_hero_slides().await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/hero-slides",
    request_body = NewHeroSlide,
    responses(
        (status = 201, description = "Slide created", body = HeroSlide),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden – Admins only")
    )
)]
pub async fn create_hero_slide(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewHeroSlide>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_hero_slide(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/hero-slides/{id}",
    request_body = NewHeroSlide,
    params(("id" = Id, Path, description = "Slide id")),
    responses(
        (status = 200, description = "Slide updated", body = HeroSlide),
        (status = 404, description = "Slide not found")
    )
)]
pub async fn update_hero_slide(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewHeroSlide>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_hero_slide(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_hero_slide(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_hero_slide(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_experience(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_experience_items().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_experience(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewExperienceItem>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_experience_item(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_experience(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewExperienceItem>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_experience_item(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_experience(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_experience_item(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_advantages(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_advantages().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_advantage(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewAdvantage>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_advantage(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_advantage(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewAdvantage>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_advantage(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_advantage(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_advantage(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_values(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = data.repo.list_company_values().await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn create_value(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewCompanyValue>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.create_company_value(payload, Some(auth.0.email.clone())).await?;
    Ok(HttpResponse::Created().json(row))
}

pub async fn update_value(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewCompanyValue>,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    let payload = payload.into_inner();
    payload.validate()?;
    let row = data.repo.update_company_value(path.into_inner(), payload).await?;
    Ok(HttpResponse::Ok().json(row))
}

pub async fn delete_value(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);
    data.repo.delete_company_value(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
