//! Dashboard authentication: login, self-service password recovery and the
//! session introspection endpoint. The recovery flow has no mailer wired in;
//! the reset token is written to the log for the operator to relay.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::AppState;
use crate::auth::{self, Auth, Role};
use crate::error::{ApiError, ApiErrorBody};
use crate::repo::RepoError;

fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

fn roles_for(is_admin: bool) -> Vec<Role> {
    if is_admin {
        vec![Role::User, Role::Admin]
    } else {
        vec![Role::User]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ApiErrorBody),
        (status = 429, description = "Too many attempts from this address", body = ApiErrorBody)
    )
)]
pub async fn login(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if !data.limiter.allow_login(&client_ip(&req)) {
        return Err(ApiError::TooManyRequests);
    }
    let payload = payload.into_inner();
    payload.validate()?;

    // Same response for unknown email and wrong password
    let user = match data.repo.find_user_by_email(&payload.email).await {
        Ok(user) => user,
        Err(RepoError::NotFound) => {
            metrics::increment_counter!("login_failures_total");
            return Err(ApiError::Unauthorized);
        }
        Err(e) => return Err(e.into()),
    };
    if !auth::verify_password(payload.password, user.password_hash.clone()).await? {
        metrics::increment_counter!("login_failures_total");
        return Err(ApiError::Unauthorized);
    }

    let token = auth::create_jwt(&user.id.to_string(), &user.email, roles_for(user.is_admin))
        .map_err(|_| ApiError::Internal)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: SessionUser {
            id: user.id.to_string(),
            email: user.email,
            is_admin: user.is_admin,
        },
    }))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Always answers 202 so the endpoint cannot be used to enumerate accounts.
pub async fn forgot_password(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    if !data.limiter.allow_forgot(&client_ip(&req)) {
        return Err(ApiError::TooManyRequests);
    }
    let payload = payload.into_inner();
    payload.validate()?;

    match data.repo.find_user_by_email(&payload.email).await {
        Ok(user) => match auth::create_reset_token(&user.id.to_string(), &user.password_hash) {
            Ok(token) => {
                tracing::info!(email = %user.email, %token, "password reset token issued");
            }
            Err(e) => tracing::error!(error = %e, "failed to sign reset token"),
        },
        Err(RepoError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(HttpResponse::Accepted().json(serde_json::json!({"status": "accepted"})))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

pub async fn reset_password(
    data: web::Data<AppState>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    payload.validate()?;

    let claims = auth::decode_reset_token(&payload.token).map_err(|_| ApiError::Unauthorized)?;
    let user_id: Uuid = claims.sub.parse().map_err(|_| ApiError::Unauthorized)?;
    let user = match data.repo.get_user(user_id).await {
        Ok(user) => user,
        Err(RepoError::NotFound) => return Err(ApiError::Unauthorized),
        Err(e) => return Err(e.into()),
    };
    // A token is good for exactly one change: the fingerprint stops matching
    // as soon as the hash it was minted against is replaced.
    if auth::password_fingerprint(&user.password_hash) != claims.fp {
        return Err(ApiError::Unauthorized);
    }

    let hash = auth::hash_password(payload.new_password).await?;
    data.repo.set_password(user.id, hash).await?;
    tracing::info!(email = %user.email, "password reset completed");
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    pub roles: Vec<Role>,
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Claims of the presented token", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(auth: Auth) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(MeResponse {
        id: auth.0.sub,
        email: auth.0.email,
        roles: auth.0.roles,
    }))
}
