use actix_web::{dev::Payload, Error, FromRequest, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::future::{ready, Ready};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub roles: Vec<Role>,
}

fn jwt_secret() -> String {
    // Presence and length are checked at startup.
    env::var("JWT_SECRET").expect("JWT_SECRET not set")
}

fn token_ttl_hours() -> i64 {
    env::var("JWT_TTL_HOURS").ok().and_then(|v| v.parse().ok()).unwrap_or(24)
}

/// Validate a JWT and return its claims.
fn decode_jwt(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Extractor yielding validated `Claims`.
pub struct Auth(pub Claims);

impl FromRequest for Auth {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, pl: &mut Payload) -> Self::Future {
        // Delegate to BearerAuth to parse the header.
        if let Ok(bearer) = BearerAuth::from_request(req, pl).into_inner() {
            match decode_jwt(bearer.token()) {
                Ok(claims) => return ready(Ok(Auth(claims))),
                Err(_) => return ready(Err(actix_web::error::ErrorUnauthorized("Invalid JWT"))),
            }
        }
        ready(Err(actix_web::error::ErrorUnauthorized(
            "Authorization required",
        )))
    }
}

/// Create a session JWT for a dashboard user.
pub fn create_jwt(
    user_id: &str,
    email: &str,
    roles: Vec<Role>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(token_ttl_hours()))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
        roles,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
}

// ---------------------------------------------------------------------------
// Password reset tokens
// ---------------------------------------------------------------------------

const RESET_PURPOSE: &str = "pwreset";
const RESET_TTL_MINUTES: i64 = 30;

/// Claims carried by a forgot-password token. `fp` pins the token to the
/// password hash current at issue time, so changing the password once
/// invalidates every outstanding token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    pub exp: usize,
    pub purpose: String,
    pub fp: String,
}

pub fn password_fingerprint(password_hash: &str) -> String {
    let digest = Sha256::digest(password_hash.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..16].to_string()
}

pub fn create_reset_token(
    user_id: &str,
    password_hash: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::minutes(RESET_TTL_MINUTES))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = ResetClaims {
        sub: user_id.to_string(),
        exp: expiration,
        purpose: RESET_PURPOSE.to_string(),
        fp: password_fingerprint(password_hash),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
}

pub fn decode_reset_token(token: &str) -> Result<ResetClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &validation,
    )?;
    if data.claims.purpose != RESET_PURPOSE {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(data.claims)
}

// ---------------------------------------------------------------------------
// Password hashing (bcrypt off the async runtime)
// ---------------------------------------------------------------------------

pub async fn hash_password(plain: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, bcrypt::DEFAULT_COST))
        .await
        .map_err(|_| ApiError::Internal)?
        .map_err(|_| ApiError::Internal)
}

pub async fn verify_password(plain: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .map_err(|_| ApiError::Internal)?
        .map_err(|_| ApiError::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_secret() {
        std::env::set_var("JWT_SECRET", "unit-test-secret-key-0123456789abcdef");
    }

    #[test]
    #[serial]
    fn reset_token_round_trips() {
        set_secret();
        let token = create_reset_token("user-1", "$2b$12$hash").unwrap();
        let claims = decode_reset_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.fp, password_fingerprint("$2b$12$hash"));
    }

    #[test]
    #[serial]
    fn session_token_rejected_as_reset_token() {
        set_secret();
        let token = create_jwt("user-1", "a@b.c", vec![Role::Admin]).unwrap();
        assert!(decode_reset_token(&token).is_err());
    }

    #[test]
    #[serial]
    fn fingerprint_changes_with_hash() {
        set_secret();
        assert_ne!(password_fingerprint("hash-a"), password_fingerprint("hash-b"));
        assert_eq!(password_fingerprint("hash-a").len(), 16);
    }
}
