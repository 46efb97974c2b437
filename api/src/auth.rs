use crate::models::ApiResponse;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use common::settings::JwtSettings;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JwtClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub role: String,
}

/// The verified bearer credential. Token issuance lives with the identity
/// provider; this API only validates what arrives.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiResponse::error(401, "missing bearer token".to_string())),
                )
            })?;

        let signing_key = state.settings.auth.jwt.signing_key.clone().ok_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    500,
                    "jwt signing key not configured".to_string(),
                )),
            )
        })?;

        let mut validation = Validation::default();
        validation.set_issuer(std::slice::from_ref(&state.settings.auth.jwt.issuer));
        validation.set_audience(std::slice::from_ref(&state.settings.auth.jwt.audience));

        let decoded = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(signing_key.as_bytes()),
            &validation,
        )
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(401, "invalid token".to_string())),
            )
        })?;

        let user_id = Uuid::parse_str(&decoded.claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(401, "invalid token sub".to_string())),
            )
        })?;

        Ok(Self {
            user_id,
            role: decoded.claims.role,
        })
    }
}

/// Signs an access token for the given user. Used by operators and tests;
/// the service itself never issues tokens on behalf of clients.
pub fn create_access_token(
    jwt: &JwtSettings,
    signing_key: &str,
    user_id: Uuid,
    role: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = JwtClaims {
        iss: jwt.issuer.clone(),
        aud: jwt.audience.clone(),
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(jwt.access_ttl_seconds)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(signing_key.as_bytes()),
    )
}

pub async fn me(user: AuthUser) -> Json<ApiResponse<MeResponse>> {
    Json(ApiResponse::success(MeResponse {
        user_id: user.user_id,
        role: user.role,
    }))
}
