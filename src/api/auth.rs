use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiResponse, AppState, MessageDto, validation};
use crate::error::ServiceError;
use crate::services::TokenPair;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Identity of the authenticated caller, injected into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires `Authorization: Bearer <access token>`. Verification is
/// stateless: a token with a valid signature is trusted until it expires,
/// with no database lookup.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ServiceError::authentication("missing access token"))?;

    let claims = state.tokens().verify_access_token(&token)?;

    request.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Verify credentials, return an access/refresh token pair.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPair>>), ServiceError> {
    validation::validate_required("username", &payload.username)?;
    validation::validate_required("password", &payload.password)?;

    let pair = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(pair))))
}

/// PUT /auth/refresh
/// Trade a still-valid refresh token for a new access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ServiceError> {
    validation::validate_required("refresh_token", &payload.refresh_token)?;

    let access_token = state.auth_service().refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::success(AccessTokenResponse {
        access_token,
    })))
}

/// DELETE /auth/logout
/// Revoke a refresh token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<MessageDto>>, ServiceError> {
    validation::validate_required("refresh_token", &payload.refresh_token)?;

    state.auth_service().logout(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::success(MessageDto {
        message: "refresh token revoked".to_string(),
    })))
}
