use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::AuthUser;
use super::{ActivityPageDto, ApiResponse, AppState, MutationDto, UserPageDto, validation};
use crate::db::{NewUser, UserListQuery, UserUpdate};
use crate::entities::users::Role;
use crate::error::ServiceError;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub position: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct EditUserRequest {
    pub name: String,
    pub position: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ListUsersParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub position: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn validate_user_payload(
    name: &str,
    position: &str,
    username: &str,
    password: &str,
) -> Result<(), ServiceError> {
    validation::validate_required("name", name)?;
    validation::validate_required("position", position)?;
    validation::validate_username(username)?;
    validation::validate_required("password", password)?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users
/// Create a user account (admin only).
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MutationDto>>), ServiceError> {
    validate_user_payload(
        &payload.name,
        &payload.position,
        &payload.username,
        &payload.password,
    )?;
    let role = validation::parse_role(payload.role.as_deref())?.unwrap_or(Role::Staff);

    let receipt = state
        .user_service()
        .create_user(
            &actor.id,
            NewUser {
                name: payload.name,
                position: payload.position,
                username: payload.username,
                password: payload.password,
                role,
                is_active: payload.is_active.unwrap_or(true),
                last_login: None,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(receipt.into())),
    ))
}

/// GET /users
/// List active users, name ascending, with optional position/role filters.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<UserPageDto>>, ServiceError> {
    let page = validation::validate_page(params.page)?;
    let limit = validation::validate_limit(params.limit)?;
    let role = validation::parse_role(params.role.as_deref())?;

    let users = state
        .user_service()
        .list_users(UserListQuery {
            page,
            limit,
            position: params.position,
            role,
        })
        .await?;

    Ok(Json(ApiResponse::success(users.into())))
}

/// PUT /users/{id}
/// Edit a user account (admin only). The password is always re-hashed.
pub async fn edit_user(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<EditUserRequest>,
) -> Result<Json<ApiResponse<MutationDto>>, ServiceError> {
    validate_user_payload(
        &payload.name,
        &payload.position,
        &payload.username,
        &payload.password,
    )?;

    let receipt = state
        .user_service()
        .edit_user(
            &actor.id,
            &id,
            UserUpdate {
                name: payload.name,
                position: payload.position,
                username: payload.username,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(receipt.into())))
}

/// DELETE /users/{id}
/// Delete a user account (admin only).
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MutationDto>>, ServiceError> {
    let receipt = state.user_service().delete_user(&actor.id, &id).await?;

    Ok(Json(ApiResponse::success(receipt.into())))
}

/// GET /activity
/// Activity log, newest first (admin only).
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiResponse<ActivityPageDto>>, ServiceError> {
    let page = validation::validate_page(params.page)?;
    let limit = validation::validate_limit(params.limit)?;

    let activity = state
        .user_service()
        .get_activity(&actor.id, page, limit)
        .await?;

    Ok(Json(ApiResponse::success(activity.into())))
}
