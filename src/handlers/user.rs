//! User handlers
//!
//! Just enough user management to own groups; authentication lives elsewhere.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::entity::user::UserResponse;
use crate::error::{AppResult, OptionExt};
use crate::routes::ApiResponse;
use crate::service::group::MSG_OWNER_NOT_FOUND;
use crate::service::user as user_service;
use crate::state::AppState;

/// Add user request
#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// Delete user response
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    #[serde(rename = "groupsRemoved")]
    pub groups_removed: u64,
}

/// POST /api/user/add
pub async fn add_user(
    State(state): State<AppState>,
    Json(req): Json<AddUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = user_service::create(&state.db, &req.username, &req.nickname).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// GET /api/user/info?id=
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = user_service::find(&state.db, query.id)
        .await?
        .ok_or_not_found(MSG_OWNER_NOT_FOUND)?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// POST /api/user/delete?id= - Also removes the user's groups
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<DeleteUserResponse>>> {
    let groups_removed = user_service::delete(&state.db, query.id).await?;
    Ok(Json(ApiResponse::success(DeleteUserResponse { groups_removed })))
}
