//! Group handlers
//!
//! Exposes group creation, lookup, editing and deletion. Payloads are checked
//! against the group schema before anything reaches storage.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::entity::group::GroupResponse;
use crate::entity::user::UserResponse;
use crate::entity::{group_chat_room, group_member, notice};
use crate::error::{AppResult, OptionExt};
use crate::routes::ApiResponse;
use crate::schema::group::{GroupChanges, NewGroup};
use crate::service::group as group_service;
use crate::service::group::MSG_GROUP_NOT_FOUND;
use crate::state::AppState;

/// Query parameters
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// Group detail with its owner
#[derive(Debug, serde::Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: GroupResponse,
    pub owner: Option<UserResponse>,
}

/// POST /api/group/add?userId=
pub async fn add_group(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ApiResponse<GroupResponse>>> {
    let new_group = NewGroup::from_payload(&payload).map_err(|e| {
        warn!("Rejected group payload from user {}: {}", query.user_id, e);
        e
    })?;

    let group = group_service::create(&state.db, query.user_id, new_group).await?;
    Ok(Json(ApiResponse::success(group.into())))
}

/// GET /api/group/info?id=
pub async fn get_group(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<GroupDetail>>> {
    let group = group_service::find_active(&state.db, query.id)
        .await?
        .ok_or_not_found(MSG_GROUP_NOT_FOUND)?;
    let owner = group_service::owner(&state.db, &group).await?;

    Ok(Json(ApiResponse::success(GroupDetail {
        group: group.into(),
        owner: owner.map(UserResponse::from),
    })))
}

/// GET /api/group/query - Active groups, optionally for one owner
pub async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<GroupResponse>>>> {
    let groups = group_service::list_active(&state.db, query.user_id).await?;
    Ok(Json(ApiResponse::success(
        groups.into_iter().map(GroupResponse::from).collect(),
    )))
}

/// POST /api/group/update?id=
pub async fn update_group(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ApiResponse<GroupResponse>>> {
    let changes = GroupChanges::from_payload(&payload).map_err(|e| {
        warn!("Rejected update of group {}: {}", query.id, e);
        e
    })?;

    let group = group_service::update(&state.db, query.id, changes).await?;
    Ok(Json(ApiResponse::success(group.into())))
}

/// POST /api/group/delete?id= - Soft delete
pub async fn delete_group(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    group_service::soft_delete(&state.db, query.id).await?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/group/purge?id= - Remove the row and its dependants
pub async fn purge_group(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    group_service::purge(&state.db, query.id).await?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// GET /api/group/notices?id=
pub async fn get_group_notices(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Vec<notice::Model>>>> {
    let group = group_service::find_active(&state.db, query.id)
        .await?
        .ok_or_not_found(MSG_GROUP_NOT_FOUND)?;
    let notices = group_service::notices(&state.db, &group).await?;
    Ok(Json(ApiResponse::success(notices)))
}

/// GET /api/group/chatrooms?id=
pub async fn get_group_chat_rooms(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Vec<group_chat_room::Model>>>> {
    let group = group_service::find_active(&state.db, query.id)
        .await?
        .ok_or_not_found(MSG_GROUP_NOT_FOUND)?;
    let rooms = group_service::chat_rooms(&state.db, &group).await?;
    Ok(Json(ApiResponse::success(rooms)))
}

/// GET /api/group/members?id=
pub async fn get_group_members(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Vec<group_member::Model>>>> {
    let group = group_service::find_active(&state.db, query.id)
        .await?
        .ok_or_not_found(MSG_GROUP_NOT_FOUND)?;
    let members = group_service::members(&state.db, &group).await?;
    Ok(Json(ApiResponse::success(members)))
}
