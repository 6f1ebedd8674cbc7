//! Group storage operations
//!
//! Soft-deleted groups are invisible to everything except [`find_any`] and
//! [`purge`].

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;

use crate::entity::{group, group_chat_room, group_member, notice, user};
use crate::error::{AppError, AppResult, OptionExt};
use crate::schema::group::{GroupChanges, NewGroup};

pub const MSG_GROUP_NOT_FOUND: &str = "그룹을 찾을 수 없습니다";
pub const MSG_OWNER_NOT_FOUND: &str = "사용자를 찾을 수 없습니다";

/// Persist a validated group owned by `owner_id`
pub async fn create<C>(db: &C, owner_id: i64, new_group: NewGroup) -> AppResult<group::Model>
where
    C: ConnectionTrait,
{
    user::Entity::find_by_id(owner_id)
        .one(db)
        .await?
        .ok_or_not_found(MSG_OWNER_NOT_FOUND)?;

    let model = new_group.into_active_model(owner_id).insert(db).await?;
    info!("Group created: id={} owner={} name={}", model.id, owner_id, model.group_name);
    Ok(model)
}

/// Active (not soft-deleted) group by id
pub async fn find_active<C>(db: &C, id: i64) -> AppResult<Option<group::Model>>
where
    C: ConnectionTrait,
{
    Ok(group::Entity::find_active()
        .filter(group::Column::Id.eq(id))
        .one(db)
        .await?)
}

/// Group by id regardless of soft-delete state
pub async fn find_any<C>(db: &C, id: i64) -> AppResult<Option<group::Model>>
where
    C: ConnectionTrait,
{
    Ok(group::Entity::find_by_id(id).one(db).await?)
}

/// Active groups, optionally restricted to one owner, oldest first
pub async fn list_active<C>(db: &C, owner_id: Option<i64>) -> AppResult<Vec<group::Model>>
where
    C: ConnectionTrait,
{
    let mut query = group::Entity::find_active();
    if let Some(owner_id) = owner_id {
        query = query.filter(group::Column::UserId.eq(owner_id));
    }
    Ok(query.order_by_asc(group::Column::Id).all(db).await?)
}

pub async fn update<C>(db: &C, id: i64, changes: GroupChanges) -> AppResult<group::Model>
where
    C: ConnectionTrait,
{
    if changes.is_empty() {
        return Err(AppError::BadRequest("변경할 항목이 없습니다".to_string()));
    }

    let current = find_active(db, id).await?.ok_or_not_found(MSG_GROUP_NOT_FOUND)?;
    let model = changes.apply(current)?.update(db).await?;
    info!("Group updated: id={}", model.id);
    Ok(model)
}

/// Mark a group deleted. The row and its dependants are kept.
pub async fn soft_delete<C>(db: &C, id: i64) -> AppResult<group::Model>
where
    C: ConnectionTrait,
{
    let current = find_active(db, id).await?.ok_or_not_found(MSG_GROUP_NOT_FOUND)?;

    let mut active: group::ActiveModel = current.into();
    active.deleted_at = Set(Some(chrono::Utc::now()));
    let model = active.update(db).await?;
    info!("Group soft-deleted: id={}", model.id);
    Ok(model)
}

/// Physically remove a group (active or soft-deleted) with its notices,
/// chat rooms and members
pub async fn purge(db: &DatabaseConnection, id: i64) -> AppResult<()> {
    let group = find_any(db, id).await?.ok_or_not_found(MSG_GROUP_NOT_FOUND)?;

    let txn = db.begin().await?;
    purge_groups(&txn, &[id]).await?;
    txn.commit().await?;

    info!("Group purged: id={}, soft_deleted={}", id, group.is_deleted());
    Ok(())
}

/// Delete the given groups and everything that references them.
///
/// Dependants are removed explicitly so the cascade holds even where the
/// backend does not enforce foreign keys.
pub(crate) async fn purge_groups<C>(db: &C, ids: &[i64]) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }

    notice::Entity::delete_many()
        .filter(notice::Column::GroupId.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    group_chat_room::Entity::delete_many()
        .filter(group_chat_room::Column::GroupId.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    group_member::Entity::delete_many()
        .filter(group_member::Column::GroupId.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    let result = group::Entity::delete_many()
        .filter(group::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn owner<C>(db: &C, group: &group::Model) -> AppResult<Option<user::Model>>
where
    C: ConnectionTrait,
{
    Ok(group.find_related(user::Entity).one(db).await?)
}

pub async fn notices<C>(db: &C, group: &group::Model) -> AppResult<Vec<notice::Model>>
where
    C: ConnectionTrait,
{
    Ok(group
        .find_related(notice::Entity)
        .order_by_asc(notice::Column::Id)
        .all(db)
        .await?)
}

pub async fn chat_rooms<C>(db: &C, group: &group::Model) -> AppResult<Vec<group_chat_room::Model>>
where
    C: ConnectionTrait,
{
    Ok(group
        .find_related(group_chat_room::Entity)
        .order_by_asc(group_chat_room::Column::Id)
        .all(db)
        .await?)
}

pub async fn members<C>(db: &C, group: &group::Model) -> AppResult<Vec<group_member::Model>>
where
    C: ConnectionTrait,
{
    Ok(group
        .find_related(group_member::Entity)
        .order_by_asc(group_member::Column::Id)
        .all(db)
        .await?)
}
