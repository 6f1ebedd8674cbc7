//! User storage operations
//!
//! Deleting a user takes every group the user owns with it.

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, TransactionTrait,
};
use tracing::info;

use super::group::{purge_groups, MSG_OWNER_NOT_FOUND};
use crate::entity::{group, group_member, user};
use crate::error::{AppError, AppResult, OptionExt};

pub async fn create<C>(db: &C, username: &str, nickname: &str) -> AppResult<user::Model>
where
    C: ConnectionTrait,
{
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("사용자명을 입력해 주세요".to_string()));
    }

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("이미 존재하는 사용자명입니다".to_string()));
    }

    let model = user::ActiveModel {
        username: Set(username.to_string()),
        nickname: Set(nickname.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("User created: id={} username={}", model.id, model.username);
    Ok(model)
}

pub async fn find<C>(db: &C, id: i64) -> AppResult<Option<user::Model>>
where
    C: ConnectionTrait,
{
    Ok(user::Entity::find_by_id(id).one(db).await?)
}

/// Delete a user, the groups they own (soft-deleted ones included) with
/// those groups' dependants, and their memberships in other groups.
/// Returns the number of groups removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> AppResult<u64> {
    find(db, id).await?.ok_or_not_found(MSG_OWNER_NOT_FOUND)?;

    let txn = db.begin().await?;

    let owned: Vec<i64> = group::Entity::find()
        .select_only()
        .column(group::Column::Id)
        .filter(group::Column::UserId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    let removed = purge_groups(&txn, &owned).await?;

    group_member::Entity::delete_many()
        .filter(group_member::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    user::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    info!("User deleted: id={} groups_removed={}", id, removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_database;
    use crate::schema::group::NewGroup;
    use crate::service::group as group_service;
    use crate::service::testing::{add_chat_room, add_member, add_notice};
    use sea_orm::PaginatorTrait;
    use serde_json::json;

    fn study_group() -> NewGroup {
        NewGroup::from_payload(&json!({
            "groupName": "영어 회화",
            "subject": "ENGLISH",
            "meetingArea": "BUSAN",
            "meetingDay": "SAT",
            "groupIntroduce": "토요일 아침마다 영어로 대화합니다",
            "members": 4
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = test_database().await;
        let created = create(&db, " chicago ", "시카고").await.unwrap();
        assert_eq!(created.username, "chicago");

        let found = find(&db, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_and_blank() {
        let db = test_database().await;
        create(&db, "chicago", "a").await.unwrap();

        let err = create(&db, "chicago", "b").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = create(&db, "  ", "c").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_owned_groups() {
        let db = test_database().await;
        let owner = create(&db, "owner", "").await.unwrap();
        let other = create(&db, "other", "").await.unwrap();

        let active = group_service::create(&db, owner.id, study_group()).await.unwrap();
        let archived = group_service::create(&db, owner.id, study_group()).await.unwrap();
        group_service::soft_delete(&db, archived.id).await.unwrap();
        let foreign = group_service::create(&db, other.id, study_group()).await.unwrap();

        add_notice(&db, active.id, "공지").await;
        add_chat_room(&db, active.id, "채팅").await;
        add_member(&db, active.id, other.id).await;
        add_member(&db, foreign.id, owner.id).await;

        assert_eq!(delete(&db, owner.id).await.unwrap(), 2);

        assert!(find(&db, owner.id).await.unwrap().is_none());
        assert!(group_service::find_any(&db, active.id).await.unwrap().is_none());
        assert!(group_service::find_any(&db, archived.id).await.unwrap().is_none());
        assert!(group_service::find_active(&db, foreign.id).await.unwrap().is_some());

        assert_eq!(crate::entity::notice::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(crate::entity::group_chat_room::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(group_member::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let db = test_database().await;
        let err = delete(&db, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
