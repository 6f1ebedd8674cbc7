//! Fixtures for rows owned by other parts of the application

use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::entity::{group_chat_room, group_member, notice};

pub async fn add_notice(db: &DatabaseConnection, group_id: i64, title: &str) -> notice::Model {
    notice::ActiveModel {
        group_id: Set(group_id),
        title: Set(title.to_string()),
        content: Set(format!("{title} 내용")),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn add_chat_room(db: &DatabaseConnection, group_id: i64, name: &str) -> group_chat_room::Model {
    group_chat_room::ActiveModel {
        group_id: Set(group_id),
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn add_member(db: &DatabaseConnection, group_id: i64, user_id: i64) -> group_member::Model {
    group_member::ActiveModel {
        group_id: Set(group_id),
        user_id: Set(user_id),
        joined_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
