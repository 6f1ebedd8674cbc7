//! GroupChatRoom entity - 그룹 채팅방 테이블
//!
//! 테이블명: group_chat_rooms

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group_chat_rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 그룹 ID
    #[sea_orm(indexed)]
    pub group_id: i64,

    /// 채팅방 이름
    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "Cascade"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
