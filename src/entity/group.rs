//! Group entity - 스터디 그룹 테이블
//!
//! 테이블명: groups
//!
//! `deleted_at` 이 설정된 행은 논리 삭제된 그룹이다. 일반 조회는
//! [`Entity::find_active`] 를 통해 삭제된 행을 제외한다.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};

use super::enums::{Day, MeetingArea, Subject};

/// Wire format of `startTime` / `endTime`
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// 소유자 ID
    #[sea_orm(indexed)]
    pub user_id: i64,

    /// 그룹명
    #[sea_orm(column_type = "String(Some(255))")]
    pub group_name: String,

    /// 그룹장 이름 (소유자 정보의 중복 저장)
    #[sea_orm(column_type = "String(Some(255))", nullable)]
    pub leader: Option<String>,

    /// 과목
    pub subject: Subject,

    /// 만남 지역
    pub meeting_area: MeetingArea,

    /// 모임 요일
    pub meeting_day: Day,

    /// 그룹 소개 (10자 이상)
    #[sea_orm(column_type = "Text")]
    pub group_introduce: String,

    /// 시작 시간
    #[sea_orm(nullable)]
    pub start_time: Option<Time>,

    /// 종료 시간
    #[sea_orm(nullable)]
    pub end_time: Option<Time>,

    /// 총 정원
    pub members: i32,

    /// 남은 자리
    #[sea_orm(nullable, default_value = 0)]
    pub available_members: Option<i32>,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,

    /// 논리 삭제 시각
    #[sea_orm(nullable)]
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::notice::Entity")]
    Notice,
    #[sea_orm(has_many = "super::group_chat_room::Entity")]
    GroupChatRoom,
    #[sea_orm(has_many = "super::group_member::Entity")]
    GroupMember,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::notice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notice.def()
    }
}

impl Related<super::group_chat_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupChatRoom.def()
    }
}

impl Related<super::group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMember.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Maintain `created_at` / `updated_at` and the `available_members` default
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            self.created_at = Set(now);
            if self.available_members.is_not_set() {
                self.available_members = Set(Some(0));
            }
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

impl Entity {
    /// Select groups that have not been soft-deleted
    pub fn find_active() -> Select<Entity> {
        Self::find().filter(Column::DeletedAt.is_null())
    }
}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// 그룹 응답
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: i64,
    pub user_id: i64,
    pub group_name: String,
    pub leader: Option<String>,
    pub subject: Subject,
    pub meeting_area: MeetingArea,
    pub meeting_day: Day,
    pub group_introduce: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub members: i32,
    pub available_members: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTimeUtc>,
}

impl From<Model> for GroupResponse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            group_name: model.group_name,
            leader: model.leader,
            subject: model.subject,
            meeting_area: model.meeting_area,
            meeting_day: model.meeting_day,
            group_introduce: model.group_introduce,
            start_time: model.start_time.map(|t| t.format(TIME_FORMAT).to_string()),
            end_time: model.end_time.map(|t| t.format(TIME_FORMAT).to_string()),
            members: model.members,
            available_members: model.available_members,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
