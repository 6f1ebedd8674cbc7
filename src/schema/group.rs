//! Group payload schema
//!
//! `GROUP_SCHEMA` is the canonical definition of an acceptable group payload.
//! [`NewGroup`] and [`GroupChanges`] are the typed results of a payload that
//! passed it.

use chrono::NaiveTime;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::rules::{validate, FieldKind, FieldRule, Mode, ValidationErrors};
use super::time::TimeOfDay;
use crate::entity::enums::{allowed_values, Day, MeetingArea, Subject};
use crate::entity::group;

pub const MSG_INTRODUCE_EMPTY: &str = "그룹 소개를 입력해 주세요";
pub const MSG_INTRODUCE_TOO_SHORT: &str = "그룹 소개는 10자 이상이어야 합니다.";
pub const MSG_AVAILABLE_EXCEEDS_MEMBERS: &str = "남은 자리는 총 정원을 넘을 수 없습니다";

/// Minimum length of `groupIntroduce`, in characters
pub const INTRODUCE_MIN_CHARS: usize = 10;

pub static GROUP_SCHEMA: &[FieldRule] = &[
    FieldRule::new("groupName", "그룹명", FieldKind::Text)
        .required()
        .trimmed()
        .missing_message("그룹명을 입력해 주세요"),
    FieldRule::new("leader", "그룹장", FieldKind::Text).nullable(),
    FieldRule::new("subject", "과목", FieldKind::Enum(allowed_values::<Subject>))
        .required()
        .missing_message("과목을 선택해 주세요"),
    FieldRule::new("meetingArea", "만남 지역", FieldKind::Enum(allowed_values::<MeetingArea>))
        .required()
        .missing_message("만남 지역을 선택해 주세요"),
    FieldRule::new("meetingDay", "모임 요일", FieldKind::Enum(allowed_values::<Day>))
        .required()
        .missing_message("모임 요일을 선택해 주세요"),
    FieldRule::new("groupIntroduce", "그룹 소개", FieldKind::Text)
        .required()
        .missing_message(MSG_INTRODUCE_EMPTY)
        .min_chars(INTRODUCE_MIN_CHARS, MSG_INTRODUCE_TOO_SHORT),
    FieldRule::new("startTime", "시작 시간", FieldKind::Time).nullable(),
    FieldRule::new("endTime", "종료 시간", FieldKind::Time).nullable(),
    FieldRule::new("members", "총 정원", FieldKind::Integer)
        .required()
        .min_value(1)
        .missing_message("총 정원을 입력해 주세요"),
    FieldRule::new("availableMembers", "남은 자리", FieldKind::Integer)
        .nullable()
        .min_value(0),
];

/// A validated group creation payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub group_name: String,
    pub leader: Option<String>,
    pub subject: Subject,
    pub meeting_area: MeetingArea,
    pub meeting_day: Day,
    pub group_introduce: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub members: i32,
    /// `None` leaves the column default (0)
    pub available_members: Option<i32>,
}

impl NewGroup {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let obj = validate(GROUP_SCHEMA, payload, Mode::Create)?;

        let group = Self {
            group_name: required(obj, "groupName")?,
            leader: field::<Option<String>>(obj, "leader")?.flatten(),
            subject: required(obj, "subject")?,
            meeting_area: required(obj, "meetingArea")?,
            meeting_day: required(obj, "meetingDay")?,
            group_introduce: required(obj, "groupIntroduce")?,
            start_time: time_field(obj, "startTime")?.flatten(),
            end_time: time_field(obj, "endTime")?.flatten(),
            members: required(obj, "members")?,
            available_members: field::<Option<i32>>(obj, "availableMembers")?.flatten(),
        };
        check_capacity(group.members, group.available_members)?;

        Ok(group)
    }

    pub fn into_active_model(self, owner_id: i64) -> group::ActiveModel {
        group::ActiveModel {
            user_id: Set(owner_id),
            group_name: Set(self.group_name),
            leader: Set(self.leader),
            subject: Set(self.subject),
            meeting_area: Set(self.meeting_area),
            meeting_day: Set(self.meeting_day),
            group_introduce: Set(self.group_introduce),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            members: Set(self.members),
            available_members: match self.available_members {
                Some(n) => Set(Some(n)),
                None => NotSet,
            },
            ..Default::default()
        }
    }
}

/// A validated partial update. Outer `None` means "leave unchanged"; for
/// nullable columns `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupChanges {
    pub group_name: Option<String>,
    pub leader: Option<Option<String>>,
    pub subject: Option<Subject>,
    pub meeting_area: Option<MeetingArea>,
    pub meeting_day: Option<Day>,
    pub group_introduce: Option<String>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub members: Option<i32>,
    pub available_members: Option<Option<i32>>,
}

impl GroupChanges {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let obj = validate(GROUP_SCHEMA, payload, Mode::Update)?;

        Ok(Self {
            group_name: field(obj, "groupName")?,
            leader: field(obj, "leader")?,
            subject: field(obj, "subject")?,
            meeting_area: field(obj, "meetingArea")?,
            meeting_day: field(obj, "meetingDay")?,
            group_introduce: field(obj, "groupIntroduce")?,
            start_time: time_field(obj, "startTime")?,
            end_time: time_field(obj, "endTime")?,
            members: field(obj, "members")?,
            available_members: field(obj, "availableMembers")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto the stored row. Capacity is checked against the merged values.
    pub fn apply(self, current: group::Model) -> Result<group::ActiveModel, ValidationErrors> {
        let members = self.members.unwrap_or(current.members);
        let available = self.available_members.unwrap_or(current.available_members);
        check_capacity(members, available)?;

        let mut active: group::ActiveModel = current.into();
        if let Some(v) = self.group_name {
            active.group_name = Set(v);
        }
        if let Some(v) = self.leader {
            active.leader = Set(v);
        }
        if let Some(v) = self.subject {
            active.subject = Set(v);
        }
        if let Some(v) = self.meeting_area {
            active.meeting_area = Set(v);
        }
        if let Some(v) = self.meeting_day {
            active.meeting_day = Set(v);
        }
        if let Some(v) = self.group_introduce {
            active.group_introduce = Set(v);
        }
        if let Some(v) = self.start_time {
            active.start_time = Set(v);
        }
        if let Some(v) = self.end_time {
            active.end_time = Set(v);
        }
        if let Some(v) = self.members {
            active.members = Set(v);
        }
        if let Some(v) = self.available_members {
            active.available_members = Set(v);
        }

        Ok(active)
    }
}

/// `availableMembers` must not exceed `members`
pub fn check_capacity(members: i32, available: Option<i32>) -> Result<(), ValidationErrors> {
    match available {
        Some(n) if n > members => Err(ValidationErrors::single(
            "availableMembers",
            MSG_AVAILABLE_EXCEEDS_MEMBERS,
        )),
        _ => Ok(()),
    }
}

fn field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<T>, ValidationErrors> {
    match obj.get(name) {
        None => Ok(None),
        Some(v) => serde_json::from_value(v.clone())
            .map(Some)
            .map_err(|e| ValidationErrors::single(name, e.to_string())),
    }
}

fn required<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &'static str,
) -> Result<T, ValidationErrors> {
    field(obj, name)?.ok_or_else(|| ValidationErrors::single(name, "필수 항목입니다"))
}

fn time_field(
    obj: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<Option<NaiveTime>>, ValidationErrors> {
    Ok(field::<Option<TimeOfDay>>(obj, name)?.map(|t| t.map(|t| t.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn math_club() -> Value {
        json!({
            "groupName": "Math Club",
            "subject": "MATH",
            "meetingArea": "SEOUL",
            "meetingDay": "MON",
            "groupIntroduce": "Weekly math study sessions for everyone",
            "members": 5
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut payload = math_club();
        payload[field] = value;
        payload
    }

    fn without(field: &str) -> Value {
        let mut payload = math_club();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    #[test]
    fn test_accepts_math_club() {
        let group = NewGroup::from_payload(&math_club()).unwrap();
        assert_eq!(group.group_name, "Math Club");
        assert_eq!(group.subject, Subject::Math);
        assert_eq!(group.meeting_area, MeetingArea::Seoul);
        assert_eq!(group.meeting_day, Day::Mon);
        assert_eq!(group.members, 5);
        assert_eq!(group.available_members, None);
        assert_eq!(group.start_time, None);
    }

    #[test]
    fn test_rejects_short_introduce() {
        let errors = NewGroup::from_payload(&with("groupIntroduce", json!("short"))).unwrap_err();
        assert_eq!(errors.message_for("groupIntroduce"), Some(MSG_INTRODUCE_TOO_SHORT));
    }

    #[test]
    fn test_rejects_empty_or_missing_introduce() {
        let errors = NewGroup::from_payload(&with("groupIntroduce", json!(""))).unwrap_err();
        assert_eq!(errors.message_for("groupIntroduce"), Some(MSG_INTRODUCE_EMPTY));

        let errors = NewGroup::from_payload(&without("groupIntroduce")).unwrap_err();
        assert_eq!(errors.message_for("groupIntroduce"), Some(MSG_INTRODUCE_EMPTY));
    }

    #[test]
    fn test_whitespace_introduce_counts_as_text() {
        let spaces = " ".repeat(INTRODUCE_MIN_CHARS);
        let group = NewGroup::from_payload(&with("groupIntroduce", json!(spaces))).unwrap();
        assert_eq!(group.group_introduce, "          ");

        let errors = NewGroup::from_payload(&with("groupName", json!("   "))).unwrap_err();
        assert_eq!(errors.message_for("groupName"), Some("그룹명을 입력해 주세요"));
    }

    #[test]
    fn test_introduce_length_boundary() {
        for len in 0..INTRODUCE_MIN_CHARS {
            let text = "가".repeat(len);
            let errors = NewGroup::from_payload(&with("groupIntroduce", json!(text))).unwrap_err();
            assert!(errors.message_for("groupIntroduce").is_some(), "length {len}");
        }
        // Counted in characters, not bytes
        let text = "가".repeat(INTRODUCE_MIN_CHARS);
        assert!(NewGroup::from_payload(&with("groupIntroduce", json!(text))).is_ok());
        let text = "a".repeat(INTRODUCE_MIN_CHARS + 40);
        assert!(NewGroup::from_payload(&with("groupIntroduce", json!(text))).is_ok());
    }

    #[test]
    fn test_rejects_values_outside_enumerations() {
        for (field, value) in [
            ("subject", "ART"),
            ("subject", "math"),
            ("meetingArea", "TOKYO"),
            ("meetingDay", "MONDAY"),
        ] {
            let errors = NewGroup::from_payload(&with(field, json!(value))).unwrap_err();
            assert!(errors.message_for(field).is_some(), "{field}={value}");
        }
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        for field in [
            "groupName",
            "subject",
            "meetingArea",
            "meetingDay",
            "groupIntroduce",
            "members",
        ] {
            let errors = NewGroup::from_payload(&without(field)).unwrap_err();
            assert_eq!(errors.errors().len(), 1, "{field}");
            assert_eq!(errors.errors()[0].field, field);
        }
    }

    #[test]
    fn test_optional_fields() {
        let mut payload = math_club();
        payload["leader"] = json!("김철수");
        payload["startTime"] = json!("14:30");
        payload["endTime"] = json!("16:30:00");
        payload["availableMembers"] = json!(3);

        let group = NewGroup::from_payload(&payload).unwrap();
        assert_eq!(group.leader.as_deref(), Some("김철수"));
        assert_eq!(group.start_time, NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(group.end_time, NaiveTime::from_hms_opt(16, 30, 0));
        assert_eq!(group.available_members, Some(3));
    }

    #[test]
    fn test_capacity_rules() {
        let errors = NewGroup::from_payload(&with("members", json!(0))).unwrap_err();
        assert!(errors.message_for("members").is_some());

        let errors = NewGroup::from_payload(&with("availableMembers", json!(6))).unwrap_err();
        assert_eq!(errors.message_for("availableMembers"), Some(MSG_AVAILABLE_EXCEEDS_MEMBERS));

        let errors = NewGroup::from_payload(&with("availableMembers", json!(-1))).unwrap_err();
        assert!(errors.message_for("availableMembers").is_some());

        assert!(NewGroup::from_payload(&with("availableMembers", json!(5))).is_ok());
    }

    #[test]
    fn test_ignores_system_fields() {
        let mut payload = math_club();
        payload["id"] = json!(99);
        payload["deletedAt"] = json!("2020-01-01T00:00:00Z");
        let active = NewGroup::from_payload(&payload).unwrap().into_active_model(7);
        assert!(active.id.is_not_set());
        assert!(active.deleted_at.is_not_set());
        assert!(active.available_members.is_not_set());
        assert!(matches!(active.user_id, Set(7)));
    }

    #[test]
    fn test_changes_partial() {
        let changes = GroupChanges::from_payload(&json!({"meetingDay": "FRI", "leader": null})).unwrap();
        assert_eq!(changes.meeting_day, Some(Day::Fri));
        assert_eq!(changes.leader, Some(None));
        assert_eq!(changes.group_name, None);
        assert!(!changes.is_empty());

        assert!(GroupChanges::from_payload(&json!({})).unwrap().is_empty());

        let errors = GroupChanges::from_payload(&json!({"groupIntroduce": "short"})).unwrap_err();
        assert_eq!(errors.message_for("groupIntroduce"), Some(MSG_INTRODUCE_TOO_SHORT));
    }
}
