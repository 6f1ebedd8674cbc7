//! Closed enumerations used by the group entity
//!
//! 과목 / 지역 / 요일. Stored as their upper-case string values.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveEnum, Iterable};
use serde::{Deserialize, Serialize};

/// 그룹 과목
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subject {
    #[sea_orm(string_value = "MATH")]
    Math,
    #[sea_orm(string_value = "KOREAN")]
    Korean,
    #[sea_orm(string_value = "ENGLISH")]
    English,
    #[sea_orm(string_value = "SCIENCE")]
    Science,
    #[sea_orm(string_value = "SOCIAL")]
    Social,
    #[sea_orm(string_value = "HISTORY")]
    History,
    #[sea_orm(string_value = "CODING")]
    Coding,
    #[sea_orm(string_value = "LANGUAGE")]
    Language,
    #[sea_orm(string_value = "CERTIFICATE")]
    Certificate,
    #[sea_orm(string_value = "ETC")]
    Etc,
}

/// 만남 지역
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingArea {
    #[sea_orm(string_value = "SEOUL")]
    Seoul,
    #[sea_orm(string_value = "BUSAN")]
    Busan,
    #[sea_orm(string_value = "DAEGU")]
    Daegu,
    #[sea_orm(string_value = "INCHEON")]
    Incheon,
    #[sea_orm(string_value = "GWANGJU")]
    Gwangju,
    #[sea_orm(string_value = "DAEJEON")]
    Daejeon,
    #[sea_orm(string_value = "ULSAN")]
    Ulsan,
    #[sea_orm(string_value = "SEJONG")]
    Sejong,
    #[sea_orm(string_value = "GYEONGGI")]
    Gyeonggi,
    #[sea_orm(string_value = "GANGWON")]
    Gangwon,
    #[sea_orm(string_value = "CHUNGBUK")]
    Chungbuk,
    #[sea_orm(string_value = "CHUNGNAM")]
    Chungnam,
    #[sea_orm(string_value = "JEONBUK")]
    Jeonbuk,
    #[sea_orm(string_value = "JEONNAM")]
    Jeonnam,
    #[sea_orm(string_value = "GYEONGBUK")]
    Gyeongbuk,
    #[sea_orm(string_value = "GYEONGNAM")]
    Gyeongnam,
    #[sea_orm(string_value = "JEJU")]
    Jeju,
    #[sea_orm(string_value = "ONLINE")]
    Online,
}

/// 모임 요일
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(8))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    #[sea_orm(string_value = "MON")]
    Mon,
    #[sea_orm(string_value = "TUE")]
    Tue,
    #[sea_orm(string_value = "WED")]
    Wed,
    #[sea_orm(string_value = "THU")]
    Thu,
    #[sea_orm(string_value = "FRI")]
    Fri,
    #[sea_orm(string_value = "SAT")]
    Sat,
    #[sea_orm(string_value = "SUN")]
    Sun,
}

/// All permitted wire values of an enumeration, in declaration order
pub fn allowed_values<E>() -> Vec<String>
where
    E: ActiveEnum<Value = String> + Iterable,
{
    E::iter().map(|v| v.to_value()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_values_are_upper_case() {
        let subjects = allowed_values::<Subject>();
        assert!(subjects.contains(&"MATH".to_string()));
        assert!(!subjects.contains(&"math".to_string()));
        assert!(allowed_values::<MeetingArea>().contains(&"SEOUL".to_string()));
    }

    #[test]
    fn test_serde_matches_stored_value() {
        for subject in Subject::iter() {
            let json = serde_json::to_value(subject).unwrap();
            assert_eq!(json, serde_json::Value::String(subject.to_value()));
        }
        for area in MeetingArea::iter() {
            let json = serde_json::to_value(area).unwrap();
            assert_eq!(json, serde_json::Value::String(area.to_value()));
        }
        for day in Day::iter() {
            let json = serde_json::to_value(day).unwrap();
            assert_eq!(json, serde_json::Value::String(day.to_value()));
        }
    }

    #[test]
    fn test_allowed_values() {
        let days = allowed_values::<Day>();
        assert_eq!(days, vec!["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]);
        assert_eq!(allowed_values::<MeetingArea>().len(), 18);
    }
}
