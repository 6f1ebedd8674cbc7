//! Time-of-day parsing for `startTime` / `endTime`

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

/// Parse "HH:MM" or "HH:MM:SS"
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// A wire time-of-day value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay(pub NaiveTime);

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw)
            .map(TimeOfDay)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:30"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("09:05:10"), NaiveTime::from_hms_opt(9, 5, 10));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("2pm"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn test_deserialize_time_of_day() {
        let t: TimeOfDay = serde_json::from_str("\"16:30\"").unwrap();
        assert_eq!(Some(t.0), NaiveTime::from_hms_opt(16, 30, 0));
        assert!(serde_json::from_str::<TimeOfDay>("\"16h\"").is_err());
    }
}
