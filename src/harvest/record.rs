use serde::{Deserialize, Serialize};

/// One meeting, as scraped from a single detail page.
///
/// Optional fields are left out of the JSON line entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub day: String,
    pub times: MeetingTimes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_connection: Option<ZoomConnection>,
    /// Raw markup of the whole "Online Meeting" section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Meeting {
    pub fn new(day: impl Into<String>, times: MeetingTimes) -> Self {
        Self {
            day: day.into(),
            times,
            attendance_options: None,
            venue: None,
            address: None,
            format: None,
            zoom_connection: None,
            zoom_info: None,
            venue_notes: None,
            email: None,
        }
    }
}

/// Free-form time-of-day tokens. No `end` means open-ended or unlisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTimes {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomConnection {
    pub meeting_id: String,
    #[serde(rename = "Passcode")]
    pub passcode: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonl::to_line;

    #[test]
    fn absent_fields_are_omitted() {
        let m = Meeting::new(
            "Monday",
            MeetingTimes {
                start: "7:00pm".into(),
                end: None,
            },
        );
        assert_eq!(
            to_line(&m).unwrap(),
            r#"{"day": "Monday", "times": {"start": "7:00pm"}}"#
        );
    }

    #[test]
    fn passcode_key_is_capitalized() {
        let z = ZoomConnection {
            meeting_id: "123 456 789".into(),
            passcode: "abc".into(),
        };
        assert_eq!(
            to_line(&z).unwrap(),
            r#"{"meeting_id": "123 456 789", "Passcode": "abc"}"#
        );
    }
}
