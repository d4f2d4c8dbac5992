use thiserror::Error;

use super::record::MeetingTimes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("no time tokens in {0:?}")]
    Empty(String),
    /// More than a start and an end survived cleaning, e.g. a trailing
    /// qualifier like "(doors open)". Not interpreted.
    #[error("{} time tokens in {input:?}, expected at most two", tokens.len())]
    Unsupported { input: String, tokens: Vec<String> },
}

/// Parse a label like `"Sunday, Noon to 1:00 pm"` into `{start, end}`.
///
/// Tokens are not validated; whatever sits where a time should be is
/// returned as-is.
pub fn parse_times(label: &str) -> Result<MeetingTimes, TimeParseError> {
    // site markup sometimes uses &nbsp; between the time and its meridiem
    let spaced = label.replace('\u{a0}', " ");
    let without_day = spaced
        .split_once(", ")
        .map(|(_, rest)| rest)
        .unwrap_or(spaced.as_str());

    let cleaned = without_day
        .replace(" am", "am")
        .replace(" pm", "pm")
        .replace(" to ", " ");

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(TimeParseError::Empty(label.to_string())),
        [start] => Ok(MeetingTimes {
            start: start.to_string(),
            end: None,
        }),
        [start, end] => Ok(MeetingTimes {
            start: start.to_string(),
            end: Some(end.to_string()),
        }),
        _ => Err(TimeParseError::Unsupported {
            input: label.to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }),
    }
}

// ── Tests ──
