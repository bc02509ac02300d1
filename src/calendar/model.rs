//! Calendar event model and effective-date resolution.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Start of an event. The backend sends either an all-day `date` or a timed
/// `dateTime`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "dateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_time: Option<String>,
}

/// A calendar event as fetched from the backend.
///
/// Events carry no identifier; their position in the fetched list is their
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: EventStart,
}

impl CalendarEvent {
    /// All-day event.
    pub fn on_date(summary: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            start: EventStart {
                date: Some(date.into()),
                date_time: None,
            },
        }
    }

    /// Timed event.
    pub fn at(summary: impl Into<String>, date_time: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            start: EventStart {
                date: None,
                date_time: Some(date_time.into()),
            },
        }
    }

    /// The raw start value: `date`, else `dateTime`. Blank strings count as absent.
    pub fn effective_date(&self) -> Option<&str> {
        present(&self.start.date).or_else(|| present(&self.start.date_time))
    }

    /// The local calendar day this event starts on, if its date parses.
    pub fn effective_day(&self) -> Option<NaiveDate> {
        self.effective_date().and_then(parse_day)
    }

    /// `"{summary} ({effective date})"`, the line shown under the day picker.
    pub fn display_line(&self) -> String {
        format!("{} ({})", self.summary, self.effective_date().unwrap_or(""))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Resolve a backend date string to a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to local time before
/// taking the day), and offset-less `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as
/// local wall-clock time.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_wins_over_date_time() {
        let event = CalendarEvent {
            summary: "Both".into(),
            start: EventStart {
                date: Some("2024-03-05".into()),
                date_time: Some("2024-04-01T10:00:00".into()),
            },
        };
        assert_eq!(event.effective_date(), Some("2024-03-05"));
        assert_eq!(event.effective_day(), Some(day(2024, 3, 5)));
    }

    #[test]
    fn blank_date_falls_back_to_date_time() {
        let event = CalendarEvent {
            summary: "Blank".into(),
            start: EventStart {
                date: Some("".into()),
                date_time: Some("2024-03-05T09:00:00".into()),
            },
        };
        assert_eq!(event.effective_date(), Some("2024-03-05T09:00:00"));
    }

    #[test]
    fn effective_date_borrows_from_event() {
        let events = vec![
            CalendarEvent::on_date("Lunch", "2024-03-05"),
            CalendarEvent::at("Standup", "2024-03-06T09:00:00"),
        ];
        let dates: Vec<&str> = events.iter().filter_map(CalendarEvent::effective_date).collect();
        assert_eq!(dates, vec!["2024-03-05", "2024-03-06T09:00:00"]);
    }

    #[test]
    fn no_start_has_no_day() {
        let event = CalendarEvent {
            summary: "Floating".into(),
            start: EventStart::default(),
        };
        assert_eq!(event.effective_date(), None);
        assert_eq!(event.effective_day(), None);
        assert_eq!(event.display_line(), "Floating ()");
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_day("2024-01-01"), Some(day(2024, 1, 1)));
        assert_eq!(parse_day("2024-03-05T09:00:00"), Some(day(2024, 3, 5)));
        assert_eq!(parse_day("2024-03-05T23:59"), Some(day(2024, 3, 5)));
        assert_eq!(parse_day("2024-03-05T09:00:00.250"), Some(day(2024, 3, 5)));
        // Midday UTC lands on the same day for any offset within +-11h.
        assert_eq!(parse_day("2024-03-05T12:00:00Z"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn garbage_is_unparsed() {
        assert_eq!(parse_day("next tuesday"), None);
        assert_eq!(parse_day("2024-13-01"), None);
    }

    #[test]
    fn deserializes_backend_shape() {
        let event: CalendarEvent = serde_json::from_value(serde_json::json!({
            "summary": "Standup",
            "start": { "dateTime": "2024-03-05T09:00:00" },
            "id": "ignored"
        }))
        .unwrap();
        assert_eq!(event, CalendarEvent::at("Standup", "2024-03-05T09:00:00"));
        assert_eq!(event.display_line(), "Standup (2024-03-05T09:00:00)");
    }
}
