//! The four user-triggered actions and how each reports its outcome.

use serde_json::Value;

use crate::calendar::CalendarEvent;
use crate::error::TransportError;
use crate::transport::wire::{
    CalendarEventsResponse, ChatRequest, ChatResponse, DayPlanResponse, InsightsResponse,
    ProductivityInsights,
};
use crate::transport::{RequestKind, decode};

/// Timeline text after a successful calendar fetch.
pub const CALENDAR_LOADED: &str = "Calendar events loaded!";

/// An action accepted from the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendMessage { message: String },
    LoadCalendarEvents,
    LoadDayPlan,
    LoadProductivityInsights,
}

/// What a settled action contributes to client state.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Assistant timeline text.
    pub text: String,
    /// Replacement calendar list, for calendar fetches only.
    pub events: Option<Vec<CalendarEvent>>,
}

impl Outcome {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            events: None,
        }
    }
}

impl Action {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::SendMessage { .. } => RequestKind::Chat,
            Self::LoadCalendarEvents => RequestKind::CalendarEvents,
            Self::LoadDayPlan => RequestKind::DayPlan,
            Self::LoadProductivityInsights => RequestKind::ProductivityInsights,
        }
    }

    /// Request body, if the endpoint takes one.
    pub fn payload(&self) -> Option<serde_json::Value> {
        match self {
            Self::SendMessage { message } => serde_json::to_value(ChatRequest {
                message: message.clone(),
            })
            .ok(),
            _ => None,
        }
    }

    /// Fixed timeline text when the exchange fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::SendMessage { .. } => "Connection error with backend.",
            Self::LoadCalendarEvents => "Error fetching calendar events.",
            Self::LoadDayPlan => "Error fetching day plan.",
            Self::LoadProductivityInsights => "Error fetching productivity insights.",
        }
    }

    /// Decode a successful body into the action's outcome.
    pub fn report(&self, body: serde_json::Value) -> Result<Outcome, TransportError> {
        let kind = self.kind();
        match self {
            Self::SendMessage { .. } => {
                let reply: ChatResponse = decode(kind, body)?;
                Ok(Outcome::text(reply.response))
            }
            Self::LoadCalendarEvents => {
                let reply: CalendarEventsResponse = decode(kind, body)?;
                Ok(Outcome {
                    text: CALENDAR_LOADED.to_string(),
                    events: Some(reply.events),
                })
            }
            Self::LoadDayPlan => {
                let reply: DayPlanResponse = decode(kind, body)?;
                Ok(Outcome::text(format_day_plan(&reply.day_plan)))
            }
            Self::LoadProductivityInsights => {
                let reply: InsightsResponse = decode(kind, body)?;
                Ok(Outcome::text(format_insights(&reply.insights)))
            }
        }
    }
}

/// `"Day plan:\n"` then each step on its own line, in order.
pub fn format_day_plan(steps: &[String]) -> String {
    format!("Day plan:\n{}", steps.join("\n"))
}

pub fn format_insights(insights: &ProductivityInsights) -> String {
    let per_hour = serde_json::to_string_pretty(&insights.minutes_per_hour)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "Productivity insights:\n\
         Total events: {}\n\
         Total minutes: {}\n\
         Most productive hour: {}\n\
         Minutes per hour:\n{}",
        render_scalar(&insights.total_events),
        render_scalar(&insights.total_minutes),
        render_scalar(&insights.most_productive_hour),
        per_hour
    )
}

/// Strings unquoted, `null` as `n/a`, anything else as JSON.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "n/a".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn chat_payload_and_reply() {
        let action = Action::SendMessage {
            message: "hi".into(),
        };
        assert_eq!(action.payload(), Some(json!({ "message": "hi" })));

        let outcome = action.report(json!({ "response": "Hello!" })).unwrap();
        assert_eq!(outcome.text, "Hello!");
        assert!(outcome.events.is_none());
    }

    #[test]
    fn fetches_have_no_payload() {
        assert!(Action::LoadCalendarEvents.payload().is_none());
        assert!(Action::LoadDayPlan.payload().is_none());
        assert!(Action::LoadProductivityInsights.payload().is_none());
    }

    #[test]
    fn calendar_reports_fixed_text_and_events() {
        let outcome = Action::LoadCalendarEvents
            .report(json!({
                "events": [
                    { "summary": "Standup", "start": { "dateTime": "2024-03-05T09:00:00" } },
                    { "summary": "Lunch", "start": { "date": "2024-03-05" } }
                ]
            }))
            .unwrap();
        assert_eq!(outcome.text, CALENDAR_LOADED);
        assert_eq!(outcome.events.unwrap().len(), 2);
    }

    #[test]
    fn day_plan_joins_steps_in_order() {
        let outcome = Action::LoadDayPlan
            .report(json!({ "day_plan": ["09:00 Standup", "12:00 Lunch"] }))
            .unwrap();
        assert_eq!(outcome.text, "Day plan:\n09:00 Standup\n12:00 Lunch");
    }

    #[test]
    fn empty_day_plan_is_just_header() {
        assert_eq!(format_day_plan(&[]), "Day plan:\n");
    }

    #[test]
    fn insights_template() {
        let outcome = Action::LoadProductivityInsights
            .report(json!({
                "insights": {
                    "total_events": 3,
                    "total_minutes": 150,
                    "most_productive_hour": 9,
                    "minutes_per_hour": { "9": 90, "14": 60 }
                }
            }))
            .unwrap();
        assert_eq!(
            outcome.text,
            "Productivity insights:\n\
             Total events: 3\n\
             Total minutes: 150\n\
             Most productive hour: 9\n\
             Minutes per hour:\n\
             {\n  \"9\": 90,\n  \"14\": 60\n}"
        );
    }

    #[test]
    fn insights_keep_padded_keys_and_float_values() {
        let outcome = Action::LoadProductivityInsights
            .report(json!({
                "insights": {
                    "total_events": 2,
                    "total_minutes": 97.5,
                    "most_productive_hour": "09:00",
                    "minutes_per_hour": { "09": 60, "13": 37.5 }
                }
            }))
            .unwrap();
        assert!(outcome.text.contains("Total minutes: 97.5\n"));
        assert!(outcome.text.contains("Most productive hour: 09:00\n"));
        assert!(
            outcome
                .text
                .ends_with("{\n  \"09\": 60,\n  \"13\": 37.5\n}")
        );
    }

    #[test]
    fn insights_accept_float_hour() {
        let outcome = Action::LoadProductivityInsights
            .report(json!({
                "insights": {
                    "total_events": 1,
                    "total_minutes": 30,
                    "most_productive_hour": 9.0,
                    "minutes_per_hour": { "9": 30 }
                }
            }))
            .unwrap();
        assert!(outcome.text.contains("Most productive hour: 9.0\n"));
    }

    #[test]
    fn insights_without_peak_hour() {
        let outcome = Action::LoadProductivityInsights
            .report(json!({
                "insights": {
                    "total_events": 0,
                    "total_minutes": 0,
                    "most_productive_hour": null,
                    "minutes_per_hour": {}
                }
            }))
            .unwrap();
        assert!(outcome.text.contains("Most productive hour: n/a"));
        assert!(outcome.text.ends_with("Minutes per hour:\n{}"));
    }

    #[test]
    fn malformed_body_is_transport_error() {
        let err = Action::LoadDayPlan
            .report(json!({ "plan": "nope" }))
            .unwrap_err();
        assert_eq!(err.kind, RequestKind::DayPlan);
    }

    #[test]
    fn failure_messages_name_the_action() {
        assert_eq!(
            Action::SendMessage {
                message: "x".into()
            }
            .failure_message(),
            "Connection error with backend."
        );
        assert_eq!(
            Action::LoadCalendarEvents.failure_message(),
            "Error fetching calendar events."
        );
        assert_eq!(
            Action::LoadDayPlan.failure_message(),
            "Error fetching day plan."
        );
        assert_eq!(
            Action::LoadProductivityInsights.failure_message(),
            "Error fetching productivity insights."
        );
    }
}
