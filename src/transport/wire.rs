//! JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calendar::CalendarEvent;

/// `POST /chat/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat/` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `GET /calendar/events/` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventsResponse {
    pub events: Vec<CalendarEvent>,
}

/// `GET /day_plan/` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlanResponse {
    pub day_plan: Vec<String>,
}

/// `GET /productivity_insights/` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: ProductivityInsights,
}

/// Aggregate productivity figures computed by the backend.
///
/// Values are kept as the backend sent them; the client only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityInsights {
    pub total_events: Value,
    pub total_minutes: Value,
    /// `null` when the backend had no events to rank.
    #[serde(default)]
    pub most_productive_hour: Value,
    /// Hour key to minutes scheduled in that hour, in backend order.
    #[serde(default)]
    pub minutes_per_hour: Map<String, Value>,
}

/// `GET /` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
