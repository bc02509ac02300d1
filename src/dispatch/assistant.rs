//! Assistant — runs actions against the backend and folds results into state.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::action::Action;
use crate::calendar::{CalendarEvent, CalendarProjection};
use crate::config::ClientConfig;
use crate::conversation::{ConversationStore, TimelineEntry};
use crate::error::TransportError;
use crate::transport::{Backend, HttpTransport};

/// Everything a rendering surface needs for one repaint.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub timeline: Vec<TimelineEntry>,
    pub busy: bool,
    pub calendar_events: Vec<CalendarEvent>,
    pub selected_date: NaiveDate,
    pub events_on_selected_date: Vec<CalendarEvent>,
    pub event_days: BTreeSet<NaiveDate>,
}

/// Client core for one session.
///
/// At most one action runs at a time. An action invoked while another is in
/// flight is ignored and its method returns `false`.
pub struct Assistant {
    backend: Arc<dyn Backend>,
    conversation: Arc<ConversationStore>,
    calendar: Arc<CalendarProjection>,
}

impl Assistant {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_state(
            backend,
            Arc::new(ConversationStore::new()),
            Arc::new(CalendarProjection::new()),
        )
    }

    /// Assistant over HTTP with fresh session state.
    pub fn from_config(config: &ClientConfig) -> crate::error::Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn with_state(
        backend: Arc<dyn Backend>,
        conversation: Arc<ConversationStore>,
        calendar: Arc<CalendarProjection>,
    ) -> Self {
        Self {
            backend,
            conversation,
            calendar,
        }
    }

    pub fn conversation(&self) -> &Arc<ConversationStore> {
        &self.conversation
    }

    pub fn calendar(&self) -> &Arc<CalendarProjection> {
        &self.calendar
    }

    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy()
    }

    /// Probe the backend. Leaves the timeline and busy flag untouched.
    pub async fn health_check(&self) -> Result<String, TransportError> {
        self.backend.health_check().await
    }

    /// Send user text to the chat endpoint. Blank input is dropped silently.
    pub async fn send_message(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!("Ignoring blank chat input");
            return false;
        }
        self.dispatch(Action::SendMessage {
            message: text.to_string(),
        })
        .await
    }

    pub async fn fetch_calendar_events(&self) -> bool {
        self.dispatch(Action::LoadCalendarEvents).await
    }

    pub async fn fetch_day_plan(&self) -> bool {
        self.dispatch(Action::LoadDayPlan).await
    }

    pub async fn fetch_productivity_insights(&self) -> bool {
        self.dispatch(Action::LoadProductivityInsights).await
    }

    pub async fn set_selected_date(&self, date: NaiveDate) {
        self.calendar.set_selected_date(date).await;
    }

    /// Run one action end to end. Returns whether it was accepted.
    ///
    /// Exactly one assistant entry is appended per accepted action, and the
    /// busy flag is held from before the request until after that append.
    pub async fn dispatch(&self, action: Action) -> bool {
        if matches!(&action, Action::SendMessage { message } if message.trim().is_empty()) {
            return false;
        }

        let Some(_busy) = self.conversation.try_begin() else {
            debug!(kind = %action.kind(), "Busy; ignoring action");
            return false;
        };

        let session_id = self.conversation.session_id();
        let kind = action.kind();

        if let Action::SendMessage { message } = &action {
            self.conversation
                .append(TimelineEntry::user(message.as_str()))
                .await;
        }

        let result = self
            .backend
            .request(kind, action.payload())
            .await
            .and_then(|body| action.report(body));

        match result {
            Ok(outcome) => {
                if let Some(events) = outcome.events {
                    self.calendar.replace_events(events).await;
                }
                info!(session_id = %session_id, kind = %kind, "Action completed");
                self.conversation
                    .append(TimelineEntry::assistant(outcome.text))
                    .await;
            }
            Err(e) => {
                warn!(session_id = %session_id, kind = %kind, reason = %e.reason, "Action failed");
                self.conversation
                    .append(TimelineEntry::assistant(action.failure_message()))
                    .await;
            }
        }

        true
    }

    /// Snapshot of all state a renderer reads.
    pub async fn view(&self) -> ViewState {
        let selected_date = self.calendar.selected_date().await;
        ViewState {
            timeline: self.conversation.entries().await,
            busy: self.conversation.is_busy(),
            calendar_events: self.calendar.events().await,
            selected_date,
            events_on_selected_date: self.calendar.events_on(selected_date).await,
            event_days: self.calendar.event_day_set().await,
        }
    }
}
