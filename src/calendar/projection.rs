//! In-memory calendar state with broadcast to the rendering surface.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use super::model::CalendarEvent;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Change notifications for subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalendarUpdate {
    EventsReplaced { count: usize },
    SelectedDateChanged { date: NaiveDate },
}

/// The most recent event list plus the day the user is looking at.
pub struct CalendarProjection {
    events: RwLock<Vec<CalendarEvent>>,
    selected_date: RwLock<NaiveDate>,
    tx: broadcast::Sender<CalendarUpdate>,
}

impl CalendarProjection {
    /// Empty projection with today selected.
    pub fn new() -> Self {
        Self::with_selected_date(Local::now().date_naive())
    }

    pub fn with_selected_date(date: NaiveDate) -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self {
            events: RwLock::new(Vec::new()),
            selected_date: RwLock::new(date),
            tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CalendarUpdate> {
        self.tx.subscribe()
    }

    /// Swap in a freshly fetched list. Nothing from the previous list survives.
    pub async fn replace_events(&self, events: Vec<CalendarEvent>) {
        let count = events.len();
        let undated = events.iter().filter(|e| e.effective_day().is_none()).count();
        {
            let mut current = self.events.write().await;
            *current = events;
        }

        info!(count, undated, "Calendar events replaced");
        let _ = self.tx.send(CalendarUpdate::EventsReplaced { count });
    }

    pub async fn set_selected_date(&self, date: NaiveDate) {
        {
            let mut selected = self.selected_date.write().await;
            *selected = date;
        }
        debug!(%date, "Selected date changed");
        let _ = self.tx.send(CalendarUpdate::SelectedDateChanged { date });
    }

    pub async fn selected_date(&self) -> NaiveDate {
        *self.selected_date.read().await
    }

    /// Every stored event, dated or not, in fetch order.
    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.events.read().await.clone()
    }

    /// Events starting on the selected day, in fetch order. Empty when none match.
    pub async fn events_on_selected_date(&self) -> Vec<CalendarEvent> {
        let selected = self.selected_date().await;
        self.events_on(selected).await
    }

    /// Events starting on `date`, in fetch order.
    pub async fn events_on(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        let events = self.events.read().await;
        events
            .iter()
            .filter(|e| e.effective_day() == Some(date))
            .cloned()
            .collect()
    }

    /// Distinct days that carry at least one event.
    pub async fn event_day_set(&self) -> BTreeSet<NaiveDate> {
        let events = self.events.read().await;
        events.iter().filter_map(CalendarEvent::effective_day).collect()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for CalendarProjection {
    fn default() -> Self {
        Self::new()
    }
}
