//! Calendar projection — the latest fetched events and the selected day.

pub mod model;
pub mod projection;

pub use model::{CalendarEvent, EventStart, parse_day};
pub use projection::{CalendarProjection, CalendarUpdate};
