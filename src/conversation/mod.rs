//! Conversation state: the timeline and the busy gate.

pub mod model;
pub mod store;

pub use model::{Sender, TimelineEntry};
pub use store::{BusyGuard, ConversationStore, StoreEvent};
