//! Smart Assist — client core for a conversational calendar assistant.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod error;
pub mod transport;
