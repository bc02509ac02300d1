//! Action dispatcher — the four user actions and the loop that runs them.

pub mod action;
pub mod assistant;

pub use action::{Action, Outcome};
pub use assistant::{Assistant, ViewState};
