//! Terminal front end.

pub mod command;
pub mod repl;

pub use command::{Command, CommandParser};
pub use repl::run;
