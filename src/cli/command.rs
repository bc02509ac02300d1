//! Parses REPL input lines into commands.

use chrono::NaiveDate;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text for the chat endpoint.
    Chat(String),
    LoadCalendar,
    LoadDayPlan,
    LoadInsights,
    SelectDate(NaiveDate),
    SelectToday,
    ShowEvents,
    ShowDays,
    Help,
    Quit,
    /// Recognized command with bad arguments; carries a usage hint.
    Invalid(String),
    Empty,
}

/// Parses user input into [`Command`]s.
pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "/calendar" | "/cal" => Command::LoadCalendar,
            "/plan" | "/dayplan" => Command::LoadDayPlan,
            "/insights" | "/stats" => Command::LoadInsights,
            "/today" => Command::SelectToday,
            "/events" => Command::ShowEvents,
            "/days" => Command::ShowDays,
            "/help" | "/?" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => parse_date_command(trimmed, &lower).unwrap_or_else(|| Command::Chat(line.to_string())),
        }
    }
}

fn parse_date_command(trimmed: &str, lower: &str) -> Option<Command> {
    if lower != "/date" && !lower.starts_with("/date ") {
        return None;
    }
    let arg = trimmed.get("/date".len()..).unwrap_or("").trim();
    if arg.is_empty() {
        return Some(Command::Invalid("Usage: /date YYYY-MM-DD".to_string()));
    }
    Some(match NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
        Ok(date) => Command::SelectDate(date),
        Err(_) => Command::Invalid(format!("Not a date: {arg} (expected YYYY-MM-DD)")),
    })
}

pub const HELP_TEXT: &str = "\
Commands:
  /calendar          Load calendar events
  /plan              Load today's day plan
  /insights          Load productivity insights
  /date YYYY-MM-DD   Select a day
  /today             Select today
  /events            List events on the selected day
  /days              List days that have events
  /help              Show this help
  /quit              Exit
Anything else is sent to the assistant.";
