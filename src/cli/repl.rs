//! Terminal REPL — stdin/stdout rendering surface over an [`Assistant`].

use std::sync::Arc;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::command::{Command, CommandParser, HELP_TEXT};
use crate::conversation::StoreEvent;
use crate::dispatch::{Action, Assistant};

/// Placeholder shown when the selected day has no events.
pub const NO_EVENTS: &str = "No events for this day.";

/// Run the REPL until EOF or `/quit`.
pub async fn run(assistant: Arc<Assistant>) -> anyhow::Result<()> {
    let printer = spawn_printer(&assistant);

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    eprint!("> ");
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        };

        match CommandParser::parse(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Chat(text) => spawn_action(&assistant, Action::SendMessage { message: text }),
            Command::LoadCalendar => spawn_action(&assistant, Action::LoadCalendarEvents),
            Command::LoadDayPlan => spawn_action(&assistant, Action::LoadDayPlan),
            Command::LoadInsights => spawn_action(&assistant, Action::LoadProductivityInsights),
            Command::SelectDate(date) => {
                assistant.set_selected_date(date).await;
                print_events(&assistant).await;
            }
            Command::SelectToday => {
                assistant.set_selected_date(Local::now().date_naive()).await;
                print_events(&assistant).await;
            }
            Command::ShowEvents => print_events(&assistant).await,
            Command::ShowDays => print_days(&assistant).await,
            Command::Help => println!("{HELP_TEXT}"),
            Command::Invalid(hint) => eprintln!("{hint}"),
        }
        eprint!("> ");
    }

    printer.abort();
    Ok(())
}

/// Actions run in the background so input stays live; the assistant's own
/// busy gate decides whether they are accepted.
fn spawn_action(assistant: &Arc<Assistant>, action: Action) {
    let assistant = Arc::clone(assistant);
    tokio::spawn(async move {
        if !assistant.dispatch(action).await {
            eprintln!("⏳ Still waiting on the previous request; try again shortly.");
        }
    });
}

/// Print timeline entries as they land.
fn spawn_printer(assistant: &Assistant) -> JoinHandle<()> {
    let mut rx = assistant.conversation().subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(StoreEvent::EntryAppended { entry }) => {
                    println!("\n{}\n", entry.display_line());
                }
                Ok(StoreEvent::BusyChanged { busy: true }) => eprintln!("⏳ Waiting for backend..."),
                Ok(StoreEvent::BusyChanged { busy: false }) => eprint!("> "),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Timeline printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

async fn print_events(assistant: &Assistant) {
    let calendar = assistant.calendar();
    let selected = calendar.selected_date().await;
    let events = calendar.events_on_selected_date().await;

    println!("Events on {}:", selected.format("%a %b %d %Y"));
    if events.is_empty() {
        println!("  {NO_EVENTS}");
    }
    for event in &events {
        println!("  {}", event.display_line());
    }
}

async fn print_days(assistant: &Assistant) {
    let days = assistant.calendar().event_day_set().await;
    if days.is_empty() {
        println!("No days with events. Try /calendar first.");
        return;
    }
    let listed: Vec<String> = days.iter().map(|d| d.to_string()).collect();
    println!("Days with events: {}", listed.join(", "));
}
