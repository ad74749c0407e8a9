// crates/apogee-cli/src/io/terminal.rs

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::debug;

use apogee_core::{Confirm, ConnectionState, Snapshot, StatusObserver, View};

/// Line-oriented stand-in for the status page.
#[derive(Debug, Default)]
pub struct TerminalView {
    connection: ConnectionState,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_line(&self, snapshot: &Snapshot) -> String {
        format!("connection={} {}", self.connection, snapshot_line(snapshot))
    }
}

impl View for TerminalView {
    fn render(&mut self, snapshot: &Snapshot) {
        println!("{}", snapshot_line(snapshot));
    }
}

impl StatusObserver for TerminalView {
    fn connection_changed(&mut self, state: ConnectionState) {
        self.connection = state;
        println!("connection={state}");
    }
}

pub fn snapshot_line(s: &Snapshot) -> String {
    format!(
        "flight={} apogee={} controls=[{}]",
        s.flight,
        s.apogee_text(),
        s.controls.visible().join(",")
    )
}

/// A decision taken before the view model asks.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, prompt: &str) -> bool {
        debug!(prompt, answer = self.0, "confirmation");
        self.0
    }
}

pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn print_prompt(prompt: &str) {
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
}

/// Blocking y/N prompt on stdin. EOF counts as no.
pub fn ask(prompt: &str) -> anyhow::Result<bool> {
    print_prompt(prompt);
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation from stdin")?;
    Ok(parse_answer(&line))
}
