//! # Chat Shell
//!
//! File: cli/src/commands/chat/repl.rs
//!
//! ## Overview
//!
//! The terminal front end for a practice session. It reads one message per
//! line, hands it to the response provider and shows the reply after the
//! simulated typing delay. Lines starting with `/` are shell commands.
//!
//! Input and output are generic so tests can drive the shell with an
//! in-memory script.
//!
use super::transcript;
use super::typing::{TypingDelay, Typist};
use crate::core::error::Result;
use crate::dialogue::SessionSnapshot;
use crate::provider::ResponseProvider;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const HELP: &str = "Commands:\n  /clear        start over (drops replies still being typed)\n  /state        show interview progress\n  /save <file>  write the transcript as JSON\n  /help         show this help\n  /quit         leave the chat";

/// What a submitted line asks the shell to do.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Message(&'a str),
    Clear,
    State,
    Save(&'a str),
    Help,
    Quit,
    Unknown(&'a str),
}

/// `None` for blank lines, which are never submitted.
fn parse_line(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Message(line));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    Some(match name {
        "clear" | "reset" => Command::Clear,
        "state" | "status" => Command::State,
        "save" if !arg.is_empty() => Command::Save(arg),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line),
    })
}

pub struct ChatShell {
    provider: Box<dyn ResponseProvider>,
    delay: TypingDelay,
}

impl ChatShell {
    pub fn new(provider: Box<dyn ResponseProvider>, delay: TypingDelay) -> Self {
        Self { provider, delay }
    }

    /// Runs until `/quit` or end of input. Replies still being typed at end
    /// of input are shown; after `/quit` they are dropped.
    pub async fn run<I, O>(mut self, input: I, mut out: O) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: Write,
    {
        let (reply_tx, mut replies) = mpsc::unbounded_channel();
        let (typist, handle) = Typist::spawn(reply_tx);

        writeln!(out, "Interview coach ({} provider). Type /help for commands.", self.provider.name())?;
        let welcome = self.provider.welcome().await;
        self.schedule(&typist, welcome);

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("end of input");
                        break;
                    };
                    let Some(command) = parse_line(&line) else {
                        continue;
                    };
                    if !self.execute(command, &typist, &mut out).await? {
                        typist.cancel_pending();
                        break;
                    }
                }
                Some(reply) = replies.recv() => {
                    writeln!(out, "Coach: {reply}\n")?;
                    out.flush()?;
                }
            }
        }

        drop(typist);
        while let Some(reply) = replies.recv().await {
            writeln!(out, "Coach: {reply}\n")?;
        }
        out.flush()?;
        if let Err(e) = handle.await {
            warn!("Typist task ended abnormally: {}", e);
        }
        info!("Chat session finished.");
        Ok(())
    }

    fn schedule(&self, typist: &Typist, reply: String) {
        let delay = self.delay.for_reply(&reply);
        debug!(delay_ms = delay.as_millis() as u64, "scheduling reply");
        typist.schedule(reply, delay);
    }

    /// Returns `false` when the shell should stop.
    async fn execute<O: Write>(&mut self, command: Command<'_>, typist: &Typist, out: &mut O) -> Result<bool> {
        match command {
            Command::Message(text) => {
                let reply = self.provider.respond(text).await;
                self.schedule(typist, reply);
            }
            Command::Clear => {
                typist.cancel_pending();
                let welcome = self.provider.reset().await;
                writeln!(out, "(conversation cleared)")?;
                self.schedule(typist, welcome);
            }
            Command::State => {
                let snapshot = SessionSnapshot::from(self.provider.context());
                writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
            }
            Command::Save(path) => match transcript::save(Path::new(path), &self.provider.context().history) {
                Ok(()) => writeln!(out, "(transcript saved to {path})")?,
                Err(e) => {
                    warn!("Saving transcript failed: {:?}", e);
                    writeln!(out, "(could not save transcript: {e})")?;
                }
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Unknown(line) => writeln!(out, "Unknown command: {line}. Type /help for commands.")?,
        }
        out.flush()?;
        Ok(true)
    }
}
