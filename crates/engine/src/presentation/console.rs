//! Line-oriented terminal front end.
//!
//! Reads player actions one line at a time, drives the orchestrator, and
//! prints whatever changed.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use wanderer_domain::RejectReason;

use super::render::{
    input_prompt, render_header, render_status, render_transcript, render_turns,
    INITIALIZING_INDICATOR, LOADING_INDICATOR, RESTART_HINT,
};
use crate::use_cases::{SubmitOutcome, TurnOrchestrator};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Restart,
    Quit,
    Submit(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/restart" | "/play-again" => Self::Restart,
            "/quit" => Self::Quit,
            _ => Self::Submit(line.to_string()),
        }
    }
}

pub struct Console {
    orchestrator: Arc<TurnOrchestrator>,
}

impl Console {
    pub fn new(orchestrator: Arc<TurnOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Play a session until `/quit` or end of input.
    pub async fn run<R, W>(&self, input: R, output: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut shown = self.restart(output).await?;
        self.prompt(output).await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match ConsoleCommand::parse(&line) {
                ConsoleCommand::Quit => break,
                ConsoleCommand::Restart => {
                    shown = self.restart(output).await?;
                }
                ConsoleCommand::Submit(action) => {
                    shown = self.submit(&action, shown, output).await?;
                }
            }
            self.prompt(output).await?;
        }

        tracing::info!("Console closed");
        Ok(())
    }

    /// Start a fresh session and print it from the top. Returns the number
    /// of turns now on screen.
    async fn restart<W>(&self, output: &mut W) -> std::io::Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        write(output, &format!("{INITIALIZING_INDICATOR}\n")).await?;
        if let SubmitOutcome::Rejected(reason) = self.orchestrator.start_session().await {
            tracing::debug!(reason = %reason, "Restart ignored");
        }

        let state = self.orchestrator.snapshot().await;
        let screen = format!(
            "\n{}\n{}{}",
            render_header(&state),
            render_transcript(&state),
            render_status(&state)
        );
        write(output, &screen).await?;
        Ok(state.turns().len())
    }

    /// Submit one action and print the turns it added.
    async fn submit<W>(&self, action: &str, shown: usize, output: &mut W) -> std::io::Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        if action.trim().is_empty() {
            return Ok(shown);
        }

        write(output, &format!("{LOADING_INDICATOR}\n")).await?;
        let outcome = self.orchestrator.submit(action).await;
        let state = self.orchestrator.snapshot().await;

        let mut screen = String::new();
        match outcome {
            SubmitOutcome::Rejected(RejectReason::GameOver) => {
                screen.push_str(&format!("{RESTART_HINT}\n"));
            }
            SubmitOutcome::Rejected(reason) => {
                tracing::debug!(reason = %reason, "Submission ignored");
            }
            SubmitOutcome::Committed(_) | SubmitOutcome::Failed(_) => {
                let new_turns = state.turns().get(shown..).unwrap_or_default();
                if !new_turns.is_empty() {
                    screen.push_str(&format!("\n{}", render_header(&state)));
                }
                screen.push_str(&render_turns(new_turns));
                screen.push_str(&render_status(&state));
            }
        }
        write(output, &screen).await?;

        Ok(state.turns().len())
    }

    async fn prompt<W>(&self, output: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let state = self.orchestrator.snapshot().await;
        write(output, &format!("\n{}\n> ", input_prompt(&state))).await
    }
}

async fn write<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
