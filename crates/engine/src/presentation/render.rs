//! Terminal rendering of the conversation.
//!
//! Every function here is a pure function of `ConversationState`; the console
//! decides when to print what.

use wanderer_domain::{ConversationState, Turn};

pub const TITLE: &str = "Hogwarts: Midnight Wanderer";

/// Column player turns are right-aligned to.
pub const TRANSCRIPT_WIDTH: usize = 72;

pub const LOADING_INDICATOR: &str = "Casting a vision...";
pub const INITIALIZING_INDICATOR: &str = "Initializing Magic...";
pub const RESTART_HINT: &str = "Type /restart to play again.";

const IN_PROGRESS_PROMPT: &str = "What do you do?";
const FINISHED_PROMPT: &str = "The adventure is over.";

/// Title, current location (when known) and the scene picture line.
pub fn render_header(state: &ConversationState) -> String {
    let mut out = format!("{TITLE}\n{}\n", "=".repeat(TITLE.len()));
    if !state.current_location().is_empty() {
        out.push_str(&format!("Location: {}\n", state.current_location()));
    }
    out.push_str(&render_scene_picture(state));
    out.push('\n');
    out
}

fn render_scene_picture(state: &ConversationState) -> String {
    match state.latest_image() {
        Some(image) => format!(
            "[Scene vision: {}, ~{} KB]",
            image.mime_type(),
            image.approx_byte_len().div_ceil(1024)
        ),
        None if state.is_loading() => format!("[{INITIALIZING_INDICATOR}]"),
        None => "[No vision yet]".to_string(),
    }
}

/// The whole narrative log.
pub fn render_transcript(state: &ConversationState) -> String {
    render_turns(state.turns())
}

/// A run of turns: player actions right-aligned behind a `>` marker,
/// narration as plain paragraphs.
pub fn render_turns(turns: &[Turn]) -> String {
    let mut out = String::new();
    for turn in turns {
        if turn.is_player_input() {
            let line = format!("> {}", turn.text());
            out.push_str(&format!("{line:>TRANSCRIPT_WIDTH$}\n\n"));
        } else {
            out.push_str(turn.text());
            out.push_str("\n\n");
        }
    }
    out
}

/// Loading indicator, error line and game-over panel, whichever apply.
pub fn render_status(state: &ConversationState) -> String {
    let mut out = String::new();

    if state.is_loading() {
        out.push_str(LOADING_INDICATOR);
        out.push('\n');
    }
    if let Some(error) = state.last_error() {
        out.push_str(&format!("Error: {error}\n"));
    }
    if state.is_game_over() {
        out.push_str(&render_game_over_panel(state.game_over_reason()));
    }

    out
}

fn render_game_over_panel(reason: &str) -> String {
    let rule = "*".repeat(TRANSCRIPT_WIDTH);
    format!("{rule}\n{:^TRANSCRIPT_WIDTH$}\n{reason}\n{RESTART_HINT}\n{rule}\n", "Game Over")
}

pub fn input_prompt(state: &ConversationState) -> &'static str {
    if state.is_game_over() {
        FINISHED_PROMPT
    } else {
        IN_PROGRESS_PROMPT
    }
}
