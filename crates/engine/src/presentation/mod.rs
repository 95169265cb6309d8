//! Terminal presentation: pure renderers plus the stdin loop that drives them.

pub mod console;
pub mod render;

pub use console::{Console, ConsoleCommand};
pub use render::{input_prompt, render_header, render_status, render_transcript};
