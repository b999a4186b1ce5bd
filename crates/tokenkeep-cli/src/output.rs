//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use tokenkeep::RefreshState;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Human-readable form of a refresh state.
pub fn describe_state(state: RefreshState) -> String {
    match state {
        RefreshState::Idle => "idle (no refresh scheduled)".to_string(),
        RefreshState::Waiting { delay } => {
            format!("waiting {}s until next refresh", delay.as_secs_f64())
        }
        RefreshState::Refreshing => "refreshing".to_string(),
    }
}
