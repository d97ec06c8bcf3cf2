//! Goal creation and completion from free text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::Goal;

/// Time stored when the message names no parseable time.
pub const DEFAULT_GOAL_TIME: &str = "20:00";

static CLOCK_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("clock time regex is valid")
});

static CUE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:kl|at)\.?\s*(\d{1,2})(?:[:.](\d{2}))?\b").expect("cue time regex is valid")
});

fn format_time(hour: u32, minute: u32) -> Option<String> {
    (hour < 24 && minute < 60).then(|| format!("{:02}:{:02}", hour, minute))
}

/// Parses a time of day from `text`: `18:30` anywhere first, then a time after `kl`/`at`
/// (`kl 7` → `07:00`, `kl 7.30` → `07:30`). A dotted number without a cue ("2.50 km") is not
/// a time. Returns `None` when nothing valid is present.
pub fn parse_goal_time(text: &str) -> Option<String> {
    for caps in CLOCK_TIME_REGEX.captures_iter(text) {
        let hour = caps[1].parse().ok()?;
        let minute = caps[2].parse().ok()?;
        if let Some(time) = format_time(hour, minute) {
            return Some(time);
        }
    }
    let caps = CUE_TIME_REGEX.captures(text)?;
    let hour = caps[1].parse().ok()?;
    let minute = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    format_time(hour, minute)
}

/// A new open goal whose task is the whole message.
pub fn goal_from_message(message: &str) -> Goal {
    Goal {
        task: message.to_string(),
        time: parse_goal_time(message).unwrap_or_else(|| DEFAULT_GOAL_TIME.to_string()),
        done: false,
    }
}

/// Marks done every open goal whose task text occurs in `message` (case-insensitive).
/// Returns how many goals were marked.
pub fn mark_goals_done(goals: &mut [Goal], message: &str) -> usize {
    let message = message.to_lowercase();
    let mut marked = 0;
    for goal in goals.iter_mut().filter(|g| !g.done) {
        if message.contains(&goal.task.to_lowercase()) {
            goal.done = true;
            marked += 1;
        }
    }
    marked
}
