//! Weekly plan helpers: schedule extraction, naming, similarity, and lookup by name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::Plan;

/// Seven consecutive day lines, Monday to Sunday; blank lines and indentation between them are tolerated.
static SCHEDULE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Mån:[^\n]*\n\s*Tis:[^\n]*\n\s*Ons:[^\n]*\n\s*Tor:[^\n]*\n\s*Fre:[^\n]*\n\s*Lör:[^\n]*\n\s*Sön:[^\n]*")
        .expect("schedule regex is valid")
});

static ACTIVITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Mån|Tis|Ons|Tor|Fre|Lör|Sön): ([^\n]+)").expect("activity regex is valid")
});

/// Text the LLM sometimes appends after a schedule; ignored when comparing plans.
pub const PLAN_MARKER: &str = "Här är ditt schema:";

/// Extracts the 7-line schedule from an LLM reply and normalizes it (lines trimmed, blank lines dropped).
/// Returns `None` when the reply has no complete Monday–Sunday block.
pub fn extract_schedule(reply: &str) -> Option<String> {
    let reply = reply.replace("\r\n", "\n");
    let block = SCHEDULE_REGEX.find(&reply)?;
    let normalized = block
        .as_str()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Some(normalized)
}

/// First character upper-case, the rest lower-case.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Derives a display name from a schedule: `"{Focus} - {first} och {second}"` using the first two
/// distinct activities in week order, or `"{Focus} Basplan"` when no activity can be extracted.
pub fn generate_plan_name(schedule: &str, focus_area: &str) -> String {
    let mut activities: Vec<&str> = Vec::new();
    for caps in ACTIVITY_REGEX.captures_iter(schedule) {
        if let Some(activity) = caps.get(1).map(|m| m.as_str().trim()) {
            if !activity.is_empty() && !activities.contains(&activity) {
                activities.push(activity);
            }
        }
        if activities.len() == 2 {
            break;
        }
    }

    let focus = capitalize(focus_area);
    if activities.is_empty() {
        return format!("{} Basplan", focus);
    }
    format!("{} - {}", focus, capitalize(&activities.join(" och ")))
}

fn comparable_content(plan: &Plan) -> &str {
    plan.content
        .split(PLAN_MARKER)
        .next()
        .unwrap_or_default()
        .trim()
}

/// Two plans are similar when their contents match after cutting at [`PLAN_MARKER`] and trimming.
/// Names are ignored.
pub fn plans_are_similar(a: &Plan, b: &Plan) -> bool {
    comparable_content(a) == comparable_content(b)
}

/// Index of the most recent plan whose name contains `word` (case-insensitive).
pub fn find_plan_by_name(plans: &[Plan], word: &str) -> Option<usize> {
    let word = word.to_lowercase();
    plans
        .iter()
        .rposition(|plan| plan.name.to_lowercase().contains(&word))
}
