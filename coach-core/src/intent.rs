//! Keyword classification of incoming messages. All checks are case-insensitive substring
//! matches unless stated otherwise.

use crate::profile::FocusArea;

const SHOW_PLANS_KEYWORDS: [&str; 3] = ["visa planer", "visa lista", "show plans"];
const PLAN_KEYWORDS: [&str; 6] = ["schema", "plan", "skapa", "ge mig", "create", "give"];
const TASK_DONE_KEYWORDS: [&str; 2] = ["jag är klar", "i am done"];
const OFF_TOPIC_KEYWORDS: [&str; 5] = ["politik", "väder", "sport", "weather", "sports"];
const UPDATE_REPLIES: [&str; 2] = ["uppdatera", "update"];
const NEW_REPLIES: [&str; 2] = ["ny", "new"];
const TIME_CUES: [&str; 2] = ["kl", "at"];

/// Shortest message word considered when matching plan names.
const MIN_PLAN_NAME_WORD_LEN: usize = 4;

/// Answer to the "update or new?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanChoice {
    Update,
    New,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|k| text.contains(k))
}

pub fn is_show_plans(text: &str) -> bool {
    contains_any(text, &SHOW_PLANS_KEYWORDS)
}

pub fn is_plan_request(text: &str) -> bool {
    contains_any(text, &PLAN_KEYWORDS)
}

pub fn is_task_done(text: &str) -> bool {
    contains_any(text, &TASK_DONE_KEYWORDS)
}

pub fn is_off_topic(text: &str) -> bool {
    contains_any(text, &OFF_TOPIC_KEYWORDS)
}

/// The whole message must be one of `uppdatera`, `update`, `ny`, `new`.
pub fn plan_choice(text: &str) -> Option<PlanChoice> {
    let text = text.trim().to_lowercase();
    if UPDATE_REPLIES.contains(&text.as_str()) {
        Some(PlanChoice::Update)
    } else if NEW_REPLIES.contains(&text.as_str()) {
        Some(PlanChoice::New)
    } else {
        None
    }
}

/// Lower-cased words of `text` that may name a plan: long enough, not a plan-request keyword
/// and not a focus keyword (every generated name starts with its focus area).
pub fn plan_name_candidates(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| w.chars().count() >= MIN_PLAN_NAME_WORD_LEN)
        .filter(|w| !PLAN_KEYWORDS.iter().any(|k| w.contains(k)))
        .filter(|w| FocusArea::from_keyword(w).is_none())
        .collect()
}

/// True when `kl` or `at` appears as a whole word (e.g. "kl 18", "train at 18:00").
pub fn has_time_cue(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| TIME_CUES.contains(&w))
}
