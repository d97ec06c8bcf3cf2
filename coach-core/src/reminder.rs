//! Goal reminders: which open goals are due at a given time of day.

use chrono::NaiveTime;
use tracing::debug;

use crate::error::Result;
use crate::language::detect_language;
use crate::store::ProfileStore;
use crate::translations::{render, translate, MessageKey};

/// Returns `(user_id, text)` for every open goal of every premium profile whose `HH:MM` time
/// is at or before `now`. The text is in the language detected from the profile's history.
///
/// Goals stay open after a reminder, so a due goal is reported on every sweep until completed.
pub async fn due_reminders(store: &dyn ProfileStore, now: NaiveTime) -> Result<Vec<(String, String)>> {
    let now = now.format("%H:%M").to_string();
    let mut reminders = Vec::new();
    for (user_id, profile) in store.all().await? {
        if !profile.is_premium {
            continue;
        }
        let template = translate(detect_language(&profile.history), MessageKey::GoalReminder);
        for goal in profile.open_goals().filter(|g| g.time.as_str() <= now.as_str()) {
            debug!(user_id = %user_id, task = %goal.task, time = %goal.time, "Goal due");
            reminders.push((user_id.clone(), render(template, &[("task", goal.task.as_str())])));
        }
    }
    Ok(reminders)
}
