//! Periodic goal reminder loop.

use chrono::Local;
use coach_core::{due_reminders, ProfileStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::core::{Bot, Chat};

/// Delay before the first sweep after startup.
pub const FIRST_SWEEP_DELAY: Duration = Duration::from_secs(10);

/// Runs one sweep at the current local time and sends each due reminder. Returns how many were sent.
pub async fn send_due_reminders(store: &dyn ProfileStore, bot: &dyn Bot) -> usize {
    let reminders = match due_reminders(store, Local::now().time()).await {
        Ok(reminders) => reminders,
        Err(e) => {
            error!(error = %e, "Reminder sweep failed");
            return 0;
        }
    };

    let mut sent = 0;
    for (user_id, text) in reminders {
        let Ok(chat_id) = user_id.parse::<i64>() else {
            warn!(user_id = %user_id, "Skipping reminder for non-numeric user id");
            continue;
        };
        match bot.send_message(&Chat::private(chat_id), &text).await {
            Ok(()) => sent += 1,
            Err(e) => error!(error = %e, user_id = %user_id, "Failed to send reminder"),
        }
    }
    sent
}

/// Sweeps every `interval`, first after [`FIRST_SWEEP_DELAY`]. Runs until the task is dropped.
pub async fn run_reminder_loop(store: Arc<dyn ProfileStore>, bot: Arc<dyn Bot>, interval: Duration) {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + FIRST_SWEEP_DELAY, interval);
    info!(interval_secs = interval.as_secs(), "Reminder loop started");
    loop {
        ticker.tick().await;
        let sent = send_due_reminders(store.as_ref(), bot.as_ref()).await;
        if sent > 0 {
            info!(sent, "Goal reminders sent");
        }
    }
}
