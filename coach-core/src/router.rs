//! # Response router
//!
//! [`CoachRouter::respond`] turns one incoming message into one reply. It loads the user's
//! profile, advances the onboarding state, picks a branch (show plans, plan request, task
//! done, off-topic, general chat), calls the LLM when the branch needs it, post-processes
//! the reply (plan extraction, goals) and writes the profile back with the exchange appended
//! to its history.
//!
//! Requests for the same user are serialized by a per-user lock; different users run
//! concurrently.

use chrono::{Duration, Utc};
use llm_client::LlmClient;
use prompt::CoachingStyle;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::error::Result;
use crate::goals::{goal_from_message, mark_goals_done};
use crate::intent::{self, PlanChoice};
use crate::language::{detect_language, Language};
use crate::plan::{extract_schedule, find_plan_by_name, generate_plan_name, plans_are_similar};
use crate::profile::{ConversationState, FocusArea, Plan, Profile, Tone};
use crate::store::ProfileStore;
use crate::translations::{render, translate, MessageKey};

/// Default link base for plan URLs.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Default window in which a repeated plan request returns the latest plan instead of a new one.
pub const DEFAULT_PLAN_COOLDOWN_SECS: i64 = 300;
/// Default number of trailing history characters embedded in prompts.
pub const DEFAULT_HISTORY_MAX_CHARS: usize = 2000;

/// Router settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Base of generated plan links, without trailing slash.
    pub base_url: String,
    pub plan_cooldown: Duration,
    /// 0 embeds the whole history.
    pub history_max_chars: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            plan_cooldown: Duration::seconds(DEFAULT_PLAN_COOLDOWN_SECS),
            history_max_chars: DEFAULT_HISTORY_MAX_CHARS,
        }
    }
}

/// Link to plan `index` of `user_id`: `{base_url}/user/{user_id}/plan/{index}`.
pub fn plan_url(base_url: &str, user_id: &str, index: usize) -> String {
    format!(
        "{}/user/{}/plan/{}",
        base_url.trim_end_matches('/'),
        user_id,
        index
    )
}

/// Which branch produced a reply; logged and used to decide on the goal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Onboarding,
    FocusQuestion,
    ShowPlans,
    Plan,
    TaskDone,
    OffTopic,
    General,
}

impl Branch {
    /// Branches whose LLM reply is followed by goal creation / completion.
    fn tracks_goals(self) -> bool {
        matches!(
            self,
            Self::Onboarding | Self::FocusQuestion | Self::TaskDone | Self::General
        )
    }
}

/// Per-message context shared by the branch helpers.
struct Turn<'a> {
    user_id: &'a str,
    message: &'a str,
    lang: Language,
}

impl Turn<'_> {
    fn text(&self, key: MessageKey) -> &'static str {
        translate(self.lang, key)
    }
}

/// Routes messages to canned replies or the LLM and keeps profiles up to date.
pub struct CoachRouter {
    store: Arc<dyn ProfileStore>,
    llm: Arc<dyn LlmClient>,
    config: RouterConfig,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CoachRouter {
    pub fn new(store: Arc<dyn ProfileStore>, llm: Arc<dyn LlmClient>, config: RouterConfig) -> Self {
        Self {
            store,
            llm,
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Produces the reply to `message` from `user_id` and records the exchange.
    ///
    /// LLM failures are answered with a templated apology; only store errors are returned.
    #[instrument(skip(self, message))]
    pub async fn respond(&self, user_id: &str, message: &str) -> Result<String> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.store.get_or_create(user_id).await?;
        let turn = Turn {
            user_id,
            message,
            lang: detect_language(message),
        };
        info!(
            state = ?profile.state,
            is_premium = profile.is_premium,
            lang = turn.lang.code(),
            "Routing message"
        );

        let (branch, mut reply, llm_ok) = self.route(&turn, &mut profile).await;
        if llm_ok && branch.tracks_goals() {
            Self::track_goals(&turn, &mut profile, &mut reply);
        }
        info!(branch = ?branch, reply_len = reply.len(), "Reply ready");

        profile.record_exchange(message, &reply);
        self.store.update(user_id, profile).await?;
        Ok(reply)
    }

    /// Returns the branch taken, the reply, and whether any LLM call in it succeeded (or none was made).
    async fn route(&self, turn: &Turn<'_>, profile: &mut Profile) -> (Branch, String, bool) {
        match profile.state {
            ConversationState::New => {
                if let Some(tone) = Tone::from_choice(turn.message) {
                    profile.tone = Some(tone);
                    profile.state = ConversationState::ToneSet;
                    debug!(tone = ?tone, "Tone chosen");
                    let prompt = self.focus_prompt(turn, profile);
                    let (reply, ok) = self.ask(turn, prompt).await;
                    return (Branch::FocusQuestion, reply, ok);
                }
                let prompt = prompt::onboarding_prompt(self.history(profile), turn.message);
                let (reply, ok) = self.ask(turn, prompt).await;
                return (Branch::Onboarding, reply, ok);
            }
            ConversationState::ToneSet => match FocusArea::from_keyword(turn.message) {
                Some(focus) => {
                    profile.focus_area = Some(focus);
                    profile.state = ConversationState::Active;
                    debug!(focus_area = %focus, "Focus area chosen");
                }
                None => {
                    let prompt = self.focus_prompt(turn, profile);
                    let (reply, ok) = self.ask(turn, prompt).await;
                    return (Branch::FocusQuestion, reply, ok);
                }
            },
            ConversationState::Active => {}
        }
        self.route_active(turn, profile).await
    }

    async fn route_active(&self, turn: &Turn<'_>, profile: &mut Profile) -> (Branch, String, bool) {
        let message = turn.message;

        if intent::is_show_plans(message) {
            return (Branch::ShowPlans, self.list_plans(turn, profile), true);
        }

        let choice = intent::plan_choice(message).filter(|_| profile.last_plan_reference.is_some());
        if intent::is_plan_request(message) || choice.is_some() {
            if !profile.is_premium {
                return (Branch::Plan, turn.text(MessageKey::PremiumRequired).to_string(), true);
            }
            let (reply, ok) = self.plan(turn, profile, choice).await;
            return (Branch::Plan, reply, ok);
        }

        if intent::is_task_done(message) && profile.is_premium {
            let prompt = prompt::task_done_prompt(style(profile), self.history(profile), message);
            let (reply, ok) = self.ask(turn, prompt).await;
            return (Branch::TaskDone, reply, ok);
        }

        if intent::is_off_topic(message) {
            return (Branch::OffTopic, turn.text(MessageKey::OffTopic).to_string(), true);
        }

        let prompt = prompt::general_prompt(style(profile), self.history(profile), message);
        let (reply, ok) = self.ask(turn, prompt).await;
        (Branch::General, reply, ok)
    }

    fn list_plans(&self, turn: &Turn<'_>, profile: &Profile) -> String {
        if profile.plans.is_empty() {
            return turn.text(MessageKey::NoPlans).to_string();
        }
        let mut reply = format!("{}\n", turn.text(MessageKey::ShowPlans));
        for (index, plan) in profile.plans.iter().enumerate() {
            reply.push_str(&format!(
                "{}\n{}{}\n",
                plan.name,
                turn.text(MessageKey::PlanLink),
                self.url(turn, index)
            ));
        }
        reply
    }

    /// Premium plan branch: name lookup, update/new resolution, cooldown, then generation.
    async fn plan(
        &self,
        turn: &Turn<'_>,
        profile: &mut Profile,
        choice: Option<PlanChoice>,
    ) -> (String, bool) {
        if choice.is_none() {
            let referenced = intent::plan_name_candidates(turn.message)
                .iter()
                .find_map(|word| find_plan_by_name(&profile.plans, word));
            if let Some(index) = referenced {
                profile.last_plan_reference = Some(index);
                let reply = render(
                    turn.text(MessageKey::UpdateOrNew),
                    &[
                        ("name", profile.plans[index].name.as_str()),
                        ("url", self.url(turn, index).as_str()),
                    ],
                );
                return (reply, true);
            }

            if let (Some(latest), Some(created)) = (profile.latest_plan_index(), profile.last_schema_time) {
                if Utc::now() - created < self.config.plan_cooldown {
                    debug!(latest, "Plan requested within cooldown");
                    profile.last_plan_reference = Some(latest);
                    let reply = format!(
                        "{}\n{}\n{}{}",
                        turn.text(MessageKey::NewPlanPrompt),
                        turn.text(MessageKey::PlanCreated),
                        turn.text(MessageKey::PlanLink),
                        self.url(turn, latest)
                    );
                    return (reply, true);
                }
            }
        }

        let base = match choice {
            Some(PlanChoice::Update) => profile
                .last_plan_reference
                .and_then(|index| profile.plans.get(index)),
            _ => None,
        };
        let request = match base {
            Some(plan) => format!(
                "{}\nUpdate this plan ({}):\n{}",
                turn.message, plan.name, plan.content
            ),
            None => turn.message.to_string(),
        };
        let prompt = prompt::plan_prompt(style(profile), self.history(profile), &request);
        let (llm_reply, ok) = self.ask(turn, prompt).await;
        if !ok {
            return (llm_reply, false);
        }
        (self.store_plan(turn, profile, &llm_reply), true)
    }

    /// Extracts the schedule from an LLM reply and records it as a new plan unless it repeats the latest one.
    fn store_plan(&self, turn: &Turn<'_>, profile: &mut Profile, llm_reply: &str) -> String {
        let Some(schedule) = extract_schedule(llm_reply) else {
            info!("No schedule found in LLM reply");
            return turn.text(MessageKey::ErrorGenerating).to_string();
        };
        let candidate = Plan {
            name: String::new(),
            content: schedule,
        };

        if let Some((latest, plan)) = profile.plans.iter().enumerate().last() {
            if plans_are_similar(plan, &candidate) {
                profile.last_schema_time = Some(Utc::now());
                profile.last_plan_reference = Some(latest);
                return render(
                    turn.text(MessageKey::SamePlan),
                    &[("name", plan.name.as_str()), ("url", self.url(turn, latest).as_str())],
                );
            }
        }

        let plan = Plan {
            name: generate_plan_name(&candidate.content, style(profile).focus_area),
            content: candidate.content,
        };
        let index = profile.plans.len();
        info!(index, name = %plan.name, "Plan created");
        let reply = format!(
            "{}\n{}\n{}{}",
            plan.content,
            turn.text(MessageKey::PlanCreated),
            turn.text(MessageKey::PlanLink),
            self.url(turn, index)
        );
        profile.plans.push(plan);
        profile.last_schema_time = Some(Utc::now());
        profile.last_plan_reference = Some(index);
        reply
    }

    /// Creates a goal from a time cue, or completes goals on a task-done message. Premium only.
    fn track_goals(turn: &Turn<'_>, profile: &mut Profile, reply: &mut String) {
        if !profile.is_premium {
            return;
        }
        // Done first: a goal's task carries its own time cue, so repeating it must not add a goal.
        if intent::is_task_done(turn.message) {
            let marked = mark_goals_done(&mut profile.goals, turn.message);
            if marked > 0 {
                info!(marked, "Goals completed");
                reply.push('\n');
                reply.push_str(turn.text(MessageKey::GoalDone));
            }
        } else if intent::has_time_cue(turn.message) {
            let goal = goal_from_message(turn.message);
            info!(time = %goal.time, "Goal added");
            profile.goals.push(goal);
        }
    }

    fn focus_prompt(&self, turn: &Turn<'_>, profile: &Profile) -> String {
        prompt::focus_prompt(self.history(profile), turn.message)
    }

    fn history<'p>(&self, profile: &'p Profile) -> &'p str {
        prompt::truncate_history(&profile.history, self.config.history_max_chars)
    }

    fn url(&self, turn: &Turn<'_>, index: usize) -> String {
        plan_url(&self.config.base_url, turn.user_id, index)
    }

    /// One LLM call. On failure logs the error chain and returns the apology template with `false`.
    async fn ask(&self, turn: &Turn<'_>, prompt: String) -> (String, bool) {
        match self
            .llm
            .get_llm_response_with_messages(prompt::as_messages(prompt))
            .await
        {
            Ok(reply) => (reply, true),
            Err(e) => {
                log_error_chain(&e, "LLM request failed");
                (turn.text(MessageKey::RequestFailed).to_string(), false)
            }
        }
    }
}

/// Tone and focus for prompts; falls back to neutral wording if either is missing.
fn style(profile: &Profile) -> CoachingStyle<'static> {
    CoachingStyle {
        tone: profile
            .tone
            .map(|t| t.description())
            .unwrap_or(Tone::MotivatingFriend.description()),
        focus_area: profile.focus_area.map(|f| f.as_str()).unwrap_or("general"),
    }
}

/// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            error!(cause = %cause, "{}", first_msg);
        } else {
            error!(cause = %cause, "Caused by");
        }
    }
}
