//! Per-user conversation profile and the plans and goals it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the user is in onboarding. Advanced by the router, never inferred from reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversationState {
    /// Tone not chosen yet.
    #[default]
    New,
    /// Tone chosen, focus area not chosen yet.
    ToneSet,
    /// Both tone and focus area chosen.
    Active,
}

/// Coaching persona, chosen by answering 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    MotivatingFriend,
    StrictMentor,
    RelaxedGuide,
}

impl Tone {
    /// Parses the onboarding answer ("1", "2" or "3").
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::MotivatingFriend),
            "2" => Some(Self::StrictMentor),
            "3" => Some(Self::RelaxedGuide),
            _ => None,
        }
    }

    /// Description embedded in prompts.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MotivatingFriend => "motivating friend",
            Self::StrictMentor => "strict mentor",
            Self::RelaxedGuide => "relaxed guide",
        }
    }
}

/// Life domain the user wants coaching on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    Training,
    Mindset,
    Career,
    Finance,
    Productivity,
}

impl FocusArea {
    /// Parses a focus keyword in English or Swedish; the whole message must be the keyword.
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "training" | "träning" => Some(Self::Training),
            "mindset" => Some(Self::Mindset),
            "career" | "karriär" => Some(Self::Career),
            "finance" | "ekonomi" => Some(Self::Finance),
            "productivity" | "produktivitet" => Some(Self::Productivity),
            _ => None,
        }
    }

    /// Canonical lower-case keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Mindset => "mindset",
            Self::Career => "career",
            Self::Finance => "finance",
            Self::Productivity => "productivity",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated weekly schedule. Identified only by its index in [`Profile::plans`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    /// Seven `Day: activity` lines, Monday first.
    pub content: String,
}

/// A user-stated task with a target time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub task: String,
    /// `HH:MM`, compared as a string against the current local time.
    pub time: String,
    pub done: bool,
}

/// Conversation and subscription state for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub history: String,
    pub is_premium: bool,
    pub state: ConversationState,
    pub tone: Option<Tone>,
    pub focus_area: Option<FocusArea>,
    pub plans: Vec<Plan>,
    pub last_schema_time: Option<DateTime<Utc>>,
    pub last_plan_reference: Option<usize>,
    pub goals: Vec<Goal>,
}

impl Profile {
    /// Empty profile with the given premium flag.
    pub fn new(is_premium: bool) -> Self {
        Self {
            is_premium,
            ..Self::default()
        }
    }

    /// Appends one exchange to the history log.
    pub fn record_exchange(&mut self, message: &str, reply: &str) {
        self.history.push_str("\nUser: ");
        self.history.push_str(message);
        self.history.push_str("\nCoach: ");
        self.history.push_str(reply);
    }

    /// Index of the most recent plan, if any.
    pub fn latest_plan_index(&self) -> Option<usize> {
        self.plans.len().checked_sub(1)
    }

    /// Undone goals.
    pub fn open_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| !g.done)
    }
}
