//! # Coach core
//!
//! Transport-agnostic life-coach domain: per-user profiles with an explicit
//! conversation state, weekly plans and goals, bilingual (sv/en) reply
//! templates, and the [`CoachRouter`] that turns an incoming message into a
//! reply, calling the LLM through [`llm_client::LlmClient`] when needed.
//!
//! The Telegram delivery layer lives in the `coach-bot` crate.

pub mod error;
pub mod goals;
pub mod intent;
pub mod language;
pub mod plan;
pub mod profile;
pub mod reminder;
pub mod router;
pub mod store;
pub mod translations;

pub use error::{CoachError, Result};
pub use language::{detect_language, Language};
pub use plan::{extract_schedule, find_plan_by_name, generate_plan_name, plans_are_similar};
pub use profile::{ConversationState, FocusArea, Goal, Plan, Profile, Tone};
pub use reminder::due_reminders;
pub use router::{plan_url, CoachRouter, RouterConfig};
pub use store::{InMemoryProfileStore, ProfileStore};
pub use translations::{render, translate, MessageKey};
