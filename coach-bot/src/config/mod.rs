//! Bot configuration: BaseConfig (Telegram + log) + CoachConfig (links, web server, premium, timing)
//! + the LLM config from llm-client.

mod base;
mod bot_config;
mod coach;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use coach::CoachConfig;
