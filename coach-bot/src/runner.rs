//! Wiring: builds the store, LLM client, router and handler chain, then runs the polling REPL
//! alongside the reminder loop and the plan web server.

use anyhow::Result;
use coach_core::{CoachRouter, InMemoryProfileStore, ProfileStore};
use llm_client::{mask_token, LlmClient, LlmConfig, OpenAILlmClient};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot};
use crate::handlers::{CoachHandler, LoggingHandler};
use crate::reminder::run_reminder_loop;
use crate::telegram::{build_teloxide_bot, run_repl, TelegramBotAdapter};
use crate::web;

/// Shared components built from config.
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<dyn ProfileStore>,
    pub llm_client: Arc<dyn LlmClient>,
    pub router: Arc<CoachRouter>,
}

/// OpenAI-backed LLM client configured from `config`.
pub fn build_llm_client(config: &dyn LlmConfig) -> Arc<dyn LlmClient> {
    Arc::new(
        OpenAILlmClient::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_max_tokens(config.max_tokens())
            .with_system_prompt_opt(config.system_prompt().map(String::from)),
    )
}

/// In-memory store with the premium allowlist, the given LLM client, and the router over both.
pub fn build_components(config: &BotConfig, llm_client: Arc<dyn LlmClient>) -> BotComponents {
    let store: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::with_premium_users(
        config.coach.premium_user_ids.iter().cloned(),
    ));
    let router = Arc::new(CoachRouter::new(
        store.clone(),
        llm_client.clone(),
        config.coach.router_config(),
    ));
    BotComponents {
        store,
        llm_client,
        router,
    }
}

/// LoggingHandler → CoachHandler.
pub fn build_handler_chain(components: &BotComponents, bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CoachHandler::new(components.router.clone(), bot)))
}

/// Main entry: validate config, init logging, build components, start the reminder loop and
/// the web server, then run the REPL until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        model = %config.llm.model(),
        llm_base_url = %config.llm.base_url(),
        api_key = %mask_token(config.llm.api_key()),
        base_url = %config.coach.base_url,
        port = config.coach.port,
        premium_users = config.coach.premium_user_ids.len(),
        "Initializing bot"
    );

    let components = build_components(&config, build_llm_client(config.llm_config()));
    let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(&components, bot.clone());

    let reminders = tokio::spawn(run_reminder_loop(
        components.store.clone(),
        bot,
        config.coach.reminder_interval(),
    ));
    let store = components.store.clone();
    let port = config.coach.port;
    let web_server = tokio::spawn(async move {
        if let Err(e) = web::serve(store, port).await {
            error!(error = %e, "Plan web server stopped");
        }
    });

    info!("Bot started successfully");
    let result = run_repl(teloxide_bot, handler_chain).await;

    reminders.abort();
    web_server.abort();
    info!("Bot stopped");
    result
}
