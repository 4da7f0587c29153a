//! Process runtime: starts the configured surfaces.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::bootstrap::{build_components, build_llm_client, build_submitter, Components};
use crate::adapter::inbound::agent::{
    AgentMessage, AgentRouter, CreatePredictionAction, DepositStrategyAction,
};
#[cfg(feature = "telegram")]
use crate::adapter::inbound::telegram::TelegramBot;
use crate::adapter::inbound::twitter::TwitterListener;
use crate::adapter::outbound::agent::{AgentReplies, AgentReply, CallbackSink};
#[cfg(feature = "telegram")]
use crate::adapter::outbound::telegram::TelegramReplySink;
use crate::adapter::outbound::twitter::TwitterApi;
use crate::application::ReplyDispatcher;
use crate::domain::OriginChannel;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::command::{DepositCommandHandler, MarketCommandHandler};

/// Main application entry point.
pub struct App;

impl App {
    /// Start every enabled surface and run until one of them stops.
    ///
    /// # Errors
    ///
    /// Returns an error if no surface is enabled or a component cannot be built.
    pub async fn run(config: Config) -> Result<()> {
        if !config.twitter.enabled && !config.telegram.enabled {
            return Err(ConfigError::InvalidValue {
                field: "surfaces",
                reason: "enable [twitter] or [telegram] to run".to_string(),
            }
            .into());
        }

        let submitter = build_submitter(&config)?;
        let llm = build_llm_client(&config)?;
        let mut dispatcher = ReplyDispatcher::new();

        let twitter = if config.twitter.enabled {
            let api = TwitterApi::from_config(&config.twitter)?;
            dispatcher.register(OriginChannel::Twitter, Arc::new(api.clone()));
            Some(api)
        } else {
            None
        };

        #[cfg(feature = "telegram")]
        let telegram = match (&config.telegram.token, config.telegram.enabled) {
            (Some(token), true) => {
                let bot = teloxide::Bot::new(token);
                let sink = TelegramReplySink::new(bot.clone());
                dispatcher.register(OriginChannel::Telegram, Arc::new(sink));
                Some(bot)
            }
            _ => None,
        };
        #[cfg(not(feature = "telegram"))]
        if config.telegram.enabled {
            warn!("Telegram enabled but the binary was built without the `telegram` feature");
        }

        let components = build_components(&config, submitter, dispatcher, llm);
        let mut surfaces = JoinSet::new();

        if let Some(api) = twitter {
            let listener = TwitterListener::new(
                api,
                config.twitter.clone(),
                config.agent.handle(),
                Arc::new(components.pipeline.clone()),
                Arc::clone(&components.dispatcher),
            );
            surfaces.spawn(listener.run());
            info!(username = config.agent.handle(), "Twitter surface started");
        }

        #[cfg(feature = "telegram")]
        if let Some(bot) = telegram {
            let telegram = TelegramBot::new(
                bot,
                config.telegram.register_commands,
                Arc::new(components.pipeline.clone()),
                Arc::new(components.deposits.clone()),
            );
            surfaces.spawn(telegram.run());
            info!("Telegram surface started");
        }

        if surfaces.is_empty() {
            warn!("No surface could be started");
            return Ok(());
        }

        if let Some(Err(e)) = surfaces.join_next().await {
            error!(error = %e, "Surface task failed");
        }
        surfaces.shutdown().await;
        Ok(())
    }

    /// Build a local conversational session.
    ///
    /// # Errors
    ///
    /// Returns an error if the submitter or LLM client cannot be built.
    pub fn chat(config: &Config) -> Result<ChatSession> {
        let submitter = build_submitter(config)?;
        let llm = build_llm_client(config)?;
        let (sink, replies) = CallbackSink::channel();
        let dispatcher = ReplyDispatcher::new().with_sink(OriginChannel::Chat, Arc::new(sink));
        Ok(ChatSession::new(
            build_components(config, submitter, dispatcher, llm),
            replies,
        ))
    }
}

/// Conversational surface hosted in-process.
pub struct ChatSession {
    router: AgentRouter,
    replies: AgentReplies,
}

impl ChatSession {
    /// Register the agent actions over `components`.
    ///
    /// Deposit requests are checked first; anything else is treated as a
    /// market request.
    pub fn new(components: Components, replies: AgentReplies) -> Self {
        let deposits: Arc<dyn DepositCommandHandler> = Arc::new(components.deposits.clone());
        let mut deposit_action = DepositStrategyAction::new(deposits);
        if let Some(model) = &components.model {
            deposit_action = deposit_action.with_model(Arc::clone(model));
        }
        let markets: Arc<dyn MarketCommandHandler> = Arc::new(components.chat_pipeline.clone());

        let router = AgentRouter::new()
            .with_action(Arc::new(deposit_action))
            .with_action(Arc::new(CreatePredictionAction::new(markets)));
        Self { router, replies }
    }

    /// Registered action names.
    pub fn actions(&self) -> Vec<&'static str> {
        self.router.names()
    }

    /// Handle one message and collect the replies it produced.
    pub async fn send(&mut self, message: &AgentMessage) -> Vec<AgentReply> {
        self.router.dispatch(message).await;
        self.drain()
    }

    /// Invoke the action called `name` directly.
    ///
    /// Returns `None` when no action has that name or simile.
    pub async fn send_to(
        &mut self,
        name: &str,
        message: &AgentMessage,
    ) -> Option<Vec<AgentReply>> {
        self.router.dispatch_to(name, message).await?;
        Some(self.drain())
    }

    fn drain(&mut self) -> Vec<AgentReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.replies.try_recv() {
            replies.push(reply);
        }
        replies
    }
}
