//! Telegram long-polling dispatcher.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, error, info, warn};

use super::command::{
    bot_commands, command_help, parse_command, CommandParseError, TelegramCommand,
};
use crate::application::extract::parse_deposit;
use crate::domain::{OriginChannel, RawCommand};
use crate::port::inbound::command::{DepositCommandHandler, MarketCommandHandler};

/// Routes Telegram messages to the market and deposit handlers.
#[derive(Clone)]
pub struct TelegramBot {
    bot: Bot,
    register_commands: bool,
    markets: Arc<dyn MarketCommandHandler>,
    deposits: Arc<dyn DepositCommandHandler>,
}

impl TelegramBot {
    pub fn new(
        bot: Bot,
        register_commands: bool,
        markets: Arc<dyn MarketCommandHandler>,
        deposits: Arc<dyn DepositCommandHandler>,
    ) -> Self {
        Self {
            bot,
            register_commands,
            markets,
            deposits,
        }
    }

    /// Poll for updates until the process shuts down.
    pub async fn run(self) {
        if self.register_commands {
            if let Err(e) = register_bot_commands(&self.bot).await {
                warn!(error = %e, "Failed to register bot commands with Telegram");
            }
        }

        info!("Telegram listener started");

        let bot = self.bot.clone();
        teloxide::repl(bot, move |bot: Bot, msg: Message| {
            let router = self.clone();
            async move {
                if let Some(text) = msg.text() {
                    let command =
                        RawCommand::new(text, OriginChannel::Telegram, msg.chat.id.to_string());
                    router.route(&bot, msg.chat.id, command).await;
                }
                respond(())
            }
        })
        .await;
    }

    async fn route(&self, bot: &Bot, chat: ChatId, command: RawCommand) {
        match parse_command(command.text()) {
            Ok(TelegramCommand::Start | TelegramCommand::Help) => {
                if let Err(e) = bot.send_message(chat, command_help()).await {
                    error!(error = %e, "Failed to send Telegram help");
                }
            }
            Ok(TelegramCommand::Create) => {
                let markets = Arc::clone(&self.markets);
                tokio::spawn(async move {
                    markets.handle(command).await;
                });
            }
            Ok(TelegramCommand::Deposit) => {
                let draft = parse_deposit(command.text());
                match self.deposits.handle_deposit(&command, draft).await {
                    Ok(intent) => debug!(
                        strategy = %intent.strategy,
                        amount = %intent.amount,
                        "Telegram deposit acknowledged"
                    ),
                    Err(failure) => debug!(reason = %failure, "Telegram deposit rejected"),
                }
            }
            Err(CommandParseError::NotACommand) => {}
            Err(e) => debug!(error = %e, "Ignoring Telegram message"),
        }
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
