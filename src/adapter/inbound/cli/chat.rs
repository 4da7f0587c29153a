//! Handler for the `chat` command: a stdin loop over the agent actions.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::adapter::inbound::agent::AgentMessage;
use crate::adapter::inbound::cli::command::ChatArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::App;

/// Read one message per line and print the replies until EOF or `/quit`.
pub async fn execute(args: &ChatArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.init_logging();
    let mut session = App::chat(&config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Room", &args.room);
    output::field("Actions", session.actions().join(", "));
    output::hint("type a message, /action NAME text to pick an action, or /quit to leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("/quit") {
            break;
        }

        let replies = if let Some(rest) = text.strip_prefix("/action ") {
            let (name, body) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
            match session.send_to(name, &AgentMessage::new(&args.room, body.trim())).await {
                Some(replies) => replies,
                None => {
                    output::warning(&format!("unknown action {name}"));
                    continue;
                }
            }
        } else {
            session.send(&AgentMessage::new(&args.room, text)).await
        };
        if replies.is_empty() {
            output::warning("no reply");
        }
        for reply in replies {
            output::reply("marketcast", &reply.reply.text, &reply.reply.content);
        }
    }
    Ok(())
}
