//! Terminal front end for the chat widget.
//!
//! Usage: `chat-widget [BASE_URL]` (defaults to `$CHAT_URL` or
//! `http://localhost:3000`). Type a message and press enter; an empty
//! line is ignored, `/quit` or EOF exits.

use marketing_chat::{
    init_tracing,
    message::{ChatMessage, Role},
    widget::{ChatClient, ChatWidget, TYPING_INDICATOR},
};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_URL: &str = "http://localhost:3000";

fn print_bubble(msg: &ChatMessage) {
    match msg.role {
        Role::User => println!("{:>60}", format!("you: {}", msg.content)),
        _ => println!("bot: {}", msg.content),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CHAT_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let client = ChatClient::new(&base_url);

    let mut widget = ChatWidget::new();
    widget.open();
    widget.transcript().iter().for_each(print_bubble);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }
        widget.set_input(line);

        let seen = widget.transcript().len();
        let Some(message) = widget.submit() else {
            continue;
        };
        widget.transcript()[seen..].iter().for_each(print_bubble);

        println!("{TYPING_INDICATOR}");
        let outcome = client.send(&message).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "chat request failed");
        }
        widget.resolve(outcome);

        if let Some(reply) = widget.transcript().last() {
            print_bubble(reply);
        }
    }

    widget.close();
    Ok(())
}
