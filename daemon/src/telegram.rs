//! Telegram Bot API adapter.
//!
//! Implements [`ChatChannel`] over the HTTP Bot API and turns long-polled
//! updates into [`InboundEvent`]s for the router. This is the only file
//! that knows Telegram exists; everything behind it speaks the chat
//! abstraction.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use solvault_chat::{ButtonKind, ChatChannel, ChatError, InboundEvent, Menu, RenderMode};
use solvault_types::{ChatId, MessageId};

const API_BASE: &str = "https://api.telegram.org";

/// How much longer than the long-poll window a getUpdates request may take
/// before the HTTP layer gives up on it.
const POLL_GRACE: Duration = Duration::from_secs(10);

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramChannel {
    http: reqwest::Client,
    base: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct Update {
    update_id: i64,
    message: Option<IncomingMessage>,
    callback_query: Option<CallbackQuery>,
}

#[derive(Deserialize)]
struct IncomingMessage {
    message_id: i64,
    chat: Chat,
    text: Option<String>,
}

#[derive(Deserialize)]
struct Chat {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
}

#[derive(Deserialize)]
struct CallbackQuery {
    id: String,
    message: Option<IncomingMessage>,
    data: Option<String>,
}

impl TelegramChannel {
    /// Create an adapter for the given bot token.
    pub fn new(token: &str) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base: format!("{API_BASE}/bot{token}"),
        })
    }

    /// Call one Bot API method and return its `result` payload.
    async fn api_call(
        &self,
        method: &str,
        body: Value,
        timeout: Duration,
    ) -> Result<Value, ChatError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base, method))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("{method} request failed: {e}")))?;

        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Transport(format!("{method}: malformed response: {e}")))?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(ChatError::Api(format!("{method}: {description}")));
        }
        Ok(envelope.result)
    }

    fn message_body(chat: ChatId, text: &str, mode: RenderMode, menu: Option<&Menu>) -> Value {
        let mut body = json!({ "chat_id": chat.raw() });
        match mode {
            RenderMode::Plain => {
                body["text"] = json!(text);
            }
            RenderMode::Monospace => {
                body["text"] = json!(format!("<pre>{}</pre>", html_escape(text)));
                body["parse_mode"] = json!("HTML");
            }
        }
        if let Some(menu) = menu {
            body["reply_markup"] = keyboard_json(menu);
        }
        body
    }

    async fn send(&self, body: Value) -> Result<MessageId, ChatError> {
        let result = self.api_call("sendMessage", body, SEND_TIMEOUT).await?;
        result["message_id"]
            .as_i64()
            .map(MessageId::new)
            .ok_or_else(|| ChatError::Api("sendMessage: missing message_id".to_string()))
    }

    /// Fetch the next batch of updates, long-polling up to `timeout_secs`.
    ///
    /// Advances `offset` past every received update so the same update is
    /// never delivered twice, button presses included: each press is
    /// acknowledged to stop the client-side spinner before being handed to
    /// the router.
    pub async fn next_events(
        &self,
        offset: &mut i64,
        timeout_secs: u64,
    ) -> Result<Vec<InboundEvent>, ChatError> {
        let body = json!({
            "offset": *offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        let timeout = Duration::from_secs(timeout_secs) + POLL_GRACE;
        let result = self.api_call("getUpdates", body, timeout).await?;

        let updates: Vec<Update> = serde_json::from_value(result)
            .map_err(|e| ChatError::Transport(format!("getUpdates: malformed update: {e}")))?;

        let mut events = Vec::new();
        for update in updates {
            *offset = (*offset).max(update.update_id + 1);
            if let Some(query) = &update.callback_query {
                self.answer_callback(&query.id).await;
            }
            if let Some(event) = classify(update) {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn answer_callback(&self, query_id: &str) {
        let body = json!({ "callback_query_id": query_id });
        if let Err(e) = self
            .api_call("answerCallbackQuery", body, SEND_TIMEOUT)
            .await
        {
            tracing::debug!("failed to answer callback query: {e}");
        }
    }
}

#[async_trait]
impl ChatChannel for TelegramChannel {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError> {
        self.send(Self::message_body(chat, text, mode, None)).await
    }

    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        menu: Menu,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError> {
        self.send(Self::message_body(chat, text, mode, Some(&menu)))
            .await
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), ChatError> {
        let body = json!({ "chat_id": chat.raw(), "message_id": message.raw() });
        self.api_call("deleteMessage", body, SEND_TIMEOUT).await?;
        Ok(())
    }
}

/// Turn one update into the router's event shape. Updates with nothing
/// actionable (joins, edits, media) are dropped.
fn classify(update: Update) -> Option<InboundEvent> {
    if let Some(message) = update.message {
        let chat = ChatId::new(message.chat.id);
        let sender = message.chat.username.or(message.chat.first_name);
        let text = message.text?;
        return Some(match command_name(&text) {
            Some(name) => InboundEvent::Command { chat, name, sender },
            None => InboundEvent::Text { chat, text, sender },
        });
    }
    if let Some(query) = update.callback_query {
        let message = query.message?;
        return Some(InboundEvent::ActionPress {
            chat: ChatId::new(message.chat.id),
            message: MessageId::new(message.message_id),
            data: query.data?,
        });
    }
    None
}

/// The command name carried by a "/command@bot args" message, if any.
fn command_name(text: &str) -> Option<String> {
    let rest = text.strip_prefix('/')?;
    let first = rest.split_whitespace().next()?;
    let name = first.split('@').next().unwrap_or(first);
    (!name.is_empty()).then(|| name.to_string())
}

fn keyboard_json(menu: &Menu) -> Value {
    let rows: Vec<Vec<Value>> = menu
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    ButtonKind::Action(action) => {
                        json!({ "text": button.label, "callback_data": action.to_string() })
                    }
                    ButtonKind::Url(url) => json!({ "text": button.label, "url": url }),
                })
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvault_chat::{ActionId, Button};

    #[test]
    fn command_name_strips_slash_mention_and_args() {
        assert_eq!(command_name("/home"), Some("home".to_string()));
        assert_eq!(command_name("/start@solvault_bot"), Some("start".to_string()));
        assert_eq!(command_name("/wallets now please"), Some("wallets".to_string()));
        assert_eq!(command_name("gm"), None);
        assert_eq!(command_name("/"), None);
    }

    #[test]
    fn classify_splits_commands_from_text() {
        let command = Update {
            update_id: 1,
            message: Some(IncomingMessage {
                message_id: 10,
                chat: Chat {
                    id: 42,
                    username: Some("ada".to_string()),
                    first_name: None,
                },
                text: Some("/home".to_string()),
            }),
            callback_query: None,
        };
        assert_eq!(
            classify(command),
            Some(InboundEvent::Command {
                chat: ChatId::new(42),
                name: "home".to_string(),
                sender: Some("ada".to_string()),
            })
        );

        let text = Update {
            update_id: 2,
            message: Some(IncomingMessage {
                message_id: 11,
                chat: Chat {
                    id: 42,
                    username: None,
                    first_name: Some("Ada".to_string()),
                },
                text: Some("gm".to_string()),
            }),
            callback_query: None,
        };
        assert_eq!(
            classify(text),
            Some(InboundEvent::Text {
                chat: ChatId::new(42),
                text: "gm".to_string(),
                sender: Some("Ada".to_string()),
            })
        );
    }

    #[test]
    fn classify_turns_callbacks_into_action_presses() {
        let update = Update {
            update_id: 3,
            message: None,
            callback_query: Some(CallbackQuery {
                id: "q1".to_string(),
                message: Some(IncomingMessage {
                    message_id: 12,
                    chat: Chat {
                        id: 7,
                        username: None,
                        first_name: None,
                    },
                    text: None,
                }),
                data: Some("create_wallet".to_string()),
            }),
        };
        assert_eq!(
            classify(update),
            Some(InboundEvent::ActionPress {
                chat: ChatId::new(7),
                message: MessageId::new(12),
                data: "create_wallet".to_string(),
            })
        );
    }

    #[test]
    fn media_only_updates_are_dropped() {
        let update = Update {
            update_id: 4,
            message: Some(IncomingMessage {
                message_id: 13,
                chat: Chat {
                    id: 7,
                    username: None,
                    first_name: None,
                },
                text: None,
            }),
            callback_query: None,
        };
        assert_eq!(classify(update), None);
    }

    #[test]
    fn keyboard_json_carries_actions_and_urls() {
        let menu = Menu::new()
            .row(vec![
                Button::action("Withdraw", ActionId::Withdraw("pk".to_string())),
                Button::url("Explorer", "https://solscan.io/account/pk"),
            ])
            .row(vec![Button::action("close", ActionId::Close)]);

        let rendered = keyboard_json(&menu);
        assert_eq!(
            rendered["inline_keyboard"][0][0]["callback_data"],
            "withdraw_pk"
        );
        assert_eq!(
            rendered["inline_keyboard"][0][1]["url"],
            "https://solscan.io/account/pk"
        );
        assert_eq!(rendered["inline_keyboard"][1][0]["text"], "close");
    }

    #[test]
    fn monospace_body_wraps_and_escapes() {
        let body = TelegramChannel::message_body(
            ChatId::new(1),
            "keys <&> balances",
            RenderMode::Monospace,
            None,
        );
        assert_eq!(body["parse_mode"], "HTML");
        assert_eq!(body["text"], "<pre>keys &lt;&amp;&gt; balances</pre>");

        let plain = TelegramChannel::message_body(ChatId::new(1), "hi", RenderMode::Plain, None);
        assert!(plain.get("parse_mode").is_none());
    }
}
