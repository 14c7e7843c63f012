//! Nullable chat channel — records outbound traffic without sending it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use solvault_chat::{ChatChannel, ChatError, Menu, RenderMode};
use solvault_types::{ChatId, MessageId};

/// Everything a component tried to do to the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    Text {
        chat: ChatId,
        text: String,
        mode: RenderMode,
    },
    Menu {
        chat: ChatId,
        text: String,
        menu: Menu,
        mode: RenderMode,
    },
    Deleted {
        chat: ChatId,
        message: MessageId,
    },
}

/// A test channel that records messages instead of sending them.
pub struct NullChannel {
    outbound: Mutex<Vec<Outbound>>,
    next_message_id: AtomicI64,
}

impl NullChannel {
    pub fn new() -> Self {
        Self {
            outbound: Mutex::new(Vec::new()),
            next_message_id: AtomicI64::new(1),
        }
    }

    /// All recorded operations, in order.
    pub fn sent(&self) -> Vec<Outbound> {
        self.outbound.lock().unwrap().clone()
    }

    /// Text payloads sent to one chat, menus included.
    pub fn texts_for(&self, chat: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Text { chat: c, text, .. } | Outbound::Menu { chat: c, text, .. }
                    if c == chat =>
                {
                    Some(text)
                }
                _ => None,
            })
            .collect()
    }

    /// The last text payload sent to one chat.
    pub fn last_text_for(&self, chat: ChatId) -> Option<String> {
        self.texts_for(chat).pop()
    }

    /// Menus sent to one chat.
    pub fn menus_for(&self, chat: ChatId) -> Vec<(String, Menu)> {
        self.sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Menu {
                    chat: c, text, menu, ..
                } if c == chat => Some((text, menu)),
                _ => None,
            })
            .collect()
    }

    /// Clear all recorded traffic.
    pub fn reset(&self) {
        self.outbound.lock().unwrap().clear();
    }
}

impl Default for NullChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatChannel for NullChannel {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError> {
        self.outbound.lock().unwrap().push(Outbound::Text {
            chat,
            text: text.to_string(),
            mode,
        });
        Ok(MessageId::new(
            self.next_message_id.fetch_add(1, Ordering::SeqCst),
        ))
    }

    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        menu: Menu,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError> {
        self.outbound.lock().unwrap().push(Outbound::Menu {
            chat,
            text: text.to_string(),
            menu,
            mode,
        });
        Ok(MessageId::new(
            self.next_message_id.fetch_add(1, Ordering::SeqCst),
        ))
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), ChatError> {
        self.outbound
            .lock()
            .unwrap()
            .push(Outbound::Deleted { chat, message });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_in_order() {
        let channel = NullChannel::new();
        let chat = ChatId::new(1);

        channel.send_text(chat, "one", RenderMode::Plain).await.unwrap();
        channel
            .send_menu(chat, "two", Menu::new(), RenderMode::Plain)
            .await
            .unwrap();

        assert_eq!(channel.texts_for(chat), vec!["one", "two"]);
        assert_eq!(channel.last_text_for(chat), Some("two".to_string()));
    }

    #[tokio::test]
    async fn traffic_is_scoped_per_chat() {
        let channel = NullChannel::new();
        channel
            .send_text(ChatId::new(1), "mine", RenderMode::Plain)
            .await
            .unwrap();
        assert!(channel.texts_for(ChatId::new(2)).is_empty());
    }
}
