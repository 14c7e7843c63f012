//! Outbound chat operations.

use async_trait::async_trait;
use solvault_types::{ChatId, MessageId};

use crate::{ChatError, Menu};

/// How a text payload should be rendered by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Plain,
    /// Fixed-width rendering, used for key material and balances.
    Monospace,
}

/// Everything the core is allowed to do to a conversation.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Send a text message.
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError>;

    /// Send a text message with a menu of labeled actions attached.
    async fn send_menu(
        &self,
        chat: ChatId,
        text: &str,
        menu: Menu,
        mode: RenderMode,
    ) -> Result<MessageId, ChatError>;

    /// Delete a previously sent message.
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<(), ChatError>;
}
