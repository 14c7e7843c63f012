//! Inbound chat events, as delivered by the transport adapter.

use solvault_types::{ChatId, MessageId};

/// One event from the conversation, already classified by the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// A slash command, name without the leading slash.
    Command {
        chat: ChatId,
        name: String,
        sender: Option<String>,
    },
    /// Free-form text.
    Text {
        chat: ChatId,
        text: String,
        sender: Option<String>,
    },
    /// A button press carrying its raw action data.
    ActionPress {
        chat: ChatId,
        message: MessageId,
        data: String,
    },
}

impl InboundEvent {
    /// The chat this event belongs to.
    pub fn chat(&self) -> ChatId {
        match self {
            Self::Command { chat, .. } | Self::Text { chat, .. } | Self::ActionPress { chat, .. } => {
                *chat
            }
        }
    }
}
