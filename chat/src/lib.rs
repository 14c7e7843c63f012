//! Chat channel abstraction for the solvault service.
//!
//! The conversational transport (concretely Telegram, in the daemon) is
//! reduced to the [`ChatChannel`] trait plus plain data: inbound events,
//! outbound menus, and the action-id string protocol between the two.

pub mod action;
pub mod channel;
pub mod error;
pub mod event;
pub mod menu;

pub use action::ActionId;
pub use channel::{ChatChannel, RenderMode};
pub use error::ChatError;
pub use event::InboundEvent;
pub use menu::{Button, ButtonKind, Menu};
