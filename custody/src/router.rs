//! Inbound event routing.
//!
//! The router is the component boundary for error handling: every failure
//! from the lifecycle or withdrawal components is converted to a
//! user-facing message here and detailed in the operator log. Nothing
//! propagates out of [`Router::dispatch`].

use std::sync::Arc;

use solvault_chat::{ActionId, ChatChannel, InboundEvent, RenderMode};
use solvault_types::ChatId;

use crate::session::SessionRegistry;
use crate::{CustodyError, WalletLifecycle, Withdrawals};

pub struct Router {
    lifecycle: Arc<WalletLifecycle>,
    withdrawals: Arc<Withdrawals>,
    sessions: Arc<SessionRegistry>,
    channel: Arc<dyn ChatChannel>,
}

impl Router {
    pub fn new(
        lifecycle: Arc<WalletLifecycle>,
        withdrawals: Arc<Withdrawals>,
        sessions: Arc<SessionRegistry>,
        channel: Arc<dyn ChatChannel>,
    ) -> Self {
        Self {
            lifecycle,
            withdrawals,
            sessions,
            channel,
        }
    }

    /// Handle one inbound event to completion.
    pub async fn dispatch(&self, event: InboundEvent) {
        let chat = event.chat();
        if let Err(e) = self.route(event).await {
            self.report(chat, e).await;
        }
    }

    async fn route(&self, event: InboundEvent) -> Result<(), CustodyError> {
        match event {
            InboundEvent::Command { chat, name, sender } => match name.as_str() {
                "home" | "start" => self.lifecycle.home(chat, sender.as_deref()).await,
                "wallets" => self.lifecycle.list(chat).await,
                _ => Ok(()),
            },
            InboundEvent::Text { chat, text, sender } => {
                // A pending withdrawal owns this chat's next message,
                // whatever it says.
                if let Some(session) = self.sessions.claim_reply(chat) {
                    self.withdrawals.on_reply(session, &text).await
                } else if text.trim().eq_ignore_ascii_case("gm") {
                    self.lifecycle.greet(chat, sender.as_deref()).await
                } else {
                    Ok(())
                }
            }
            InboundEvent::ActionPress {
                chat,
                message,
                data,
            } => {
                let Some(action) = ActionId::parse(&data) else {
                    tracing::debug!(%chat, data, "ignoring unknown action");
                    return Ok(());
                };
                match action {
                    ActionId::CreateWallet => self.lifecycle.create(chat).await,
                    ActionId::ListWallets => self.lifecycle.list(chat).await,
                    ActionId::Close => self.lifecycle.close(chat, message).await,
                    ActionId::Wallet(pk) => self.lifecycle.details(chat, &pk).await,
                    ActionId::Delete(pk) => self.lifecycle.request_delete(chat, &pk).await,
                    ActionId::ConfirmDelete(pk) => self.lifecycle.confirm_delete(chat, &pk).await,
                    ActionId::Withdraw(pk) => self.withdrawals.initiate(chat, &pk).await,
                }
            }
        }
    }

    async fn report(&self, chat: ChatId, error: CustodyError) {
        let text = match &error {
            CustodyError::InsufficientFunds => "This wallet has no balance to withdraw.",
            CustodyError::InsufficientFundsAfterFee => {
                "The balance is too small to cover the network fee."
            }
            CustodyError::InvalidAddress(_) => {
                "That is not a valid Solana address. The withdrawal was cancelled."
            }
            CustodyError::WalletNotFound(_) => "Wallet not found. It may have been deleted.",
            CustodyError::WithdrawalInProgress => {
                "A withdrawal is already in progress, finish it first."
            }
            _ => "Something went wrong, please try again.",
        };

        tracing::error!(%chat, "handler failed: {error}");
        if let Err(e) = self.channel.send_text(chat, text, RenderMode::Plain).await {
            tracing::warn!(%chat, "could not report failure to user: {e}");
        }
    }
}
