//! The withdrawal protocol: one linear pass per attempt.
//!
//! Initiation snapshots the balance and prompts for a destination; the
//! chat's next message is consumed as the address, the transfer is built,
//! fee-estimated, signed, and submitted. There is no retry loop — a failed
//! attempt is terminal and the user re-initiates from the wallet view.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use solvault_chat::{Button, ChatChannel, Menu, RenderMode};
use solvault_ledger::{LedgerClient, LedgerError};
use solvault_store::WalletStore;
use solvault_types::{ChatId, Lamports, SolanaNet};

use crate::session::{SessionRegistry, WithdrawalSession};
use crate::{keys, CustodyError};

/// Charged when the cluster declines to quote a fee.
pub const FALLBACK_FEE: Lamports = Lamports::new(5000);

/// How long a destination prompt stays open before the session expires.
const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Withdrawals {
    store: Arc<dyn WalletStore>,
    ledger: Arc<dyn LedgerClient>,
    channel: Arc<dyn ChatChannel>,
    sessions: Arc<SessionRegistry>,
    net: SolanaNet,
    reply_timeout: Duration,
}

impl Withdrawals {
    pub fn new(
        store: Arc<dyn WalletStore>,
        ledger: Arc<dyn LedgerClient>,
        channel: Arc<dyn ChatChannel>,
        sessions: Arc<SessionRegistry>,
        net: SolanaNet,
    ) -> Self {
        Self {
            store,
            ledger,
            channel,
            sessions,
            net,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    /// Start a withdrawal from `source`.
    ///
    /// Checks the live balance against the dust threshold before anything
    /// else; a dust balance fails without touching blockhash, fee, or
    /// submission. Otherwise registers the session (rejecting a concurrent
    /// one for this chat or this wallet), prompts for the destination, and
    /// arms the reply timeout.
    pub async fn initiate(&self, chat: ChatId, source: &str) -> Result<(), CustodyError> {
        let source_key = Pubkey::from_str(source)
            .map_err(|e| CustodyError::Key(format!("stored public key is invalid: {e}")))?;
        let balance = self.ledger.balance(&source_key).await?;
        if balance.is_dust() {
            return Err(CustodyError::InsufficientFunds);
        }

        let token = self.sessions.begin(chat, source, balance)?;
        if let Err(e) = self
            .channel
            .send_text(
                chat,
                "Enter the destination address for the withdrawal.",
                RenderMode::Plain,
            )
            .await
        {
            self.sessions.finish(chat, token);
            return Err(e.into());
        }

        let sessions = Arc::clone(&self.sessions);
        let channel = Arc::clone(&self.channel);
        let reply_timeout = self.reply_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(reply_timeout).await;
            if sessions.expire(chat, token).is_some() {
                tracing::info!(%chat, "withdrawal expired waiting for a destination");
                let notice = "The withdrawal timed out waiting for a destination address.";
                if let Err(e) = channel.send_text(chat, notice, RenderMode::Plain).await {
                    tracing::warn!(%chat, "could not deliver timeout notice: {e}");
                }
            }
        });

        Ok(())
    }

    /// Consume the destination reply for a claimed session and run the
    /// transfer to a terminal state. The session is released whatever the
    /// outcome.
    pub async fn on_reply(
        &self,
        session: WithdrawalSession,
        destination: &str,
    ) -> Result<(), CustodyError> {
        let result = self.run_transfer(&session, destination).await;
        self.sessions.finish(session.chat, session.token());

        let signature = result?;
        let menu = Menu::new().row(vec![Button::url(
            "View on Solscan",
            self.net.explorer_tx_url(&signature.to_string()),
        )]);
        self.channel
            .send_menu(
                session.chat,
                &format!("Withdrawal submitted.\n\n{signature}"),
                menu,
                RenderMode::Plain,
            )
            .await?;
        Ok(())
    }

    async fn run_transfer(
        &self,
        session: &WithdrawalSession,
        destination: &str,
    ) -> Result<Signature, CustodyError> {
        let destination = destination.trim();
        let destination = Pubkey::from_str(destination)
            .map_err(|_| CustodyError::InvalidAddress(destination.to_string()))?;

        let (blockhash, _last_valid_height) = self.ledger.latest_blockhash().await?;

        // Re-fetch the record: the wallet may have been deleted between
        // initiation and the reply.
        let record = self
            .store
            .find_by_public_key(&session.source)?
            .ok_or_else(|| CustodyError::WalletNotFound(session.source.clone()))?;
        let keypair = keys::keypair_from_secret(&record.secret_key)?;
        let source = keypair.pubkey();

        // Quote the fee against a draft carrying the full balance; the
        // final message has the same shape, so the quote holds.
        let draft = Message::new_with_blockhash(
            &[system_instruction::transfer(
                &source,
                &destination,
                session.balance.raw(),
            )],
            Some(&source),
            &blockhash,
        );
        let fee = match self.ledger.fee_for_message(&draft).await {
            Ok(fee) => fee,
            Err(LedgerError::EstimationUnavailable) => {
                tracing::debug!(%session.chat, "fee estimation unavailable, using fallback");
                FALLBACK_FEE
            }
            Err(e) => return Err(e.into()),
        };

        // A fee at or above the snapshot would push the transfer amount to
        // zero or below; that must never reach the network.
        if fee >= session.balance {
            return Err(CustodyError::InsufficientFundsAfterFee);
        }
        let amount = session.balance - fee;

        let message = Message::new_with_blockhash(
            &[system_instruction::transfer(
                &source,
                &destination,
                amount.raw(),
            )],
            Some(&source),
            &blockhash,
        );
        let transaction = Transaction::new(&[&keypair], message, blockhash);

        match self.ledger.submit(&transaction).await {
            Ok(signature) => {
                tracing::info!(
                    chat = %session.chat,
                    %amount,
                    %fee,
                    %signature,
                    "withdrawal submitted"
                );
                Ok(signature)
            }
            Err(LedgerError::Submission { reason, logs }) => {
                tracing::warn!(chat = %session.chat, "withdrawal rejected: {reason}");
                for line in &logs {
                    tracing::debug!(chat = %session.chat, "execution log: {line}");
                }
                Err(LedgerError::Submission { reason, logs }.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
