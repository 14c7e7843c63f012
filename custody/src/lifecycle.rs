//! Wallet lifecycle: create, list, detail view, delete with confirmation.

use std::str::FromStr;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solvault_chat::{ActionId, Button, ChatChannel, Menu, RenderMode};
use solvault_ledger::LedgerClient;
use solvault_store::WalletStore;
use solvault_types::{ChatId, MessageId, SolanaNet};

use crate::{keys, CustodyError};

pub struct WalletLifecycle {
    store: Arc<dyn WalletStore>,
    ledger: Arc<dyn LedgerClient>,
    channel: Arc<dyn ChatChannel>,
    net: SolanaNet,
}

impl WalletLifecycle {
    pub fn new(
        store: Arc<dyn WalletStore>,
        ledger: Arc<dyn LedgerClient>,
        channel: Arc<dyn ChatChannel>,
        net: SolanaNet,
    ) -> Self {
        Self {
            store,
            ledger,
            channel,
            net,
        }
    }

    /// Reply to a bare "gm" greeting.
    pub async fn greet(&self, chat: ChatId, sender: Option<&str>) -> Result<(), CustodyError> {
        let name = sender.unwrap_or("there");
        self.channel
            .send_text(chat, &format!("Gm, {name}"), RenderMode::Plain)
            .await?;
        Ok(())
    }

    /// The home menu, shown for /home and /start.
    pub async fn home(&self, chat: ChatId, sender: Option<&str>) -> Result<(), CustodyError> {
        let name = sender.unwrap_or("there");
        let menu = Menu::new().row(vec![
            Button::action("create a new wallet", ActionId::CreateWallet),
            Button::action("Wallets", ActionId::ListWallets),
            Button::action("close", ActionId::Close),
        ]);
        self.channel
            .send_menu(
                chat,
                &format!("Gm, {name}\nManage your Solana wallets below."),
                menu,
                RenderMode::Plain,
            )
            .await?;
        Ok(())
    }

    /// Generate a fresh key pair and persist it for this chat.
    ///
    /// A store failure is reported to the user and swallowed; wallet
    /// creation must never take the process down.
    pub async fn create(&self, chat: ChatId) -> Result<(), CustodyError> {
        let (public_key, secret) = keys::generate();
        match self.store.create(chat, &public_key, secret) {
            Ok(record) => {
                tracing::info!(%chat, wallet = %record.id, "created wallet");
                self.channel
                    .send_text(
                        chat,
                        &format!(
                            "Success: Your new wallet is:\n\n{public_key}\n\n\
                             You can receive payments at this address"
                        ),
                        RenderMode::Plain,
                    )
                    .await?;
            }
            Err(e) => {
                tracing::error!(%chat, "failed to create wallet: {e}");
                self.channel
                    .send_text(
                        chat,
                        "Failed to create the wallet, please try again.",
                        RenderMode::Plain,
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// List this chat's wallets, one button per wallet. An empty list is
    /// rendered as a create-wallet affordance instead of an empty menu.
    pub async fn list(&self, chat: ChatId) -> Result<(), CustodyError> {
        let wallets = self.store.list_by_owner(chat)?;

        if wallets.is_empty() {
            let menu = Menu::new().row(vec![Button::action(
                "create a new wallet",
                ActionId::CreateWallet,
            )]);
            self.channel
                .send_menu(
                    chat,
                    "You don't own any wallets yet.",
                    menu,
                    RenderMode::Plain,
                )
                .await?;
            return Ok(());
        }

        let mut menu = Menu::new();
        for wallet in &wallets {
            menu = menu.row(vec![Button::action(
                &wallet.public_key,
                ActionId::Wallet(wallet.public_key.clone()),
            )]);
        }
        self.channel
            .send_menu(
                chat,
                "Here is the list of wallets you own.",
                menu,
                RenderMode::Plain,
            )
            .await?;
        Ok(())
    }

    /// Detail view: keys, live balance, and the wallet's actions.
    ///
    /// A balance lookup failure degrades the whole view to an error
    /// message; there is no partial rendering.
    pub async fn details(&self, chat: ChatId, public_key: &str) -> Result<(), CustodyError> {
        let record = self
            .store
            .find_by_public_key(public_key)?
            .ok_or_else(|| CustodyError::WalletNotFound(public_key.to_string()))?;

        let account = Pubkey::from_str(public_key)
            .map_err(|e| CustodyError::Key(format!("stored public key is invalid: {e}")))?;
        let balance = self.ledger.balance(&account).await?;

        let text = format!(
            "Wallet details\n\nPublic key: {public_key}\nBalance: {} SOL\nPrivate key: {}",
            balance.format_sol(),
            record.secret_key.reveal(),
        );
        let menu = Menu::new()
            .row(vec![
                Button::url("View on Solscan", self.net.explorer_account_url(public_key)),
                Button::action("close", ActionId::Close),
            ])
            .row(vec![Button::action(
                "Withdraw",
                ActionId::Withdraw(public_key.to_string()),
            )])
            .row(vec![Button::action(
                "Delete wallet",
                ActionId::Delete(public_key.to_string()),
            )]);
        self.channel
            .send_menu(chat, &text, menu, RenderMode::Monospace)
            .await?;
        Ok(())
    }

    /// First step of deletion: a confirmation prompt naming the target.
    /// Deletion is irreversible, so it takes a deliberate second press.
    pub async fn request_delete(&self, chat: ChatId, public_key: &str) -> Result<(), CustodyError> {
        let menu = Menu::new().row(vec![
            Button::action(
                "Yes, delete it",
                ActionId::ConfirmDelete(public_key.to_string()),
            ),
            Button::action("Cancel", ActionId::Wallet(public_key.to_string())),
        ]);
        self.channel
            .send_menu(
                chat,
                &format!("Delete wallet {public_key}?\nThis cannot be undone."),
                menu,
                RenderMode::Plain,
            )
            .await?;
        Ok(())
    }

    /// Second step of deletion, triggered only by the explicit confirm
    /// action. Deleting an already-absent wallet still reports success.
    pub async fn confirm_delete(&self, chat: ChatId, public_key: &str) -> Result<(), CustodyError> {
        let removed = self.store.delete_by_public_key(public_key)?;
        if removed {
            tracing::info!(%chat, "deleted wallet");
        }
        self.channel
            .send_text(chat, "Wallet deleted.", RenderMode::Plain)
            .await?;
        Ok(())
    }

    /// The close action removes the menu message it was pressed on.
    pub async fn close(&self, chat: ChatId, message: MessageId) -> Result<(), CustodyError> {
        self.channel.delete_message(chat, message).await?;
        Ok(())
    }
}
