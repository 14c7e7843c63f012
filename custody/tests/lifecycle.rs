//! Wallet lifecycle integration tests over nullable collaborators.

use std::sync::Arc;

use solvault_chat::{ActionId, ButtonKind, ChatChannel, InboundEvent};
use solvault_custody::{Router, SessionRegistry, WalletLifecycle, Withdrawals};
use solvault_ledger::LedgerClient;
use solvault_nullables::{NullChannel, NullLedgerClient, NullWalletStore, Outbound};
use solvault_store::WalletStore;
use solvault_types::{ChatId, Lamports, MessageId, SolanaNet};

struct Harness {
    store: Arc<NullWalletStore>,
    ledger: Arc<NullLedgerClient>,
    channel: Arc<NullChannel>,
    router: Router,
}

fn harness() -> Harness {
    let store = Arc::new(NullWalletStore::new());
    let ledger = Arc::new(NullLedgerClient::new());
    let channel = Arc::new(NullChannel::new());
    let sessions = Arc::new(SessionRegistry::new());
    let net = SolanaNet::Devnet;

    let lifecycle = Arc::new(WalletLifecycle::new(
        store.clone() as Arc<dyn WalletStore>,
        ledger.clone() as Arc<dyn LedgerClient>,
        channel.clone() as Arc<dyn ChatChannel>,
        net,
    ));
    let withdrawals = Arc::new(Withdrawals::new(
        store.clone() as Arc<dyn WalletStore>,
        ledger.clone() as Arc<dyn LedgerClient>,
        channel.clone() as Arc<dyn ChatChannel>,
        Arc::clone(&sessions),
        net,
    ));
    let router = Router::new(
        lifecycle,
        withdrawals,
        sessions,
        channel.clone() as Arc<dyn ChatChannel>,
    );

    Harness {
        store,
        ledger,
        channel,
        router,
    }
}

fn press(chat: ChatId, data: &str) -> InboundEvent {
    InboundEvent::ActionPress {
        chat,
        message: MessageId::new(1),
        data: data.to_string(),
    }
}

fn command(chat: ChatId, name: &str, sender: &str) -> InboundEvent {
    InboundEvent::Command {
        chat,
        name: name.to_string(),
        sender: Some(sender.to_string()),
    }
}

/// The public key announced by the most recent create-wallet success text.
fn created_public_key(channel: &NullChannel, chat: ChatId) -> String {
    let text = channel.last_text_for(chat).expect("no creation message");
    text.lines().nth(2).expect("unexpected creation text").to_string()
}

#[tokio::test]
async fn empty_list_offers_wallet_creation() {
    let h = harness();
    let chat = ChatId::new(7);

    h.router.dispatch(press(chat, "list_wallets")).await;

    let (text, menu) = h.channel.menus_for(chat).pop().unwrap();
    assert_eq!(text, "You don't own any wallets yet.");
    assert_eq!(menu.rows.len(), 1);
    assert_eq!(
        menu.rows[0][0].kind,
        ButtonKind::Action(ActionId::CreateWallet)
    );
}

#[tokio::test]
async fn owner_scenario_end_to_end() {
    let h = harness();
    let chat = ChatId::new(42);

    // Create a wallet and learn its address from the success message.
    h.router.dispatch(press(chat, "create_wallet")).await;
    assert_eq!(h.store.record_count(), 1);
    let public_key = created_public_key(&h.channel, chat);

    // Listing shows exactly the created wallet.
    h.router.dispatch(press(chat, "list_wallets")).await;
    let (_, menu) = h.channel.menus_for(chat).pop().unwrap();
    assert_eq!(menu.rows.len(), 1);
    assert_eq!(menu.rows[0][0].label, public_key);
    assert_eq!(
        menu.rows[0][0].kind,
        ButtonKind::Action(ActionId::Wallet(public_key.clone()))
    );

    // A fresh, unfunded address renders a 0.00 balance.
    h.router.dispatch(press(chat, &format!("wallet_{public_key}"))).await;
    let (details, _) = h.channel.menus_for(chat).pop().unwrap();
    assert!(details.contains(&public_key));
    assert!(details.contains("Balance: 0.00 SOL"));

    // A direct delete press only asks for confirmation.
    h.router.dispatch(press(chat, &format!("delete_{public_key}"))).await;
    assert!(h.store.find_by_public_key(&public_key).unwrap().is_some());
    let (confirm, menu) = h.channel.menus_for(chat).pop().unwrap();
    assert!(confirm.contains(&public_key));
    assert_eq!(
        menu.rows[0][0].kind,
        ButtonKind::Action(ActionId::ConfirmDelete(public_key.clone()))
    );

    // Confirming actually removes the record.
    h.router
        .dispatch(press(chat, &format!("confirm_delete_{public_key}")))
        .await;
    assert!(h.store.find_by_public_key(&public_key).unwrap().is_none());
    assert_eq!(h.channel.last_text_for(chat).unwrap(), "Wallet deleted.");

    // And the list is back to the create affordance.
    h.router.dispatch(press(chat, "list_wallets")).await;
    let (text, _) = h.channel.menus_for(chat).pop().unwrap();
    assert_eq!(text, "You don't own any wallets yet.");
}

#[tokio::test]
async fn delete_confirmation_offers_a_way_back() {
    let h = harness();
    let chat = ChatId::new(3);

    h.router.dispatch(press(chat, "create_wallet")).await;
    let public_key = created_public_key(&h.channel, chat);

    h.router.dispatch(press(chat, &format!("delete_{public_key}"))).await;
    let (_, menu) = h.channel.menus_for(chat).pop().unwrap();

    // Cancel re-renders the wallet view instead of deleting anything.
    assert_eq!(
        menu.rows[0][1].kind,
        ButtonKind::Action(ActionId::Wallet(public_key.clone()))
    );
}

#[tokio::test]
async fn deleting_an_absent_wallet_still_reports_success() {
    let h = harness();
    let chat = ChatId::new(4);

    h.router.dispatch(press(chat, "confirm_delete_ghost")).await;
    assert_eq!(h.channel.last_text_for(chat).unwrap(), "Wallet deleted.");
}

#[tokio::test]
async fn create_failure_is_reported_not_fatal() {
    let h = harness();
    let chat = ChatId::new(5);

    h.store.set_failing(true);
    h.router.dispatch(press(chat, "create_wallet")).await;

    assert_eq!(
        h.channel.last_text_for(chat).unwrap(),
        "Failed to create the wallet, please try again."
    );

    // The process keeps serving once the store recovers.
    h.store.set_failing(false);
    h.router.dispatch(press(chat, "create_wallet")).await;
    assert_eq!(h.store.record_count(), 1);
}

#[tokio::test]
async fn details_for_missing_wallet_are_user_visible() {
    let h = harness();
    let chat = ChatId::new(6);

    h.router.dispatch(press(chat, "wallet_ghost")).await;
    assert_eq!(
        h.channel.last_text_for(chat).unwrap(),
        "Wallet not found. It may have been deleted."
    );
}

#[tokio::test]
async fn details_degrade_fully_when_balance_unavailable() {
    let h = harness();
    let chat = ChatId::new(8);

    h.router.dispatch(press(chat, "create_wallet")).await;
    let public_key = created_public_key(&h.channel, chat);

    h.ledger.set_balance_failing(true);
    h.router.dispatch(press(chat, &format!("wallet_{public_key}"))).await;

    assert_eq!(
        h.channel.last_text_for(chat).unwrap(),
        "Something went wrong, please try again."
    );
    // No partial rendering: the secret never went out.
    for outbound in h.channel.sent() {
        if let Outbound::Text { text, .. } | Outbound::Menu { text, .. } = outbound {
            assert!(!text.contains("Private key:"));
        }
    }
}

#[tokio::test]
async fn funded_balance_renders_with_two_decimals() {
    let h = harness();
    let chat = ChatId::new(9);

    h.router.dispatch(press(chat, "create_wallet")).await;
    let public_key = created_public_key(&h.channel, chat);
    h.ledger.set_balance(&public_key, Lamports::new(2_500_000_000));

    h.router.dispatch(press(chat, &format!("wallet_{public_key}"))).await;
    let (details, menu) = h.channel.menus_for(chat).pop().unwrap();
    assert!(details.contains("Balance: 2.50 SOL"));

    // Explorer link is cluster-aware.
    let ButtonKind::Url(url) = &menu.rows[0][0].kind else {
        panic!("expected explorer link");
    };
    assert!(url.contains(&public_key));
    assert!(url.contains("cluster=devnet"));
}

#[tokio::test]
async fn home_menu_greets_and_lists_actions() {
    let h = harness();
    let chat = ChatId::new(10);

    h.router.dispatch(command(chat, "home", "ada")).await;
    let (text, menu) = h.channel.menus_for(chat).pop().unwrap();
    assert!(text.starts_with("Gm, ada"));
    assert_eq!(menu.rows[0].len(), 3);
}

#[tokio::test]
async fn gm_text_gets_a_greeting_back() {
    let h = harness();
    let chat = ChatId::new(11);

    h.router
        .dispatch(InboundEvent::Text {
            chat,
            text: "GM".to_string(),
            sender: Some("ada".to_string()),
        })
        .await;
    assert_eq!(h.channel.last_text_for(chat).unwrap(), "Gm, ada");
}

#[tokio::test]
async fn close_removes_the_menu_message() {
    let h = harness();
    let chat = ChatId::new(12);

    h.router
        .dispatch(InboundEvent::ActionPress {
            chat,
            message: MessageId::new(77),
            data: "close".to_string(),
        })
        .await;
    assert!(h.channel.sent().contains(&Outbound::Deleted {
        chat,
        message: MessageId::new(77),
    }));
}
