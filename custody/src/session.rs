//! Withdrawal session registry.
//!
//! The registry is the per-chat pending-intent table: the router consults
//! it for every free-text message before any other handling, so a prompt
//! for a destination address only ever captures the prompted chat's next
//! message. Sessions are in-memory only; a restart drops them and the user
//! re-initiates.

use std::collections::HashMap;
use std::sync::Mutex;

use solvault_types::{ChatId, Lamports};

use crate::CustodyError;

/// Where one withdrawal attempt currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Prompted, waiting for the chat's next message.
    AwaitingDestination,
    /// Reply consumed, transfer being built and submitted.
    Submitting,
}

/// Distinguishes one withdrawal attempt from later ones on the same chat,
/// so a stale timeout cannot expire a newer session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionToken(u64);

/// One in-flight withdrawal: which chat asked, which wallet it drains, and
/// the balance snapshot taken at initiation.
#[derive(Clone, Debug)]
pub struct WithdrawalSession {
    pub chat: ChatId,
    pub source: String,
    pub balance: Lamports,
    pub state: SessionState,
    token: SessionToken,
}

impl WithdrawalSession {
    pub fn token(&self) -> SessionToken {
        self.token
    }
}

/// Pending withdrawals, keyed by chat.
///
/// Exclusivity invariants are enforced at [`SessionRegistry::begin`]: at
/// most one session per chat, and at most one session per source wallet
/// across all chats (two chats cannot concurrently drain the same wallet).
/// The lock is held only across map operations, never across I/O.
pub struct SessionRegistry {
    inner: Mutex<Inner>,
}

struct Inner {
    by_chat: HashMap<ChatId, WithdrawalSession>,
    next_token: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                by_chat: HashMap::new(),
                next_token: 0,
            }),
        }
    }

    /// Register a new pending withdrawal for `chat` draining `source`.
    pub fn begin(
        &self,
        chat: ChatId,
        source: &str,
        balance: Lamports,
    ) -> Result<SessionToken, CustodyError> {
        let mut inner = self.inner.lock().unwrap();
        let conflicting = inner.by_chat.contains_key(&chat)
            || inner.by_chat.values().any(|s| s.source == source);
        if conflicting {
            return Err(CustodyError::WithdrawalInProgress);
        }

        let token = SessionToken(inner.next_token);
        inner.next_token += 1;
        inner.by_chat.insert(
            chat,
            WithdrawalSession {
                chat,
                source: source.to_string(),
                balance,
                state: SessionState::AwaitingDestination,
                token,
            },
        );
        Ok(token)
    }

    /// Claim the chat's pending session for its destination reply.
    ///
    /// Transitions the session to `Submitting` so a concurrent timeout or
    /// second reply cannot touch the same attempt. The session stays
    /// registered (holding its exclusivity claims) until
    /// [`SessionRegistry::finish`].
    pub fn claim_reply(&self, chat: ChatId) -> Option<WithdrawalSession> {
        let mut inner = self.inner.lock().unwrap();
        match inner.by_chat.get_mut(&chat) {
            Some(session) if session.state == SessionState::AwaitingDestination => {
                session.state = SessionState::Submitting;
                Some(session.clone())
            }
            _ => None,
        }
    }

    /// Drop the session on a terminal transition. A mismatched token means
    /// the attempt was already replaced; nothing is removed then.
    pub fn finish(&self, chat: ChatId, token: SessionToken) {
        let mut inner = self.inner.lock().unwrap();
        if inner.by_chat.get(&chat).is_some_and(|s| s.token == token) {
            inner.by_chat.remove(&chat);
        }
    }

    /// Expire a session that never got its reply. Returns the session only
    /// if that same attempt is still awaiting one; a session already
    /// claimed for submission is left alone.
    pub fn expire(&self, chat: ChatId, token: SessionToken) -> Option<WithdrawalSession> {
        let mut inner = self.inner.lock().unwrap();
        let still_waiting = inner
            .by_chat
            .get(&chat)
            .is_some_and(|s| s.token == token && s.state == SessionState::AwaitingDestination);
        if still_waiting {
            inner.by_chat.remove(&chat)
        } else {
            None
        }
    }

    /// Whether a chat has any session registered.
    pub fn is_pending(&self, chat: ChatId) -> bool {
        self.inner.lock().unwrap().by_chat.contains_key(&chat)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
