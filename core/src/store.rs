//! Observable state published by the synchronizers.
//!
//! # Design
//! All slots of a screen live in one `watch` value, so a single update
//! changes them together and no observer sees a half-applied outcome.
//! Only the owning synchronizer writes; any number of observers read.
//! A fresh receiver sees the current value immediately.

use tokio::sync::watch;

use crate::types::Account;

/// State of the account list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Replaced wholesale on every successful load.
    pub accounts: Vec<Account>,
    pub last_success: String,
    pub last_error: String,
}

/// State of the single-account details screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsState {
    pub account: Option<Account>,
    pub last_success: String,
    pub last_error: String,
}

/// Message slots shared by both screen states.
pub trait Messages {
    fn set_success(&mut self, message: String);
    fn set_error(&mut self, message: String);
}

impl Messages for SyncState {
    fn set_success(&mut self, message: String) {
        self.last_success = message;
    }

    fn set_error(&mut self, message: String) {
        self.last_error = message;
    }
}

impl Messages for DetailsState {
    fn set_success(&mut self, message: String) {
        self.last_success = message;
    }

    fn set_error(&mut self, message: String) {
        self.last_error = message;
    }
}

/// Single-writer, multi-reader holder for a screen state.
#[derive(Debug)]
pub struct Store<S> {
    tx: watch::Sender<S>,
}

impl<S: Clone> Store<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Apply `f` and mark every receiver changed, even if the value is equal.
    /// A receiver that reads between two updates sees a repeated message as a
    /// new event; updates it has not read yet collapse into the latest value.
    pub(crate) fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }
}

impl<S: Clone + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscriber_sees_current_value() {
        let store: Store<SyncState> = Store::default();
        store.update(|s| s.set_error("boom".to_string()));

        let rx = store.subscribe();
        assert_eq!(rx.borrow().last_error, "boom");
        assert!(rx.borrow().accounts.is_empty());
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_repeated_messages() {
        let store: Store<DetailsState> = Store::default();
        let mut rx = store.subscribe();

        store.update(|s| s.set_success("ok".to_string()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().last_success, "ok");

        store.update(|s| s.set_success("ok".to_string()));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().last_success, "ok");
    }

    #[tokio::test]
    async fn unread_updates_collapse_into_the_latest() {
        let store: Store<SyncState> = Store::default();
        let mut rx = store.subscribe();

        store.update(|s| s.set_error("first".to_string()));
        store.update(|s| s.set_error("second".to_string()));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().last_error, "second");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn updates_apply_all_slots_at_once() {
        let store: Store<SyncState> = Store::default();
        store.update(|s| {
            s.accounts.push(Account::new("A", "1", "USD"));
            s.set_success("done".to_string());
        });
        let snapshot = store.snapshot();
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.last_success, "done");
        assert_eq!(store.read(|s| s.last_error.clone()), "");
    }
}
