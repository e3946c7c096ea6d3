//! Account list synchronizer.
//!
//! # Design
//! `AccountSynchronizer` owns the client-side copy of the account list and
//! the latest success/error messages. Each operation makes one call on the
//! injected `AccountApi` and records the outcome in its `Store`. Mutations
//! never edit the list locally: a successful create, delete, replace or
//! patch is followed by a full reload, so the list always reflects what the
//! server returned last.
//!
//! Operations are plain futures; the caller either awaits them or spawns
//! them. Nothing here locks across calls, so two mutations issued back to
//! back may see their reloads land out of order.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::store::{Messages, Store, SyncState};
use crate::transport::AccountApi;
use crate::types::{Account, StatusPatch};

/// User-visible messages written to the state slots.
pub mod messages {
    pub const LOAD_FAILED: &str = "Ошибка загрузки";
    pub const ADDED: &str = "Аккаунт добавлен";
    pub const ADD_FAILED: &str = "Ошибка добавления";
    pub const DELETED: &str = "Удалено";
    pub const DELETE_FAILED: &str = "Ошибка удаления";
    pub const UPDATED: &str = "Успешно обновлен счет";
    pub const UPDATE_FAILED: &str = "Ошибка обновления счета";
    pub const STATUS_UPDATED: &str = "Успешно обновлен статус счета";
    pub const STATUS_UPDATE_FAILED: &str = "Ошибка обновления статуса счета";

    /// Message for a failure where no usable response arrived.
    pub fn network_failure(cause: &str) -> String {
        format!("Ошибка сети: {cause}")
    }
}

/// Text for `last_error`: network failures carry their cause, server
/// answers get the operation's generic message.
pub(crate) fn failure_message(generic: &str, err: &ApiError) -> String {
    if err.is_network() {
        messages::network_failure(&err.to_string())
    } else {
        generic.to_string()
    }
}

pub(crate) fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::MissingId);
    }
    Ok(())
}

pub(crate) fn record_failure<S: Messages + Clone>(store: &Store<S>, generic: &str, err: &ApiError) {
    warn!(error = %err, "{generic}");
    let message = failure_message(generic, err);
    store.update(|s| s.set_error(message));
}

pub struct AccountSynchronizer {
    api: Arc<dyn AccountApi>,
    store: Store<SyncState>,
}

impl AccountSynchronizer {
    /// Starts with an empty list; nothing is fetched until `load`.
    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        Self {
            api,
            store: Store::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> SyncState {
        self.store.snapshot()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.store.read(|s| s.accounts.clone())
    }

    pub fn last_success(&self) -> String {
        self.store.read(|s| s.last_success.clone())
    }

    pub fn last_error(&self) -> String {
        self.store.read(|s| s.last_error.clone())
    }

    /// Replace the list with the server's. Messages are left alone on success.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.refresh(true).await;
    }

    /// Create a new, active account and reload the list.
    #[instrument(skip(self))]
    pub async fn add(&self, name: &str, balance: &str, currency: &str) {
        let account = Account::new(name, balance, currency);
        match self.api.create(&account).await {
            Ok(created) => {
                debug!(id = created.id.as_deref().unwrap_or_default(), "account created");
                self.succeed(messages::ADDED).await;
            }
            Err(err) => record_failure(&self.store, messages::ADD_FAILED, &err),
        }
    }

    /// Returns `Err(MissingId)` without touching the network if `id` is empty.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        require_id(id)?;
        match self.api.delete(id).await {
            Ok(()) => self.succeed(messages::DELETED).await,
            Err(err) => record_failure(&self.store, messages::DELETE_FAILED, &err),
        }
        Ok(())
    }

    /// Overwrite every field of account `id` with `account`.
    #[instrument(skip(self, account))]
    pub async fn replace_fully(&self, id: &str, account: &Account) -> Result<(), ApiError> {
        require_id(id)?;
        match self.api.replace(id, account).await {
            Ok(_) => self.succeed(messages::UPDATED).await,
            Err(err) => record_failure(&self.store, messages::UPDATE_FAILED, &err),
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn patch_status(&self, id: &str, is_active: bool) -> Result<(), ApiError> {
        require_id(id)?;
        match self.api.patch_status(id, StatusPatch::from(is_active)).await {
            Ok(_) => self.succeed(messages::STATUS_UPDATED).await,
            Err(err) => record_failure(&self.store, messages::STATUS_UPDATE_FAILED, &err),
        }
        Ok(())
    }

    /// The message is published before the reload starts. A failed reload
    /// here only leaves the list stale; it does not touch `last_error`.
    async fn succeed(&self, message: &str) {
        let message = message.to_string();
        self.store.update(|s| s.set_success(message));
        self.refresh(false).await;
    }

    async fn refresh(&self, report_errors: bool) {
        match self.api.list().await {
            Ok(accounts) => {
                debug!(count = accounts.len(), "accounts loaded");
                self.store.update(|s| s.accounts = accounts);
            }
            Err(err) if report_errors => record_failure(&self.store, messages::LOAD_FAILED, &err),
            Err(err) => warn!(error = %err, "reload after mutation failed, list is stale"),
        }
    }
}
