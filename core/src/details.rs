//! Single-account synchronizer backing the details screen.
//!
//! Same reload-after-mutation policy as the list: a successful replace
//! refetches the account. A successful delete clears it instead, since the
//! resource is known to be gone.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::store::{DetailsState, Messages, Store};
use crate::sync::{messages, record_failure, require_id};
use crate::transport::AccountApi;
use crate::types::Account;

pub struct AccountDetailsSynchronizer {
    api: Arc<dyn AccountApi>,
    store: Store<DetailsState>,
}

impl AccountDetailsSynchronizer {
    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        Self {
            api,
            store: Store::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailsState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> DetailsState {
        self.store.snapshot()
    }

    pub fn account(&self) -> Option<Account> {
        self.store.read(|s| s.account.clone())
    }

    pub fn last_success(&self) -> String {
        self.store.read(|s| s.last_success.clone())
    }

    pub fn last_error(&self) -> String {
        self.store.read(|s| s.last_error.clone())
    }

    #[instrument(skip(self))]
    pub async fn load(&self, id: &str) -> Result<(), ApiError> {
        require_id(id)?;
        self.refresh(id, true).await;
        Ok(())
    }

    #[instrument(skip(self, account))]
    pub async fn replace_fully(&self, id: &str, account: &Account) -> Result<(), ApiError> {
        require_id(id)?;
        match self.api.replace(id, account).await {
            Ok(_) => {
                self.store.update(|s| s.set_success(messages::UPDATED.to_string()));
                self.refresh(id, false).await;
            }
            Err(err) => record_failure(&self.store, messages::UPDATE_FAILED, &err),
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        require_id(id)?;
        match self.api.delete(id).await {
            Ok(()) => self.store.update(|s| {
                s.account = None;
                s.set_success(messages::DELETED.to_string());
            }),
            Err(err) => record_failure(&self.store, messages::DELETE_FAILED, &err),
        }
        Ok(())
    }

    async fn refresh(&self, id: &str, report_errors: bool) {
        match self.api.fetch_one(id).await {
            Ok(account) => self.store.update(|s| s.account = Some(account)),
            Err(err) if report_errors => record_failure(&self.store, messages::LOAD_FAILED, &err),
            Err(err) => warn!(error = %err, "reload after update failed, account is stale"),
        }
    }
}
