//! In-memory `AccountApi` used by the synchronizer unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::error::ApiError;
use crate::transport::AccountApi;
use crate::types::{Account, StatusPatch};

/// Behaves like the REST service, except that any operation can be made to
/// fail and `list` can be held back until the test releases it.
#[derive(Default)]
pub(crate) struct FakeApi {
    accounts: Mutex<Vec<Account>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<u32>,
    list_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeApi {
    pub(crate) fn with_accounts(accounts: Vec<Account>) -> Arc<Self> {
        let next_id = accounts.len() as u32;
        Arc::new(Self {
            accounts: Mutex::new(accounts),
            next_id: Mutex::new(next_id),
            ..Self::default()
        })
    }

    /// Every later call to `operation` fails with `error`.
    pub(crate) fn fail(&self, operation: &'static str, error: ApiError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub(crate) fn recover(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn server_accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    /// `list` waits for a permit from the returned semaphore.
    pub(crate) fn hold_list(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn enter(&self, call: String, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn modify(&self, id: &str, f: impl FnOnce(&mut Account)) -> Result<Account, ApiError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id.as_deref() == Some(id))
            .ok_or(ApiError::NotFound)?;
        f(account);
        Ok(account.clone())
    }
}

#[async_trait]
impl AccountApi for FakeApi {
    async fn list(&self) -> Result<Vec<Account>, ApiError> {
        self.enter("list".to_string(), "list")?;
        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.map_err(|e| ApiError::TransportUnavailable(e.to_string()))?.forget();
        }
        Ok(self.server_accounts())
    }

    async fn create(&self, account: &Account) -> Result<Account, ApiError> {
        self.enter(format!("create {}", account.name), "create")?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = Account {
            id: Some(next_id.to_string()),
            ..account.clone()
        };
        self.accounts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn fetch_one(&self, id: &str) -> Result<Account, ApiError> {
        self.enter(format!("fetch {id}"), "fetch_one")?;
        self.modify(id, |_| {})
    }

    async fn replace(&self, id: &str, account: &Account) -> Result<Account, ApiError> {
        self.enter(format!("replace {id}"), "replace")?;
        self.modify(id, |stored| {
            *stored = Account {
                id: Some(id.to_string()),
                ..account.clone()
            }
        })
    }

    async fn patch_status(&self, id: &str, patch: StatusPatch) -> Result<Account, ApiError> {
        self.enter(format!("patch {id} {}", patch.is_active), "patch_status")?;
        self.modify(id, |stored| stored.is_active = patch.is_active)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.enter(format!("delete {id}"), "delete")?;
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id.as_deref() != Some(id));
        if accounts.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

pub(crate) fn account(id: &str, name: &str, balance: &str, is_active: bool) -> Account {
    Account {
        id: Some(id.to_string()),
        name: name.to_string(),
        balance: balance.to_string(),
        currency: "USD".to_string(),
        is_active,
    }
}
