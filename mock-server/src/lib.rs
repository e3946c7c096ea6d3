use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: String,
    pub currency: String,
    pub is_active: bool,
}

/// Body of POST and PUT. A client-sent `id` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInput {
    pub name: String,
    pub balance: String,
    pub currency: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub is_active: bool,
}

#[derive(Default)]
pub struct Accounts {
    next_id: u64,
    by_id: BTreeMap<u64, Account>,
}

pub type Db = Arc<RwLock<Accounts>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Accounts::default()));
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account)
                .put(replace_account)
                .patch(patch_status)
                .delete(delete_account),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Ids are decimal strings; anything else cannot name an account.
fn key(id: &str) -> Result<u64, StatusCode> {
    id.parse().map_err(|_| StatusCode::NOT_FOUND)
}

async fn list_accounts(State(db): State<Db>) -> Json<Vec<Account>> {
    let accounts = db.read().await;
    Json(accounts.by_id.values().cloned().collect())
}

async fn create_account(
    State(db): State<Db>,
    Json(input): Json<AccountInput>,
) -> (StatusCode, Json<Account>) {
    let mut accounts = db.write().await;
    accounts.next_id += 1;
    let id = accounts.next_id;
    let account = Account {
        id: id.to_string(),
        name: input.name,
        balance: input.balance,
        currency: input.currency,
        is_active: input.is_active,
    };
    accounts.by_id.insert(id, account.clone());
    tracing::info!(id, "account created");
    (StatusCode::CREATED, Json(account))
}

async fn get_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Account>, StatusCode> {
    let accounts = db.read().await;
    accounts.by_id.get(&key(&id)?).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_account(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<AccountInput>,
) -> Result<Json<Account>, StatusCode> {
    let mut accounts = db.write().await;
    let account = accounts.by_id.get_mut(&key(&id)?).ok_or(StatusCode::NOT_FOUND)?;
    account.name = input.name;
    account.balance = input.balance;
    account.currency = input.currency;
    account.is_active = input.is_active;
    Ok(Json(account.clone()))
}

async fn patch_status(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<StatusPatch>,
) -> Result<Json<Account>, StatusCode> {
    let mut accounts = db.write().await;
    let account = accounts.by_id.get_mut(&key(&id)?).ok_or(StatusCode::NOT_FOUND)?;
    account.is_active = input.is_active;
    Ok(Json(account.clone()))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut accounts = db.write().await;
    accounts
        .by_id
        .remove(&key(&id)?)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
