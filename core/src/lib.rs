//! Client core for the bank accounts service.
//!
//! # Overview
//! Keeps a client-side view of the `/accounts` REST resource in sync with the
//! server. Screens observe a synchronizer's published state and forward user
//! intents (load, add, edit, toggle, delete) to its operations.
//!
//! # Design
//! - `AccountClient` is stateless: `build_*` produces a plain-data request,
//!   `parse_*` classifies and decodes the response.
//! - `AccountApi` is the transport contract; `RemoteAccountApi` runs the
//!   round-trip with ureq on tokio's blocking pool.
//! - `AccountSynchronizer` / `AccountDetailsSynchronizer` take the API by
//!   constructor injection and publish their state through a `watch` store.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod details;
pub mod error;
pub mod http;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::AccountClient;
pub use config::Config;
pub use details::AccountDetailsSynchronizer;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{DetailsState, Store, SyncState};
pub use sync::{messages, AccountSynchronizer};
pub use transport::{AccountApi, RemoteAccountApi};
pub use types::{Account, StatusPatch};
