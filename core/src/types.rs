//! Domain DTOs for the accounts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Field
//! names are camelCase on the wire (`isActive`) to match the REST service.

use serde::{Deserialize, Serialize};

/// A bank account as exchanged with the server.
///
/// `id` is assigned by the server. An account without one has never been
/// persisted, so it cannot be the target of a delete, replace or patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Decimal amount kept as text; the client never does arithmetic on it.
    pub balance: String,
    pub currency: String,
    pub is_active: bool,
}

impl Account {
    /// A not-yet-persisted account. New accounts always start active.
    pub fn new(name: impl Into<String>, balance: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            balance: balance.into(),
            currency: currency.into(),
            is_active: true,
        }
    }
}

/// PATCH payload that flips only the active flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub is_active: bool,
}

impl From<bool> for StatusPatch {
    fn from(is_active: bool) -> Self {
        Self { is_active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checking() -> Account {
        Account {
            id: Some("1".to_string()),
            name: "Checking".to_string(),
            balance: "100.00".to_string(),
            currency: "USD".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn account_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(checking()).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Checking");
        assert_eq!(json["balance"], "100.00");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["isActive"], true);
        assert!(json.get("is_active").is_none());
    }

    #[test]
    fn unsaved_account_omits_id() {
        let json = serde_json::to_value(Account::new("Savings", "0", "USD")).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn missing_id_decodes_as_none() {
        let account: Account =
            serde_json::from_str(r#"{"name":"Cash","balance":"5","currency":"EUR","isActive":false}"#).unwrap();
        assert_eq!(account.id, None);
        assert!(!account.is_active);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let account: Account = serde_json::from_str(
            r#"{"id":"7","name":"X","balance":"1","currency":"RUB","isActive":true,"createdAt":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(account.id.as_deref(), Some("7"));
    }

    #[test]
    fn account_rejects_missing_name() {
        let result: Result<Account, _> = serde_json::from_str(r#"{"balance":"1","currency":"USD","isActive":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn account_roundtrips_with_and_without_id() {
        let mut inactive = checking();
        inactive.is_active = false;
        let cases = [checking(), Account::new("", "", ""), inactive, Account::new("Вклад", "-0.01", "RUB")];
        for account in cases {
            let json = serde_json::to_string(&account).unwrap();
            let back: Account = serde_json::from_str(&json).unwrap();
            assert_eq!(back, account);
        }
    }

    #[test]
    fn status_patch_carries_only_the_flag() {
        let json = serde_json::to_value(StatusPatch::from(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "isActive": false }));
    }
}
