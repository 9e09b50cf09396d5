//! Account model
//!
//! Accounts only contribute their current balance to the dashboard. Balances
//! of liability accounts are negative and are summed as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    LineOfCredit,
    Other,
}

impl AccountType {
    /// Returns true if this account type typically carries a negative balance
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit | Self::LineOfCredit)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
            Self::LineOfCredit => write!(f, "Line of Credit"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub id: AccountId,

    pub name: String,

    #[serde(rename = "type", default)]
    pub account_type: AccountType,

    /// Current balance, negative for money owed
    pub balance: Money,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: AccountType, balance: Money) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.account_type, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liability_types() {
        assert!(AccountType::Credit.is_liability());
        assert!(AccountType::LineOfCredit.is_liability());
        assert!(!AccountType::Savings.is_liability());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"name":"Visa","type":"line_of_credit","balance":-25000}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::LineOfCredit);
        assert!(account.balance.is_negative());
    }
}
