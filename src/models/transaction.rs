//! Transaction model
//!
//! Transactions carry an unsigned amount plus an explicit kind. The category is
//! a free-text key matched against budgets, never a foreign key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Fixed day interval for day-based cadences
    pub fn interval_days(&self) -> Option<i64> {
        match self {
            Self::Weekly => Some(7),
            Self::Biweekly => Some(14),
            Self::Monthly | Self::Yearly => None,
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Biweekly => write!(f, "biweekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    #[serde(default)]
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Amount, always non-negative; direction comes from `kind`
    pub amount: Money,

    /// Free-text category key
    #[serde(default)]
    pub category: String,

    /// Description entered by the user
    #[serde(default)]
    pub description: String,

    /// Calendar day of the event
    #[serde(with = "date::lenient")]
    pub date: NaiveDate,

    /// Repeat cadence when this is a recurring template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    /// Income already reflected in an account balance
    #[serde(default)]
    pub is_included_in_account_balance: bool,
}

impl Transaction {
    fn new(
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount: amount.abs(),
            category: category.into(),
            description: description.into(),
            date,
            recurrence: None,
            is_included_in_account_balance: false,
        }
    }

    /// Create an expense
    pub fn expense(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Expense, amount, category, description, date)
    }

    /// Create an income
    pub fn income(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionKind::Income, amount, category, description, date)
    }

    /// Mark as a recurring template
    pub fn recurring(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Mark income as already counted in an account balance
    pub fn included_in_balance(mut self) -> Self {
        self.is_included_in_account_balance = true;
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}] {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.category,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_constructors() {
        let txn = Transaction::expense(Money::from_units(12), "Food", "Lunch", test_date());
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert!(!txn.is_recurring());

        // Direction lives in the kind, never in the sign
        let inc = Transaction::income(Money::from_units(-5), "Salary", "", test_date());
        assert_eq!(inc.amount, Money::from_units(5));
        assert!(inc.is_income());
    }

    #[test]
    fn test_recurrence() {
        let rent = Transaction::expense(Money::from_units(900), "Rent", "", test_date())
            .recurring(Recurrence::Monthly);
        assert!(rent.is_recurring());
        assert_eq!(Recurrence::Biweekly.interval_days(), Some(14));
        assert_eq!(Recurrence::Yearly.interval_days(), None);
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "type": "expense",
            "amount": 1050,
            "category": "Food",
            "description": "Tacos",
            "date": "2025-01-15",
            "recurrence": "weekly",
            "isIncludedInAccountBalance": true
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount.cents(), 1050);
        assert_eq!(txn.date, test_date());
        assert_eq!(txn.recurrence, Some(Recurrence::Weekly));
        assert!(txn.is_included_in_account_balance);
    }

    #[test]
    fn test_serialization_round_trip() {
        let txn = Transaction::income(Money::from_units(100), "Salary", "Pay", test_date())
            .included_in_balance();
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains(r#""type":"income""#));
        assert!(json.contains(r#""date":"2025-01-15""#));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
