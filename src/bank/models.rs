//! The data exchanged with the account service.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{bank::timestamp, money::Money};

/// A bank account as reported by the account service.
///
/// The front-end never changes an account itself, it only displays the copy it
/// was given and asks the account service for a fresh one when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The unique account number, e.g. "ACC1234567890".
    pub account_number: String,
    /// The name of the account holder.
    pub owner_name: String,
    /// The current balance, which may be negative.
    pub balance: Money,
    /// When the account was opened.
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
    /// The account's transactions, oldest first.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// The `count` most recent transactions, newest first.
    pub fn recent_transactions(&self, count: usize) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev().take(count)
    }
}

/// The kinds of transaction recorded by the account service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money paid into the account.
    Deposit,
    /// Money taken out of the account.
    Withdraw,
    /// Money moved to or from another account.
    #[serde(alias = "TRANSFER_IN", alias = "TRANSFER_OUT")]
    Transfer,
}

impl TransactionType {
    /// Whether the transaction added money to the account.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionType::Deposit)
    }

    /// The name shown next to the transaction, e.g. "Withdrawal".
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdraw => "Withdrawal",
            TransactionType::Transfer => "Transfer",
        }
    }
}

/// A single, immutable entry in an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The identifier assigned by the account service, e.g. "TXN000001".
    pub id: String,
    /// Some versions of the account service call this field `accountId`.
    #[serde(alias = "accountId", default)]
    pub account_number: String,
    /// Whether money came in, went out, or moved between accounts.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The (always positive) amount moved by the transaction.
    pub amount: Money,
    /// Free text entered by the customer, or a default such as "Deposit".
    #[serde(default)]
    pub description: String,
    /// When the account service recorded the transaction.
    #[serde(with = "timestamp")]
    pub timestamp: OffsetDateTime,
    /// An optional label assigned by the account service, e.g. "Income".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The request body for depositing into or withdrawing from an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// The amount to deposit or withdraw. Must be positive.
    pub amount: Money,
    /// The description stored with the transaction.
    pub description: String,
}

/// The request body for moving money between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// The account the money is taken from.
    pub from_account_number: String,
    /// The account the money is paid into.
    pub to_account_number: String,
    /// The amount to move. Must be positive.
    pub amount: Money,
    /// The description stored with both sides of the transfer.
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAccountRequest<'a> {
    pub owner_name: &'a str,
}
