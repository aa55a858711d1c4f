//! Deposits, withdrawals and transfers: the form's rules and the page that hosts it.

mod intent;
mod page;

pub use intent::{
    FormPhase, Receipt, TransactionForm, TransactionKind, compute_balance_preview,
};
pub use page::{
    get_transaction_page, post_balance_preview, post_transaction, post_verify_destination,
};
