//! The dashboard for an account and the account's full transaction history.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    AppState, Error,
    bank::{Account, AccountApi, Transaction},
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, account_load_failed, base,
        format_currency, format_date, link,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction_form::TransactionKind,
};

/// How many transactions the dashboard shows before linking to the full history.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// Display the dashboard for the account in the path.
pub async fn get_dashboard_page(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezone(state.local_timezone).into_response(),
    };

    match state.bank_client.get_account_by_number(&account_number).await {
        Ok(account) => dashboard_view(&account, local_offset).into_response(),
        Err(error) => account_load_failed(&error),
    }
}

/// Display every transaction of the account in the path, newest first.
pub async fn get_history_page(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezone(state.local_timezone).into_response(),
    };

    match state.bank_client.get_account_by_number(&account_number).await {
        Ok(account) => history_view(&account, local_offset).into_response(),
        Err(error) => account_load_failed(&error),
    }
}

fn dashboard_view(account: &Account, local_offset: UtcOffset) -> Markup {
    let account_number = account.account_number.as_str();
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, Some(account_number)).into_html();
    let actions = [
        (TransactionKind::Deposit, "Add money to account"),
        (TransactionKind::Withdraw, "Take money out"),
        (TransactionKind::Transfer, "Send to another account"),
    ];

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full mb-6"
            {
                h1 class="text-2xl font-bold mb-1" { "Welcome back, " (account.owner_name) }
                p id="account-number" class="text-sm font-mono text-gray-500 dark:text-gray-400"
                {
                    (account_number)
                }
            }

            div class=(format!("{CARD_STYLE} mb-6 text-center"))
            {
                h2 class="text-sm font-medium uppercase tracking-wider mb-4" { "Current Balance" }
                p id="balance" class="text-4xl font-bold mb-2" { (format_currency(account.balance)) }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Account created " (format_date(account.created_at, local_offset))
                }
            }

            div class="grid w-full grid-cols-1 gap-4 mb-6 md:grid-cols-3"
            {
                @for (kind, blurb) in actions {
                    a
                        href=(format_endpoint(endpoints::TRANSACTION_VIEW, &[account_number, kind.as_str()]))
                        class=(format!("{CARD_STYLE} block hover:bg-gray-100 dark:hover:bg-gray-700"))
                    {
                        h3 class="font-semibold mb-1" { (kind.default_description()) }
                        p class="text-sm text-gray-500 dark:text-gray-400" { (blurb) }
                    }
                }
            }

            div class=(CARD_STYLE)
            {
                h2 class="text-xl font-bold mb-4" { "Recent Transactions" }

                (transaction_list(account.recent_transactions(RECENT_TRANSACTION_COUNT), local_offset))

                @if account.transactions.len() > RECENT_TRANSACTION_COUNT {
                    p class="pt-6 text-center"
                    {
                        (link(&format_endpoint(endpoints::HISTORY_VIEW, &[account_number]), "View all transactions"))
                    }
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}

fn history_view(account: &Account, local_offset: UtcOffset) -> Markup {
    let account_number = account.account_number.as_str();
    let nav_bar = NavBar::new(endpoints::HISTORY_VIEW, Some(account_number)).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class=(CARD_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "All Transactions" }

                (transaction_list(account.transactions.iter().rev(), local_offset))

                p class="pt-6 text-center"
                {
                    (link(&format_endpoint(endpoints::DASHBOARD_VIEW, &[account_number]), "Back to Dashboard"))
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn transaction_list<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    local_offset: UtcOffset,
) -> Markup {
    let mut transactions = transactions.peekable();

    if transactions.peek().is_none() {
        return html! {
            div id="no-transactions" class="text-center py-12"
            {
                p class="text-lg mb-2" { "No transactions yet" }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Start by making a deposit or transfer"
                }
            }
        };
    }

    html! {
        ul id="transactions" class="space-y-3"
        {
            @for transaction in transactions {
                (transaction_row(transaction, local_offset))
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let (sign, amount_style) = if transaction.type_.is_credit() {
        ("+", "text-green-600 dark:text-green-400")
    } else {
        ("-", "text-red-600 dark:text-red-400")
    };

    html! {
        li class="flex items-center justify-between py-2 border-b border-gray-200 dark:border-gray-700"
        {
            div
            {
                div class="flex items-center gap-2 mb-1"
                {
                    h4 class="font-medium" { (transaction.description) }

                    @if let Some(category) = &transaction.category {
                        span class=(BADGE_STYLE) { (category) }
                    }
                }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (transaction.type_.label()) " · " (format_date(transaction.timestamp, local_offset))
                }
            }

            span class=(format!("font-semibold text-lg {amount_style}"))
            {
                (sign) (format_currency(transaction.amount))
            }
        }
    }
}
