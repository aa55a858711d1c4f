//! Displays every account known to the account service.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    accounts_loader::{AccountsLoader, LoadState},
    bank::{Account, BankClient},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, form_error,
        format_currency, loading_spinner,
    },
    navigation::NavBar,
};

pub const NO_ACCOUNTS_MESSAGE: &str = "No accounts found";

fn account_row(account: &Account) -> Markup {
    let dashboard_url =
        format_endpoint(endpoints::DASHBOARD_VIEW, &[account.account_number.as_str()]);

    html! {
        li class="flex items-center justify-between py-3 border-b border-gray-200 dark:border-gray-700"
        {
            div
            {
                a href=(dashboard_url) class=(format!("font-medium {LINK_STYLE}"))
                {
                    (account.owner_name)
                }
                p class="text-xs font-mono text-gray-500 dark:text-gray-400"
                {
                    (account.account_number)
                }
            }

            span class="tabular-nums font-semibold" { (format_currency(account.balance)) }
        }
    }
}

/// The list of accounts for `state`, replaced wholesale by the refresh button.
fn accounts_list(state: &LoadState) -> Markup {
    html! {
        div id="accounts-list"
        {
            @match state {
                LoadState::Idle | LoadState::Loading => {
                    p class="text-center py-6" { (loading_spinner()) }
                }
                LoadState::Ready(accounts) if accounts.is_empty() => {
                    p id="no-accounts" class="text-center py-6 text-gray-500 dark:text-gray-400"
                    {
                        (NO_ACCOUNTS_MESSAGE)
                    }
                }
                LoadState::Ready(accounts) => {
                    ul id="accounts"
                    {
                        @for account in accounts {
                            (account_row(account))
                        }
                    }
                }
                LoadState::Failed(message) => {
                    (form_error(message))
                }
            }
        }
    }
}

fn accounts_view(state: &LoadState) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW, None).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class=(CARD_STYLE)
            {
                header class="flex justify-between flex-wrap items-end mb-4"
                {
                    h1 class="text-xl font-bold" { "Accounts" }

                    a href=(endpoints::CREATE_ACCOUNT_VIEW) class=(LINK_STYLE)
                    {
                        "Create New Account"
                    }
                }

                (accounts_list(state))

                button
                    type="button"
                    id="refresh-button"
                    hx-get=(endpoints::ACCOUNTS_LIST)
                    hx-target="#accounts-list"
                    hx-swap="outerHTML"
                    hx-indicator="#indicator"
                    hx-disabled-elt="this"
                    class=(format!("{BUTTON_PRIMARY_STYLE} mt-4"))
                {
                    span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                    "Refresh"
                }
            }
        }
    };

    base("Accounts", &[], &content)
}

/// Renders the accounts page showing all accounts.
pub async fn get_accounts_page(State(client): State<BankClient>) -> Response {
    let state = AccountsLoader::new(&client).load().await;

    accounts_view(&state).into_response()
}

/// Renders a freshly loaded list of accounts for the refresh button.
pub async fn get_accounts_list(State(client): State<BankClient>) -> Response {
    let state = AccountsLoader::new(&client).refresh().await;

    accounts_list(&state).into_response()
}
