//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    accounts_page::{get_accounts_list, get_accounts_page},
    create_account::{create_account_endpoint, get_create_account_page},
    dashboard::{get_dashboard_page, get_history_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    log_in::{get_log_in_page, post_log_in},
    not_found::get_404_not_found,
    transaction_form::{
        get_transaction_page, post_balance_preview, post_transaction, post_verify_destination,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::CREATE_ACCOUNT_VIEW, get(get_create_account_page))
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::ACCOUNTS_LIST, get(get_accounts_list))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::HISTORY_VIEW, get(get_history_page))
        .route(endpoints::TRANSACTION_VIEW, get(get_transaction_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // These routes are posted to by htmx and answer with fragments or an HX-Redirect.
    let form_routes = Router::new()
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(endpoints::TRANSACTION_API, post(post_transaction))
        .route(endpoints::BALANCE_PREVIEW_API, post(post_balance_preview))
        .route(
            endpoints::VERIFY_DESTINATION_API,
            post(post_verify_destination),
        );

    page_routes
        .merge(form_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the log-in page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LOG_IN_VIEW)
}
