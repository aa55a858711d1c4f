//! The URIs of the pages and form endpoints.
//!
//! For endpoints that take parameters, e.g., '/dashboard/{account_number}', use [format_endpoint].

/// The root route which redirects to the log in page.
pub const ROOT: &str = "/";
/// The page for logging in with an account number.
pub const LOG_IN_VIEW: &str = "/login";
/// The page for opening a new account.
pub const CREATE_ACCOUNT_VIEW: &str = "/create-account";
/// The page listing every account.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The freshly loaded list of accounts, swapped into the accounts page.
pub const ACCOUNTS_LIST: &str = "/accounts/list";
/// The landing page for an account.
pub const DASHBOARD_VIEW: &str = "/dashboard/{account_number}";
/// The full transaction history of an account.
pub const HISTORY_VIEW: &str = "/dashboard/{account_number}/transactions";
/// The form for a deposit, withdrawal or transfer.
pub const TRANSACTION_VIEW: &str = "/transaction/{account_number}/{kind}";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for logging in with an account number.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for opening an account.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route for submitting a deposit, withdrawal or transfer.
pub const TRANSACTION_API: &str = "/api/transaction/{account_number}/{kind}";
/// The route for previewing the balance after a transaction.
pub const BALANCE_PREVIEW_API: &str = "/api/transaction/{account_number}/{kind}/preview";
/// The route for checking the destination account of a transfer.
pub const VERIFY_DESTINATION_API: &str = "/api/transaction/{account_number}/{kind}/verify";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/dashboard/{account_number}',
/// '{account_number}' is the parameter.
///
/// Parameters without a matching value are left as they are, and extra values
/// are ignored. Values are inserted verbatim, so they should not contain '/'.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_length + 1;

        formatted.push_str(&rest[..param_start]);

        match values.next() {
            Some(value) => formatted.push_str(value),
            None => formatted.push_str(&rest[param_start..param_end]),
        }

        rest = &rest[param_end..];
    }

    formatted.push_str(rest);
    formatted
}
