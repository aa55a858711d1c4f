use axum::{body::Body, http::StatusCode, response::Response};

use crate::endpoints::{self, format_endpoint};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

/// Assert that `response` carries a maud page or fragment.
#[track_caller]
pub(crate) fn assert_html_response(response: &Response<Body>) {
    assert_eq!(header_value(response, "content-type"), "text/html; charset=utf-8");
}

/// The account number of the dashboard that htmx is told to open.
///
/// Panics unless `response` is a 303 with an `HX-Redirect` to a dashboard.
#[track_caller]
pub(crate) fn redirected_account_number(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = header_value(response, "hx-redirect");
    let dashboard_prefix = format_endpoint(endpoints::DASHBOARD_VIEW, &[""]);

    location
        .strip_prefix(&dashboard_prefix)
        .filter(|account_number| !account_number.is_empty())
        .unwrap_or_else(|| panic!("want a redirect to a dashboard, got {location:?}"))
        .to_owned()
}

#[track_caller]
pub(crate) fn assert_redirects_to_dashboard(response: &Response<Body>, account_number: &str) {
    assert_eq!(redirected_account_number(response), account_number);
}

#[track_caller]
fn header_value(response: &Response<Body>, header_name: &str) -> String {
    response
        .headers()
        .get(header_name)
        .unwrap_or_else(|| panic!("Headers missing {header_name}"))
        .to_str()
        .expect("Could not convert to str")
        .to_owned()
}
