#![allow(missing_docs)]

mod bank;
mod form;
mod html;
mod http;
mod service;

pub(crate) use bank::{FakeBank, test_account};
pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_texts, text_content,
};
pub(crate) use http::{
    assert_html_response, assert_redirects_to_dashboard, assert_status_ok,
    redirected_account_number,
};
pub(crate) use service::{FakeService, spawn_fake_service};
