#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod server;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::assert_valid_html;
pub(crate) use server::get_test_app;
