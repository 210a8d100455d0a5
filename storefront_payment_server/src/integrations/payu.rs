//! Glue between the HTTP layer and the PayU hosted-payment-page protocol.
//!
//! Initiation produces a signed, self-submitting HTML form; the shopper's browser posts it to the gateway,
//! which later posts its verdict back to the callback endpoints. The hash formulas themselves live in
//! [`storefront_payment_engine::helpers::gateway_hash`]; this module only assembles the fields.
use storefront_payment_engine::{
    db_types::{Order, Payment},
    helpers::gateway_hash::{request_hash, verify_response_hash, HashFields},
};

use crate::{config::PayuConfig, data_objects::{InitiatePaymentRequest, PayuCallback}};

/// Renders the payment form for a freshly initiated order. The order id travels in `udf1` so that the
/// callback can be correlated with the order without trusting any other field.
pub fn build_payment_form(
    config: &PayuConfig,
    order: &Order,
    payment: &Payment,
    request: &InitiatePaymentRequest,
) -> String {
    let amount = order.total.to_string();
    let fields = HashFields {
        txnid: &payment.txnid,
        amount: &amount,
        productinfo: &payment.productinfo,
        firstname: &request.firstname,
        email: &request.email,
        udf: [order.order_id.as_str(), "", "", "", ""],
    };
    let hash = request_hash(&config.merchant_key, &fields, config.merchant_salt.expose());
    let inputs = [
        ("key", config.merchant_key.as_str()),
        ("txnid", fields.txnid),
        ("amount", fields.amount),
        ("productinfo", fields.productinfo),
        ("firstname", fields.firstname),
        ("email", fields.email),
        ("phone", request.phone.as_str()),
        ("surl", config.success_url.as_str()),
        ("furl", config.failure_url.as_str()),
        ("udf1", fields.udf[0]),
        ("udf2", ""),
        ("udf3", ""),
        ("udf4", ""),
        ("udf5", ""),
        ("hash", hash.as_str()),
    ]
    .into_iter()
    .map(|(name, value)| format!(r#"<input type="hidden" name="{name}" value="{}" />"#, escape_attribute(value)))
    .collect::<Vec<_>>()
    .join("\n  ");
    format!(
        "<form id=\"payuForm\" method=\"post\" action=\"{action}\">\n  {inputs}\n</form>\n<script>document.\
         getElementById('payuForm').submit();</script>",
        action = escape_attribute(&config.payment_url)
    )
}

/// Checks the callback's integrity hash against the merchant salt. Always passes when verification is
/// disabled in the configuration.
pub fn verify_callback(config: &PayuConfig, callback: &PayuCallback) -> bool {
    if !config.verify_response_hash {
        return true;
    }
    verify_response_hash(
        &config.merchant_key,
        &callback.hash_fields(),
        &callback.status,
        config.merchant_salt.expose(),
        &callback.hash,
    )
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
