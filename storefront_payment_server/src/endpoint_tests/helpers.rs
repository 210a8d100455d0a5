use actix_web::{
    cookie::Cookie,
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{TimeZone, Utc};
use sps_common::{Rupees, Secret};
use storefront_payment_engine::{
    db_types::{Order, OrderId, OrderItem, OrderStatusType, Payment, PaymentMethod, PaymentStatusType},
    helpers::gateway_hash::{response_hash, HashFields},
};

use crate::{
    auth::{sign_session_value, SESSION_COOKIE},
    config::{PayuConfig, SessionConfig},
};

pub const CUSTOMER: &str = "cust-42";
pub const ORDER_ID: &str = "65f1c0ffee00ddba11ad0b01";
pub const TXNID: &str = "txn17000000000001234";

// Test fixtures only. DO NOT re-use these secrets anywhere.
pub fn session_config() -> SessionConfig {
    SessionConfig { secret: Secret::new("0f64c57ff74e2eda4a24d0f0c2e1b7a1".to_string()) }
}

pub fn payu_config() -> PayuConfig {
    PayuConfig {
        merchant_key: "gtKFFx".to_string(),
        merchant_salt: Secret::new("eCwWELxi".to_string()),
        payment_url: "https://test.payu.in/_payment".to_string(),
        success_url: "https://shop.example.com/orders/payu/success".to_string(),
        failure_url: "https://shop.example.com/orders/payu/failure".to_string(),
        order_details_url: "/order-details.html".to_string(),
        verify_response_hash: true,
    }
}

pub fn session_cookie() -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE, sign_session_value(CUSTOMER, &session_config().secret))
}

pub fn order(method: PaymentMethod, payment_status: PaymentStatusType) -> Order {
    let order_status = match payment_status {
        PaymentStatusType::Paid => OrderStatusType::Processing,
        _ => OrderStatusType::Initiated,
    };
    Order {
        id: 1,
        order_id: OrderId(ORDER_ID.to_string()),
        customer_id: CUSTOMER.to_string(),
        total: Rupees::from_paise(15_050),
        payment_method: method,
        order_status,
        payment_status,
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap(),
    }
}

pub fn payment(status: PaymentStatusType) -> Payment {
    Payment {
        id: 1,
        order_id: OrderId(ORDER_ID.to_string()),
        customer_id: CUSTOMER.to_string(),
        method: PaymentMethod::PayU,
        status,
        amount: Rupees::from_paise(15_050),
        txnid: TXNID.to_string(),
        productinfo: "Storefront order".to_string(),
        gateway_txn_id: None,
        payment_mode: None,
        bank_reference: None,
        raw_response: None,
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap(),
    }
}

pub fn order_items() -> Vec<OrderItem> {
    vec![OrderItem {
        id: 1,
        order_id: OrderId(ORDER_ID.to_string()),
        product_id: "p9".to_string(),
        title: "Widget".to_string(),
        image: "/img/p9.png".to_string(),
        price: Rupees::from_paise(15_050),
        quantity: 1,
    }]
}

/// A urlencoded callback body carrying a valid response hash for the test merchant credentials.
pub fn signed_callback_body(status: &str, order_id: &str, txnid: &str) -> String {
    let config = payu_config();
    let fields = HashFields {
        txnid,
        amount: "150.50",
        productinfo: "Storefront order",
        firstname: "Asha",
        email: "asha@example.com",
        udf: [order_id, "", "", "", ""],
    };
    let hash = response_hash(&config.merchant_key, &fields, status, config.merchant_salt.expose());
    serde_urlencoded::to_string([
        ("mihpayid", "403993715531364325"),
        ("mode", "UPI"),
        ("status", status),
        ("txnid", txnid),
        ("amount", "150.50"),
        ("productinfo", "Storefront order"),
        ("firstname", "Asha"),
        ("email", "asha@example.com"),
        ("udf1", order_id),
        ("bank_ref_num", "BRN-0042"),
        ("hash", hash.as_str()),
    ])
    .expect("Failed to encode callback body")
}

pub enum Body {
    Json(serde_json::Value),
    Form(String),
}

pub async fn post_request(
    path: &str,
    cookie: Option<Cookie<'static>>,
    body: Body,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, HeaderMap, String) {
    let mut req = TestRequest::post().uri(path);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie);
    }
    let req = match body {
        Body::Json(value) => req.set_json(value),
        Body::Form(raw) => {
            req.insert_header(("Content-Type", "application/x-www-form-urlencoded")).set_payload(raw)
        },
    }
    .to_request();
    let app = App::new()
        .app_data(web::Data::new(session_config()))
        .app_data(web::Data::new(payu_config()))
        .configure(configure);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = test::read_body(res).await;
    (status, headers, String::from_utf8_lossy(&body).into_owned())
}
