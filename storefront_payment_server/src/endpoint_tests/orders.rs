use actix_web::{http::StatusCode, web};
use serde_json::json;
use storefront_payment_engine::{
    db_types::{PaymentMethod, PaymentStatusType},
    OrderFlowApi,
};

use super::{
    helpers::{order, payment, post_request, session_cookie, Body, CUSTOMER, ORDER_ID},
    mocks::MockDb,
};
use crate::routes::{CreateCodOrderRoute, InitiatePayuPaymentRoute};

fn cod_body() -> serde_json::Value {
    json!({
        "items": [{"product": "p1", "title": "Widget", "price": 100.50, "quantity": 2}],
        "totalAmount": 201.0
    })
}

fn initiate_body() -> serde_json::Value {
    json!({
        "items": [{"product": "p9", "title": "Widget", "price": 150.50}],
        "totalAmount": 150.50,
        "productinfo": "Storefront order",
        "firstname": "Asha",
        "email": "asha@example.com",
        "phone": "9999999999"
    })
}

#[actix_web::test]
async fn cod_order_without_session_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let (status, _, body) = post_request("/orders/cod", None, Body::Json(cod_body()), move |cfg| {
        cfg.service(CreateCodOrderRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("A valid storefront session is required"), "unexpected body: {body}");
}

#[actix_web::test]
async fn cod_order_with_tampered_cookie_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let mut cookie = session_cookie();
    cookie.set_value(format!("cust-43:{}", cookie.value().rsplit_once(':').unwrap().1));
    let (status, _, _) = post_request("/orders/cod", Some(cookie), Body::Json(cod_body()), move |cfg| {
        cfg.service(CreateCodOrderRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn cod_order_with_no_items_is_rejected() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let body = json!({"items": [], "totalAmount": 0.0});
    let (status, _, body) = post_request("/orders/cod", Some(session_cookie()), Body::Json(body), move |cfg| {
        cfg.service(CreateCodOrderRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("The order contains no items"), "unexpected body: {body}");
}

#[actix_web::test]
async fn cod_order_with_unknown_fields_is_rejected() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let mut body = cod_body();
    body["couponCode"] = json!("FREESTUFF");
    let (status, _, _) = post_request("/orders/cod", Some(session_cookie()), Body::Json(body), move |cfg| {
        cfg.service(CreateCodOrderRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cod_order_is_created() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_insert_order().withf(|o| o.customer_id == CUSTOMER && o.items.len() == 1).returning(move |_| {
        Ok(order(PaymentMethod::Cod, PaymentStatusType::Pending))
    });
    db.expect_remove_cart_items()
        .withf(|customer_id, products| customer_id == CUSTOMER && products == ["p1".to_string()])
        .returning(|_, _| Ok(1));
    let (status, _, body) = post_request("/orders/cod", Some(session_cookie()), Body::Json(cod_body()), move |cfg| {
        cfg.service(CreateCodOrderRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains(r#""message":"Order placed successfully""#), "unexpected body: {body}");
    assert!(body.contains(&format!(r#""orderId":"{ORDER_ID}""#)), "unexpected body: {body}");
    assert!(body.contains(r#""orderStatus":"initiated""#), "unexpected body: {body}");
    assert!(body.contains(r#""paymentStatus":"pending""#), "unexpected body: {body}");
}

#[actix_web::test]
async fn initiation_persists_both_records_and_returns_a_signed_form() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_insert_order()
        .withf(|o| o.payment_method == PaymentMethod::PayU)
        .returning(move |_| Ok(order(PaymentMethod::PayU, PaymentStatusType::Initiated)));
    db.expect_insert_payment()
        .withf(|p| p.order_id.as_str() == ORDER_ID && p.productinfo == "Storefront order")
        .returning(move |_| Ok(payment(PaymentStatusType::Initiated)));
    let (status, _, body) =
        post_request("/orders/payu/initiate", Some(session_cookie()), Body::Json(initiate_body()), move |cfg| {
            cfg.service(InitiatePayuPaymentRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
        })
        .await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).expect("Response is not JSON");
    let form = response["payuForm"].as_str().expect("payuForm missing");
    assert!(form.contains(r#"action="https://test.payu.in/_payment""#));
    assert!(form.contains(r#"name="amount" value="150.50""#));
    assert!(form.contains(&format!(r#"name="udf1" value="{ORDER_ID}""#)));
    assert!(form.contains(r#"name="surl" value="https://shop.example.com/orders/payu/success""#));
    assert!(form.contains(r#"name="hash" value=""#));
}

#[actix_web::test]
async fn initiation_without_session_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let (status, _, _) = post_request("/orders/payu/initiate", None, Body::Json(initiate_body()), move |cfg| {
        cfg.service(InitiatePayuPaymentRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
