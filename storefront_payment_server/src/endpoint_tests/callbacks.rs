use actix_web::{http::StatusCode, web};
use storefront_payment_engine::{
    db_types::{PaymentMethod, PaymentStatusType},
    traits::{Settlement, SettlementOutcome},
    OrderFlowApi,
};

use super::{
    helpers::{order, order_items, payment, post_request, signed_callback_body, Body, CUSTOMER, ORDER_ID, TXNID},
    mocks::MockDb,
};
use crate::routes::{PayuFailureRoute, PayuSuccessRoute};

fn location_of(headers: &actix_web::http::header::HeaderMap) -> &str {
    headers.get("Location").and_then(|v| v.to_str().ok()).expect("No Location header")
}

#[actix_web::test]
async fn success_callback_settles_and_redirects() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id()
        .withf(|id| id.as_str() == ORDER_ID)
        .returning(move |_| Ok(Some(order(PaymentMethod::PayU, PaymentStatusType::Initiated))));
    db.expect_settle_order()
        .withf(|id, settlement| id.as_str() == ORDER_ID && *settlement == Settlement::Success)
        .returning(|_, _| Ok(SettlementOutcome::Applied));
    db.expect_apply_gateway_update()
        .withf(|id, txnid, update| {
            id.as_str() == ORDER_ID &&
                txnid == TXNID &&
                update.status == PaymentStatusType::Paid &&
                update.gateway_txn_id.as_deref() == Some("403993715531364325") &&
                update.raw_response.contains("status=success")
        })
        .returning(move |_, _, _| Ok(Some(payment(PaymentStatusType::Paid))));
    db.expect_fetch_order_items().returning(move |_| Ok(order_items()));
    db.expect_remove_cart_items()
        .withf(|customer_id, products| customer_id == CUSTOMER && products == ["p9".to_string()])
        .returning(|_, _| Ok(1));

    let body = signed_callback_body("success", ORDER_ID, TXNID);
    let (status, headers, _) = post_request("/orders/payu/success", None, Body::Form(body), move |cfg| {
        cfg.service(PayuSuccessRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location_of(&headers), format!("/order-details.html?orderId={ORDER_ID}"));
}

#[actix_web::test]
async fn callback_with_a_forged_hash_is_rejected_before_any_lookup() {
    let _ = env_logger::try_init().ok();
    // No expectations: a rejected callback must not touch the database.
    let db = MockDb::new();
    let mut body = signed_callback_body("failure", ORDER_ID, TXNID);
    body = body.replace("status=failure", "status=success");
    let (status, _, response) = post_request("/orders/payu/success", None, Body::Form(body), move |cfg| {
        cfg.service(PayuSuccessRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(response.contains("signature is missing or invalid"), "unexpected body: {response}");
}

#[actix_web::test]
async fn callback_with_no_hash_is_rejected() {
    let _ = env_logger::try_init().ok();
    let db = MockDb::new();
    let body = format!("status=success&txnid={TXNID}&udf1={ORDER_ID}");
    let (status, _, _) = post_request("/orders/payu/success", None, Body::Form(body), move |cfg| {
        cfg.service(PayuSuccessRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn success_for_an_unknown_order_is_not_found() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    let body = signed_callback_body("success", ORDER_ID, TXNID);
    let (status, _, response) = post_request("/orders/payu/success", None, Body::Form(body), move |cfg| {
        cfg.service(PayuSuccessRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response.contains(ORDER_ID), "unexpected body: {response}");
}

#[actix_web::test]
async fn failure_for_an_unknown_order_still_redirects() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id().returning(|_| Ok(None));
    let body = signed_callback_body("failure", ORDER_ID, TXNID);
    let (status, headers, _) = post_request("/orders/payu/failure", None, Body::Form(body), move |cfg| {
        cfg.service(PayuFailureRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location_of(&headers), format!("/order-details.html?orderId={ORDER_ID}"));
}

#[actix_web::test]
async fn failure_callback_resets_the_order_and_redirects() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id()
        .returning(move |_| Ok(Some(order(PaymentMethod::PayU, PaymentStatusType::Initiated))));
    db.expect_settle_order()
        .withf(|id, settlement| id.as_str() == ORDER_ID && *settlement == Settlement::Failure)
        .returning(|_, _| Ok(SettlementOutcome::Applied));
    db.expect_apply_gateway_update()
        .withf(|_, _, update| update.status == PaymentStatusType::Failed)
        .returning(move |_, _, _| Ok(Some(payment(PaymentStatusType::Failed))));
    let body = signed_callback_body("failure", ORDER_ID, TXNID);
    let (status, headers, _) = post_request("/orders/payu/failure", None, Body::Form(body), move |cfg| {
        cfg.service(PayuFailureRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location_of(&headers), format!("/order-details.html?orderId={ORDER_ID}"));
}

#[actix_web::test]
async fn a_stale_failure_after_a_recorded_success_is_ignored() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id()
        .returning(move |_| Ok(Some(order(PaymentMethod::PayU, PaymentStatusType::Paid))));
    db.expect_settle_order().returning(|_, _| Ok(SettlementOutcome::Superseded));
    // No apply_gateway_update / remove_cart_items expectations: a superseded callback changes nothing.
    let body = signed_callback_body("failure", ORDER_ID, TXNID);
    let (status, headers, _) = post_request("/orders/payu/failure", None, Body::Form(body), move |cfg| {
        cfg.service(PayuFailureRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location_of(&headers), format!("/order-details.html?orderId={ORDER_ID}"));
}

#[actix_web::test]
async fn callbacks_for_cod_orders_are_ignored_but_redirect() {
    let _ = env_logger::try_init().ok();
    let mut db = MockDb::new();
    db.expect_fetch_order_by_order_id()
        .returning(move |_| Ok(Some(order(PaymentMethod::Cod, PaymentStatusType::Pending))));
    // No settle_order expectation: the reconciliation path never touches COD orders.
    let body = signed_callback_body("success", ORDER_ID, TXNID);
    let (status, headers, _) = post_request("/orders/payu/success", None, Body::Form(body), move |cfg| {
        cfg.service(PayuSuccessRoute::<MockDb>::new()).app_data(web::Data::new(OrderFlowApi::new(db)));
    })
    .await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location_of(&headers), format!("/order-details.html?orderId={ORDER_ID}"));
}
