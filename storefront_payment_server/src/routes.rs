//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, http::header, web, HttpResponse, Responder};
use log::*;
use storefront_payment_engine::{
    db_types::{NewOrder, OrderId},
    traits::StorefrontDatabase,
    CallbackResolution,
    GatewayCallback,
    OrderFlowApi,
    StorefrontApiError,
};

use crate::{
    auth::ShopperSession,
    config::PayuConfig,
    data_objects::{
        CodOrderRequest,
        CodOrderResponse,
        InitiatePaymentRequest,
        InitiatePaymentResponse,
        PayuCallback,
    },
    errors::ServerError,
    integrations::payu,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Checkout  ----------------------------------------------------

route!(create_cod_order => Post "/orders/cod" impl StorefrontDatabase);
/// Places a cash-on-delivery order for the authenticated shopper.
///
/// The order is persisted immediately with `payment_status = pending`; settlement happens on delivery,
/// outside this system. Purchased lines are pruned from the shopper's cart on a best-effort basis.
pub async fn create_cod_order<B: StorefrontDatabase>(
    session: ShopperSession,
    body: web::Json<CodOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    if request.items.is_empty() {
        return Err(ServerError::EmptyCart);
    }
    let items = request.items.into_iter().map(Into::into).collect();
    let new_order = NewOrder::cod(session.customer_id, items, request.total_amount);
    debug!("💻️ POST /orders/cod: {new_order}");
    let order = api.place_cod_order(new_order).await.map_err(|e| {
        error!("💻️ Could not place COD order. {e}");
        ServerError::BackendError("Failed to place the order".to_string())
    })?;
    Ok(HttpResponse::Created().json(CodOrderResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.order_id,
        order_status: order.order_status,
        payment_status: order.payment_status,
    }))
}

route!(initiate_payu_payment => Post "/orders/payu/initiate" impl StorefrontDatabase);
/// Creates a gateway-routed order and returns the signed payment form.
///
/// The order and its payment attempt are persisted *before* the form is returned, so every attempt the
/// shopper could possibly submit is already on record when the callback arrives.
pub async fn initiate_payu_payment<B: StorefrontDatabase>(
    session: ShopperSession,
    body: web::Json<InitiatePaymentRequest>,
    api: web::Data<OrderFlowApi<B>>,
    payu_config: web::Data<PayuConfig>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    if request.items.is_empty() {
        return Err(ServerError::EmptyCart);
    }
    let items = request.items.iter().cloned().map(Into::into).collect();
    let new_order = NewOrder::gateway(session.customer_id, items, request.total_amount);
    debug!("💻️ POST /orders/payu/initiate: {new_order}");
    let (order, payment) = api.initiate_gateway_payment(new_order, &request.productinfo).await.map_err(|e| {
        error!("💻️ Could not initiate gateway payment. {e}");
        ServerError::BackendError("Failed to initiate the payment".to_string())
    })?;
    let payu_form = payu::build_payment_form(payu_config.as_ref(), &order, &payment, &request);
    Ok(HttpResponse::Ok().json(InitiatePaymentResponse { payu_form }))
}

//----------------------------------------------   Callbacks  ----------------------------------------------------

route!(payu_success => Post "/orders/payu/success" impl StorefrontDatabase);
/// The gateway posts here when a payment succeeds. After verification and reconciliation, the shopper's
/// browser is redirected to the order-details page.
///
/// A success callback for an order we have no record of is a hard error (404): money may have moved and we
/// cannot account for it.
pub async fn payu_success<B: StorefrontDatabase>(
    body: web::Bytes,
    api: web::Data<OrderFlowApi<B>>,
    payu_config: web::Data<PayuConfig>,
) -> Result<HttpResponse, ServerError> {
    let callback = parse_and_verify_callback(&body, payu_config.as_ref())?;
    debug!("💻️ PayU success callback for order {} (txnid {})", callback.order_id, callback.txnid);
    match api.record_gateway_success(&callback).await {
        Ok(resolution) => Ok(redirect_to_order_details(&payu_config.order_details_url, resolution.order_id())),
        Err(StorefrontApiError::OrderNotFound(order_id)) => {
            warn!("💻️ Success callback for unknown order {order_id}. Manual review required.");
            Err(ServerError::NoRecordFound(format!("Order {order_id} not found")))
        },
        Err(e) => {
            error!("💻️ Could not record gateway success. {e}");
            Err(ServerError::BackendError("Failed to record the payment".to_string()))
        },
    }
}

route!(payu_failure => Post "/orders/payu/failure" impl StorefrontDatabase);
/// The gateway posts here when a payment fails or is cancelled. The order (if any) is reset so the shopper
/// can retry, and the browser is redirected to the order-details page either way.
pub async fn payu_failure<B: StorefrontDatabase>(
    body: web::Bytes,
    api: web::Data<OrderFlowApi<B>>,
    payu_config: web::Data<PayuConfig>,
) -> Result<HttpResponse, ServerError> {
    let callback = parse_and_verify_callback(&body, payu_config.as_ref())?;
    debug!("💻️ PayU failure callback for order {} (txnid {})", callback.order_id, callback.txnid);
    let resolution = api.record_gateway_failure(&callback).await.map_err(|e| {
        error!("💻️ Could not record gateway failure. {e}");
        ServerError::BackendError("Failed to record the payment failure".to_string())
    })?;
    if let CallbackResolution::UnknownOrder(order_id) = &resolution {
        info!("💻️ Failure callback for unknown order {order_id}. Nothing to do.");
    }
    Ok(redirect_to_order_details(&payu_config.order_details_url, resolution.order_id()))
}

/// Decodes the raw callback body and checks its integrity hash. The raw bytes are kept verbatim in the
/// resulting record; an invalid or missing hash fails with a 403 before any state is touched.
fn parse_and_verify_callback(body: &web::Bytes, config: &PayuConfig) -> Result<GatewayCallback, ServerError> {
    let raw = std::str::from_utf8(body).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    let callback = serde_urlencoded::from_str::<PayuCallback>(raw).map_err(|e| {
        debug!("💻️ Could not parse gateway callback. {e}");
        ServerError::CouldNotDeserializePayload
    })?;
    if !payu::verify_callback(config, &callback) {
        warn!(
            "🚨️ Rejecting a gateway callback with an invalid integrity hash (txnid {}, order {}).",
            callback.txnid, callback.udf1
        );
        return Err(ServerError::InvalidCallbackSignature);
    }
    Ok(callback.into_gateway_callback(raw.to_string()))
}

fn redirect_to_order_details(base_url: &str, order_id: &OrderId) -> HttpResponse {
    let location = format!("{base_url}?orderId={order_id}");
    HttpResponse::Found().insert_header((header::LOCATION, location)).finish()
}
