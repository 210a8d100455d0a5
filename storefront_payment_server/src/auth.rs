//! Storefront session authentication.
//!
//! Checkout endpoints identify the shopper through a signed session cookie rather than a login flow of their
//! own. The storefront issues the cookie at sign-in; its value is `customer_id:tag`, where `tag` is the
//! base64-encoded HMAC-SHA256 of the customer id under [`SessionConfig::secret`]. The [`ShopperSession`]
//! extractor verifies the tag and rejects the request with a 401 otherwise.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sps_common::Secret;

use crate::{config::SessionConfig, errors::ServerError};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "sps_session";

/// The authenticated shopper attached to a request. Extracting this from a request without a valid
/// session cookie fails with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct ShopperSession {
    pub customer_id: String,
}

impl FromRequest for ShopperSession {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_session(req))
    }
}

fn extract_session(req: &HttpRequest) -> Result<ShopperSession, ServerError> {
    let config = req
        .app_data::<web::Data<SessionConfig>>()
        .ok_or_else(|| ServerError::InitializeError("The session configuration is not loaded".to_string()))?;
    let cookie = req.cookie(SESSION_COOKIE).ok_or(ServerError::Unauthorized)?;
    let customer_id = verify_session_value(cookie.value(), &config.secret).ok_or(ServerError::Unauthorized)?;
    Ok(ShopperSession { customer_id })
}

/// Produces a signed cookie value for the given customer id. The storefront calls this at sign-in.
pub fn sign_session_value(customer_id: &str, secret: &Secret<String>) -> String {
    format!("{customer_id}:{}", session_tag(customer_id, secret))
}

/// Returns the customer id if `value` carries a valid signature, and `None` otherwise.
pub fn verify_session_value(value: &str, secret: &Secret<String>) -> Option<String> {
    let (customer_id, tag) = value.rsplit_once(':')?;
    if customer_id.is_empty() {
        return None;
    }
    let sig = base64::decode(tag).ok()?;
    let mut mac = new_mac(secret);
    mac.update(customer_id.as_bytes());
    mac.verify_slice(&sig).ok()?;
    Some(customer_id.to_string())
}

fn session_tag(customer_id: &str, secret: &Secret<String>) -> String {
    let mut mac = new_mac(secret);
    mac.update(customer_id.as_bytes());
    base64::encode(mac.finalize().into_bytes())
}

fn new_mac(secret: &Secret<String>) -> HmacSha256 {
    // HMAC accepts keys of any length, so this cannot fail.
    HmacSha256::new_from_slice(secret.expose().as_bytes()).expect("HMAC can take a key of any size")
}
