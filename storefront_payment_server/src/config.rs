use std::env;

use log::*;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sps_common::{helpers::env_flag, Secret};

use crate::errors::ServerError;

const DEFAULT_SPS_HOST: &str = "127.0.0.1";
const DEFAULT_SPS_PORT: u16 = 8480;
/// PayU's sandbox endpoint. Production deployments must override this with `SPS_PAYU_PAYMENT_URL`.
const DEFAULT_PAYU_PAYMENT_URL: &str = "https://test.payu.in/_payment";
const DEFAULT_ORDER_DETAILS_URL: &str = "/order-details.html";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session: SessionConfig,
    /// PayU merchant account and callback configuration.
    pub payu: PayuConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SPS_HOST.to_string(),
            port: DEFAULT_SPS_PORT,
            database_url: String::default(),
            session: SessionConfig::default(),
            payu: PayuConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SPS_HOST").ok().unwrap_or_else(|| DEFAULT_SPS_HOST.into());
        let port = env::var("SPS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SPS_PORT. {e} Using the default, {DEFAULT_SPS_PORT}, instead."
                    );
                    DEFAULT_SPS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SPS_PORT);
        let database_url = env::var("SPS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ SPS_DATABASE_URL is not set. Please set it to the URL for the storefront database.");
            String::default()
        });
        let session = SessionConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the session configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            SessionConfig::default()
        });
        let payu = PayuConfig::from_env_or_defaults(&host, port);
        Self { host, port, database_url, session, payu }
    }
}

//-------------------------------------------------  SessionConfig  ----------------------------------------------------
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The secret key used to sign storefront session cookies.
    pub secret: Secret<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The session signing secret has not been set. I'm using a random value for this session. DO NOT \
             operate on production like this, since every customer session dies with the process. Set \
             SPS_SESSION_SECRET instead. 🚨️🚨️🚨️"
        );
        let secret = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect::<String>();
        Self { secret: Secret::new(secret) }
    }
}

impl SessionConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = env::var("SPS_SESSION_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [SPS_SESSION_SECRET]")))?;
        if secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("SPS_SESSION_SECRET is empty".to_string()));
        }
        Ok(Self { secret: Secret::new(secret) })
    }
}

//-------------------------------------------------  PayuConfig  -------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct PayuConfig {
    /// The merchant key issued by PayU. Sent in the clear as the `key` form field.
    pub merchant_key: String,
    /// The merchant salt issued by PayU. Never leaves the server; only hashes derived from it do.
    pub merchant_salt: Secret<String>,
    /// The hosted payment page the storefront form posts to.
    pub payment_url: String,
    /// The absolute URL PayU redirects the shopper's browser to after a successful payment (`surl`).
    pub success_url: String,
    /// The absolute URL PayU redirects the shopper's browser to after a failed payment (`furl`).
    pub failure_url: String,
    /// The storefront page the server redirects to once a callback has been recorded.
    pub order_details_url: String,
    /// When true, callbacks with a missing or incorrect response hash are rejected with a 403.
    pub verify_response_hash: bool,
}

impl PayuConfig {
    pub fn from_env_or_defaults(host: &str, port: u16) -> Self {
        let merchant_key = env::var("SPS_PAYU_MERCHANT_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ SPS_PAYU_MERCHANT_KEY is not set. Please set it to your PayU merchant key.");
            String::default()
        });
        let merchant_salt = env::var("SPS_PAYU_MERCHANT_SALT").ok().unwrap_or_else(|| {
            error!("🪛️ SPS_PAYU_MERCHANT_SALT is not set. Please set it to your PayU merchant salt.");
            String::default()
        });
        let merchant_salt = Secret::new(merchant_salt);
        let payment_url = env::var("SPS_PAYU_PAYMENT_URL").ok().unwrap_or_else(|| {
            info!("🪛️ SPS_PAYU_PAYMENT_URL is not set. Using the sandbox endpoint, {DEFAULT_PAYU_PAYMENT_URL}.");
            DEFAULT_PAYU_PAYMENT_URL.to_string()
        });
        let success_url = env::var("SPS_PAYU_SUCCESS_URL").ok().unwrap_or_else(|| {
            let url = format!("http://{host}:{port}/orders/payu/success");
            info!("🪛️ SPS_PAYU_SUCCESS_URL is not set. Using {url}. PayU must be able to reach this address.");
            url
        });
        let failure_url = env::var("SPS_PAYU_FAILURE_URL").ok().unwrap_or_else(|| {
            let url = format!("http://{host}:{port}/orders/payu/failure");
            info!("🪛️ SPS_PAYU_FAILURE_URL is not set. Using {url}. PayU must be able to reach this address.");
            url
        });
        let order_details_url =
            env::var("SPS_ORDER_DETAILS_URL").ok().unwrap_or_else(|| DEFAULT_ORDER_DETAILS_URL.to_string());
        let verify_response_hash = env_flag("SPS_PAYU_VERIFY_RESPONSE_HASH", true);
        if !verify_response_hash {
            warn!(
                "🚨️ PayU response-hash verification is disabled. Anyone who can reach the callback endpoints can \
                 mark orders as paid. Do not run production like this."
            );
        }
        Self { merchant_key, merchant_salt, payment_url, success_url, failure_url, order_details_url, verify_response_hash }
    }
}
