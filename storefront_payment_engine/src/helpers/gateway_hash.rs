//! # Gateway integrity hashes
//!
//! The hosted-payment-page gateway protects both legs of the round trip with a SHA-512 digest over a
//! pipe-separated field sequence.
//!
//! ## Request hash
//!
//! Computed at initiation and embedded in the redirect form. The field order is fixed by the gateway's
//! verification algorithm:
//!
//! ```text
//!     key|txnid|amount|productinfo|firstname|email|udf1|udf2|udf3|udf4|udf5||||||salt
//! ```
//!
//! where `amount` is the two-decimal rendering of the total (`150.50`, never `150.5`), `udf1` carries our
//! order id as a correlation token, `udf2..udf5` are empty, and the six trailing separators stand for the
//! five unused extension fields. Any deviation in field order or separator count produces a form the gateway
//! rejects as tampered.
//!
//! ## Response hash
//!
//! The gateway signs its callbacks with the documented reverse formula, which mirrors the request sequence
//! with the transaction `status` inserted after the salt:
//!
//! ```text
//!     salt|status|||||||udf5|udf4|udf3|udf2|udf1|email|firstname|productinfo|amount|txnid|key
//! ```
//!
//! Verifying this digest before trusting `status` is what makes forged callbacks detectable.
//! Both digests are hex-encoded in lowercase.

use sha2::{Digest, Sha512};

/// The callback/request fields that participate in the digest, borrowed from whichever representation the
/// caller has at hand (the initiation request or the parsed callback body).
#[derive(Debug, Clone, Copy, Default)]
pub struct HashFields<'a> {
    pub txnid: &'a str,
    /// The two-decimal amount string, exactly as sent to (or received from) the gateway.
    pub amount: &'a str,
    pub productinfo: &'a str,
    pub firstname: &'a str,
    pub email: &'a str,
    /// udf1..udf5. udf1 carries the order id; the rest are unused and empty.
    pub udf: [&'a str; 5],
}

/// The digest embedded in the outbound payment form.
pub fn request_hash(key: &str, fields: &HashFields<'_>, salt: &str) -> String {
    let [udf1, udf2, udf3, udf4, udf5] = fields.udf;
    let sequence = [
        key,
        fields.txnid,
        fields.amount,
        fields.productinfo,
        fields.firstname,
        fields.email,
        udf1,
        udf2,
        udf3,
        udf4,
        udf5,
        "",
        "",
        "",
        "",
        "",
        salt,
    ];
    sha512_hex(&sequence.join("|"))
}

/// The digest the gateway attaches to success and failure callbacks.
pub fn response_hash(key: &str, fields: &HashFields<'_>, status: &str, salt: &str) -> String {
    let [udf1, udf2, udf3, udf4, udf5] = fields.udf;
    let sequence = [
        salt,
        status,
        "",
        "",
        "",
        "",
        "",
        udf5,
        udf4,
        udf3,
        udf2,
        udf1,
        fields.email,
        fields.firstname,
        fields.productinfo,
        fields.amount,
        fields.txnid,
        key,
    ];
    sha512_hex(&sequence.join("|"))
}

/// Checks a callback's `hash` field against the reverse formula. An absent hash never verifies.
pub fn verify_response_hash(key: &str, fields: &HashFields<'_>, status: &str, salt: &str, provided: &str) -> bool {
    !provided.is_empty() && response_hash(key, fields, status, salt).eq_ignore_ascii_case(provided)
}

fn sha512_hex(data: &str) -> String {
    let digest = Sha512::digest(data.as_bytes());
    hex::encode(digest)
}
