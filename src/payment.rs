//! Payment gateway signature verification.
//!
//! The gateway signs `"<order_id>|<payment_id>"` with the merchant key secret
//! using HMAC-SHA256 and sends the hex digest back with the checkout result.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct PaymentVerifier {
    key_secret: Vec<u8>,
}

impl std::fmt::Debug for PaymentVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentVerifier")
            .field("key_secret", &"[REDACTED]")
            .finish()
    }
}

impl PaymentVerifier {
    pub fn new(key_secret: impl Into<Vec<u8>>) -> Self {
        Self { key_secret: key_secret.into() }
    }

    fn mac(&self, order_id: &str, payment_id: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.key_secret)
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        mac
    }

    /// Hex signature the gateway would produce for this pair.
    #[cfg(test)]
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        hex::encode(self.mac(order_id, payment_id).finalize().into_bytes())
    }

    /// Constant-time check of a hex signature.
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature.trim()) else {
            return false;
        };
        self.mac(order_id, payment_id).verify_slice(&expected).is_ok()
    }
}
