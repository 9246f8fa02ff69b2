/*
[INPUT]:  Serialized form body and secret key bytes
[OUTPUT]: Hex HMAC-SHA512 signature for the `Sign` header
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use crate::http::{BtceError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Signs HTTP request bodies for the trade endpoint
pub struct RequestSigner {
    secret_key: Vec<u8>,
}

impl RequestSigner {
    /// Create a new request signer from the raw secret key
    pub fn new(secret_key: impl AsRef<[u8]>) -> Self {
        Self {
            secret_key: secret_key.as_ref().to_vec(),
        }
    }

    /// HMAC-SHA512 over the exact body bytes, lower-case hex
    pub fn generate_signature(&self, body: &str) -> Result<String> {
        let mut mac = HmacSha512::new_from_slice(&self.secret_key)
            .map_err(|e| BtceError::Signing(format!("HMAC setup failed: {e}")))?;
        mac.update(body.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
