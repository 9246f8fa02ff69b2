/*
[INPUT]:  HTTP configuration (base URLs, timeouts), credentials, start nonce
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{BtceError, RequestSigner, Result};
use reqwest::{Client, RequestBuilder, Url};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Base URLs for the BTC-e API
const TRADE_BASE_URL: &str = "https://btc-e.nz/tapi/";
const PUBLIC_BASE_URL: &str = "https://btc-e.nz/api/3/";

const PUBLIC_KEY_ENV: &str = "BTCE_PUBLIC_KEY";
const SECRET_KEY_ENV: &str = "BTCE_SECRET_KEY";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub trade_base_url: String,
    pub public_base_url: String,
    /// Upper bound on nonce resynchronizations per call; `None` keeps
    /// retrying for as long as the server supplies a corrected nonce.
    pub nonce_retry_limit: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            trade_base_url: TRADE_BASE_URL.to_string(),
            public_base_url: PUBLIC_BASE_URL.to_string(),
            nonce_retry_limit: None,
        }
    }
}

/// Credentials for authenticated requests.
///
/// Either key may be absent; the trade endpoint reports which one is
/// missing when it is first used.
#[derive(Clone, Default)]
pub struct Credentials {
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            secret_key: Some(secret_key.into()),
        }
    }

    /// Read `BTCE_PUBLIC_KEY` / `BTCE_SECRET_KEY`; unset variables stay `None`
    pub fn from_env() -> Self {
        Self {
            public_key: std::env::var(PUBLIC_KEY_ENV).ok(),
            secret_key: std::env::var(SECRET_KEY_ENV).ok(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Main HTTP client for the BTC-e API.
///
/// The nonce counter is shared by every authenticated call made through this
/// instance. Calls are expected to be awaited one after another: two
/// concurrent calls still get distinct nonces, but nothing orders their
/// arrival at the exchange, so one of them may be rejected and resynced.
#[derive(Debug)]
pub struct BtceClient {
    http_client: Client,
    trade_base_url: Url,
    public_base_url: Url,
    credentials: Credentials,
    signer: Option<RequestSigner>,
    nonce: AtomicU64,
    nonce_retry_limit: Option<u32>,
}

impl BtceClient {
    /// Client for the public endpoint only
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), Credentials::default(), 0)
    }

    /// Client with keys, starting from the given nonce
    pub fn with_credentials(credentials: Credentials, nonce: u64) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credentials, nonce)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials, nonce: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BtceError::Config(format!("failed to build HTTP client: {e}")))?;

        let signer = credentials.secret_key.as_deref().map(RequestSigner::new);

        Ok(Self {
            http_client,
            trade_base_url: parse_base_url(&config.trade_base_url)?,
            public_base_url: parse_base_url(&config.public_base_url)?,
            credentials,
            signer,
            nonce: AtomicU64::new(nonce),
            nonce_retry_limit: config.nonce_retry_limit,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Pre-increment the nonce counter and return the new value
    pub(crate) fn increment_nonce(&self) -> Result<u64> {
        self.nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|_| BtceError::NonceOverflow)
    }

    /// Adopt the nonce the exchange reports as last seen
    pub(crate) fn resync_nonce(&self, value: u64) {
        self.nonce.store(value, Ordering::SeqCst);
    }

    pub(crate) fn nonce_retry_limit(&self) -> Option<u32> {
        self.nonce_retry_limit
    }

    /// Public key and signer, or the first missing credential
    pub(crate) fn signing_keys(&self) -> Result<(&str, &RequestSigner)> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(BtceError::MissingCredential("secret_key"))?;
        let public_key = self
            .credentials
            .public_key
            .as_deref()
            .ok_or(BtceError::MissingCredential("public_key"))?;
        Ok((public_key, signer))
    }

    /// POST request builder for the trade endpoint
    pub(crate) fn trade_request(&self) -> RequestBuilder {
        self.http_client.post(self.trade_base_url.clone())
    }

    /// Full URL for a public method path
    pub(crate) fn public_url(&self, path: &str) -> Result<Url> {
        Ok(self.public_base_url.join(path)?)
    }

    /// POST request builder for a public URL
    pub(crate) fn public_request(&self, url: Url) -> RequestBuilder {
        self.http_client.post(url)
    }
}

/// Base URLs must end with `/` for relative joins to append
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_pre_increments() {
        let client = BtceClient::with_credentials(Credentials::new("pk", "sk"), 0).unwrap();
        assert_eq!(client.increment_nonce().unwrap(), 1);
        assert_eq!(client.increment_nonce().unwrap(), 2);
    }

    #[test]
    fn test_nonce_starts_from_supplied_value() {
        let client = BtceClient::with_credentials(Credentials::new("pk", "sk"), 100).unwrap();
        assert_eq!(client.increment_nonce().unwrap(), 101);

        client.resync_nonce(42);
        assert_eq!(client.increment_nonce().unwrap(), 43);
    }

    #[test]
    fn test_exhausted_counter_fails_without_wrapping() {
        let client = BtceClient::with_credentials(Credentials::new("pk", "sk"), u64::MAX - 1).unwrap();
        assert_eq!(client.increment_nonce().unwrap(), u64::MAX);

        assert!(matches!(client.increment_nonce(), Err(BtceError::NonceOverflow)));
        assert!(matches!(client.increment_nonce(), Err(BtceError::NonceOverflow)));
    }

    #[test]
    fn test_missing_keys_are_reported_lazily() {
        let no_secret = BtceClient::with_credentials(
            Credentials {
                public_key: Some("pk".to_string()),
                secret_key: None,
            },
            0,
        )
        .expect("construction does not validate keys");
        assert!(matches!(
            no_secret.signing_keys(),
            Err(BtceError::MissingCredential("secret_key"))
        ));

        let no_public = BtceClient::with_credentials(
            Credentials {
                public_key: None,
                secret_key: Some("sk".to_string()),
            },
            0,
        )
        .unwrap();
        assert!(matches!(
            no_public.signing_keys(),
            Err(BtceError::MissingCredential("public_key"))
        ));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/api/3").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/3/");
        assert_eq!(
            url.join("ticker/btc_usd").unwrap().as_str(),
            "http://127.0.0.1:8080/api/3/ticker/btc_usd"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig {
            public_base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let result = BtceClient::with_config(config, Credentials::default(), 0);
        assert!(matches!(result, Err(BtceError::UrlParse(_))));
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let client = BtceClient::with_credentials(Credentials::new("pk", "very-secret"), 0).unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("pk"));
        assert!(!rendered.contains("very-secret"));
    }
}
