/*
[INPUT]:  Method name, pair and limit
[OUTPUT]: Market data (exchange info, ticker, trades, depth, fee)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{BtceError, BtceClient, Result};
use crate::types::{
    Depth, ExchangeInfo, PairFee, PerPair, PublicRequest, PublicTrade, Ticker,
    check_public_response,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

impl BtceClient {
    /// Call a public method and return the response body as-is
    ///
    /// POST /{method}/{pair}?limit={limit}
    pub async fn public_api_request(&self, request: PublicRequest) -> Result<Value> {
        let mut url = self.public_url(&request.path()?)?;
        url.query_pairs_mut()
            .append_pair("limit", &request.limit.to_string());

        debug!(method = %request.method, url = %url, "sending public api request");
        let payload: Value = self
            .public_request(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_public_response(payload)
    }

    async fn public_call<T: DeserializeOwned>(&self, request: PublicRequest) -> Result<T> {
        let payload = self.public_api_request(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Server time and per-pair trading rules
    ///
    /// POST /info
    pub async fn info(&self) -> Result<ExchangeInfo> {
        self.public_call(PublicRequest::new("info")).await
    }

    /// POST /ticker/{pair}
    pub async fn ticker(&self, pair: &str) -> Result<PerPair<Ticker>> {
        let pair = require_pair(pair)?;
        self.public_call(PublicRequest::new("ticker").with_pair(pair))
            .await
    }

    /// Latest trades, `limit` defaults to 150
    ///
    /// POST /trades/{pair}?limit={limit}
    pub async fn trades(&self, pair: &str, limit: Option<u32>) -> Result<PerPair<Vec<PublicTrade>>> {
        let pair = require_pair(pair)?;
        let mut request = PublicRequest::new("trades").with_pair(pair);
        if let Some(limit) = limit {
            request = request.with_limit(limit);
        }
        self.public_call(request).await
    }

    /// POST /depth/{pair}
    pub async fn depth(&self, pair: &str) -> Result<PerPair<Depth>> {
        let pair = require_pair(pair)?;
        self.public_call(PublicRequest::new("depth").with_pair(pair))
            .await
    }

    /// POST /fee/{pair}
    pub async fn fee(&self, pair: &str) -> Result<PerPair<PairFee>> {
        let pair = require_pair(pair)?;
        self.public_call(PublicRequest::new("fee").with_pair(pair))
            .await
    }
}

fn require_pair(pair: &str) -> Result<&str> {
    if pair.is_empty() {
        return Err(BtceError::MissingArgument("pair"));
    }
    Ok(pair)
}
