/*
[INPUT]:  Trade API parameters, credentials and the client nonce counter
[OUTPUT]: Unwrapped `return` payloads or structured errors
[POS]:    HTTP layer - trading endpoints (require keys + body signature)
[UPDATE]: When adding new trading endpoints or changing the signing flow
*/

use crate::http::{BtceError, BtceClient, Result};
use crate::types::{
    AccountInfo, CancelOrderResult, HistoryFilter, Orders, RequestParams, TradeHistory,
    TradeOutcome, TradeRequest, TradeResult, TransHistory,
};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl BtceClient {
    /// Send a signed call to the trade endpoint and return its `return` field.
    ///
    /// Each attempt stamps a fresh nonce onto `params`, signs the encoded
    /// body and posts it. A nonce rejection moves the counter to the value
    /// the server reports and starts over from the same `params`; any other
    /// `error` ends the call with the full response attached.
    pub async fn trade_api_request(&self, params: RequestParams) -> Result<Value> {
        let (public_key, signer) = self.signing_keys()?;
        let method = params.get("method").unwrap_or_default().to_string();
        let mut resyncs: u32 = 0;

        loop {
            let nonce = self.increment_nonce()?;
            let body = params.encode_with_nonce(nonce);
            let signature = signer.generate_signature(&body)?;

            debug!(method = %method, nonce, "sending trade api request");
            let payload: Value = self
                .trade_request()
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .header("Key", public_key)
                .header("Sign", signature)
                .body(body)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            match TradeOutcome::classify(payload)? {
                TradeOutcome::Success(result) => return Ok(result),
                TradeOutcome::Failed { message, payload } => {
                    return Err(BtceError::Remote { message, payload });
                }
                TradeOutcome::InvalidNonce { expected, payload } => {
                    if self.nonce_retry_limit().is_some_and(|limit| resyncs >= limit) {
                        return Err(BtceError::NonceRetriesExhausted {
                            attempts: resyncs,
                            payload,
                        });
                    }
                    warn!(method = %method, sent = nonce, expected, "nonce rejected, resynchronizing");
                    self.resync_nonce(expected);
                    resyncs += 1;
                }
            }
        }
    }

    async fn trade_call<T: DeserializeOwned>(&self, params: RequestParams) -> Result<T> {
        let result = self.trade_api_request(params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Balances, key rights and server time
    ///
    /// method=getInfo
    pub async fn get_info(&self) -> Result<AccountInfo> {
        self.trade_call(RequestParams::for_method("getInfo")).await
    }

    /// Deposit/withdrawal history
    ///
    /// method=TransHistory
    pub async fn trans_history(&self, filter: &HistoryFilter) -> Result<TransHistory> {
        let mut params = RequestParams::for_method("TransHistory");
        filter.append_to(&mut params);
        self.trade_call(params).await
    }

    /// Executed trades, optionally limited to one pair
    ///
    /// method=TradeHistory
    pub async fn trade_history(
        &self,
        filter: &HistoryFilter,
        pair: Option<&str>,
    ) -> Result<TradeHistory> {
        let mut params = RequestParams::for_method("TradeHistory");
        filter.append_to(&mut params);
        params.insert_opt("pair", pair);
        self.trade_call(params).await
    }

    /// method=OrderInfo
    pub async fn order_info(&self, order_id: u64) -> Result<Orders> {
        let params = order_params("OrderInfo", order_id)?;
        self.trade_call(params).await
    }

    /// Open orders, optionally limited to one pair
    ///
    /// method=ActiveOrders
    pub async fn active_orders(&self, pair: Option<&str>) -> Result<Orders> {
        let mut params = RequestParams::for_method("ActiveOrders");
        params.insert_opt("pair", pair);
        self.trade_call(params).await
    }

    /// Place a limit order
    ///
    /// method=Trade
    pub async fn trade(&self, request: TradeRequest) -> Result<TradeResult> {
        let params = request.into_params()?;
        self.trade_call(params).await
    }

    /// method=CancelOrder
    pub async fn cancel_order(&self, order_id: u64) -> Result<CancelOrderResult> {
        let params = order_params("CancelOrder", order_id)?;
        self.trade_call(params).await
    }
}

fn order_params(method: &str, order_id: u64) -> Result<RequestParams> {
    if order_id == 0 {
        return Err(BtceError::MissingArgument("order_id"));
    }
    let mut params = RequestParams::for_method(method);
    params.insert("order_id", order_id);
    Ok(params)
}
