use crate::errors::{DeribitError, Result};
use crate::models::{OpenOrder, OrderBookSnapshot, PositionSnapshot};
use crate::telemetry::{latency, ErrorLog};
use crate::venue::rpc::{self, request_id};
use crate::venue::session::{self, Credentials, Session};
use crate::venue::transport::Transport;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Client for the venue's JSON-RPC trading API.
///
/// Owns the session token and the error log explicitly — no process-global
/// state, so isolated clients can coexist (and be tested) independently.
/// Strictly single-flight: every call blocks its caller until the venue
/// answers, and no retry is ever attempted; a failed call is terminal for
/// that invocation.
pub struct DeribitClient {
    transport: Transport,
    session: Option<Session>,
    errors: ErrorLog,
}

impl DeribitClient {
    pub fn new(api_url: String, max_log_entries: usize) -> Self {
        Self {
            transport: Transport::new(api_url),
            session: None,
            errors: ErrorLog::new(max_log_entries),
        }
    }

    /// Exchange client credentials for an access token via `public/auth`.
    ///
    /// On success the token is held for the rest of the process; there is no
    /// refresh. A response without `result.access_token` is an auth failure,
    /// logged and returned, and no session is established.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<String> {
        latency::measured("authenticate", async {
            let params = session::auth_params(credentials);
            let result = self
                .call("public/auth", params, request_id::AUTH, false)
                .await?;

            match session::extract_access_token(&result) {
                Ok(token) => {
                    debug!("Access token obtained");
                    self.session = Some(Session::new(token.clone()));
                    Ok(token)
                }
                Err(e) => {
                    warn!("Authentication failed: {}", e);
                    self.errors.append(e.to_string());
                    Err(e)
                }
            }
        })
        .await
    }

    /// Place a limit buy order. The raw `result` payload is passed through
    /// for the caller to display; no local order state is kept.
    pub async fn place_order(
        &self,
        instrument: &str,
        price: Decimal,
        amount: Decimal,
    ) -> Result<Value> {
        latency::measured("place_order", async {
            let params = json!({
                "instrument_name": instrument,
                "type": "limit",
                "price": price,
                "amount": amount,
            });
            self.call("private/buy", params, request_id::BUY, true).await
        })
        .await
    }

    /// Cancel an open order by id
    pub async fn cancel_order(&self, order_id: &str) -> Result<Value> {
        latency::measured("cancel_order", async {
            let params = json!({ "order_id": order_id });
            self.call("private/cancel", params, request_id::CANCEL, true)
                .await
        })
        .await
    }

    /// Modify an open order's amount and price
    pub async fn modify_order(
        &self,
        order_id: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Result<Value> {
        latency::measured("modify_order", async {
            let params = json!({
                "order_id": order_id,
                "amount": amount,
                "price": price,
            });
            self.call("private/edit", params, request_id::EDIT, true)
                .await
        })
        .await
    }

    /// Fetch the order book for one instrument, in venue-returned order
    pub async fn get_order_book(&self, instrument: &str) -> Result<OrderBookSnapshot> {
        latency::measured("get_order_book", async {
            let params = json!({ "instrument_name": instrument });
            let result = self
                .call(
                    "public/get_order_book",
                    params,
                    request_id::ORDER_BOOK,
                    false,
                )
                .await?;
            self.decode(result)
        })
        .await
    }

    /// Fetch position details for one instrument, passed through unvalidated
    pub async fn get_position(&self, instrument: &str) -> Result<PositionSnapshot> {
        latency::measured("get_position", async {
            let params = json!({ "instrument_name": instrument });
            let result = self
                .call("private/get_position", params, request_id::POSITION, true)
                .await?;
            self.decode(result)
        })
        .await
    }

    /// List open limit orders on futures, in venue-returned order
    pub async fn get_open_orders(&self) -> Result<Vec<OpenOrder>> {
        latency::measured("get_open_orders", async {
            let params = json!({ "kind": "future", "type": "limit" });
            let result = self
                .call(
                    "private/get_open_orders",
                    params,
                    request_id::OPEN_ORDERS,
                    true,
                )
                .await?;
            self.decode(result)
        })
        .await
    }

    /// All failure descriptions recorded so far, oldest first
    pub fn error_log(&self) -> Vec<String> {
        self.errors.entries()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Shared request cycle for every handler: build the envelope, send it,
    /// classify the outcome. Every failure — transport, parse, venue
    /// rejection, malformed envelope — is appended to the error log exactly
    /// once and returned; nothing propagates as a panic.
    async fn call(&self, method: &str, params: Value, id: u64, private: bool) -> Result<Value> {
        if private && self.session.is_none() {
            let err = DeribitError::AuthError(format!(
                "No session token, cannot call {}; authenticate first",
                method
            ));
            warn!("{}", err);
            self.errors.append(err.to_string());
            return Err(err);
        }

        let request = rpc::build_request(method, params, id);
        // Reference behavior: the token, once present, is forwarded on
        // public endpoints too.
        let bearer = self.session.as_ref().map(|s| s.access_token.as_str());

        let body = match self.transport.post(method, &request, bearer).await {
            Ok(body) => body,
            Err(e) => {
                warn!("{} transport failure: {}", method, e);
                self.errors.append(e.to_string());
                return Err(e);
            }
        };

        match rpc::classify(&body) {
            Ok(result) => Ok(result),
            Err(DeribitError::VenueError(payload)) => {
                warn!("{} rejected by venue: {}", method, payload);
                // The error payload goes into the log verbatim
                self.errors.append(payload.to_string());
                Err(DeribitError::VenueError(payload))
            }
            Err(e) => {
                warn!("{} returned an unusable body: {}", method, e);
                self.errors.append(e.to_string());
                Err(e)
            }
        }
    }

    /// Decode an action's `result` payload into its typed shape, logging a
    /// decode failure like any other parse failure
    fn decode<T: DeserializeOwned>(&self, result: Value) -> Result<T> {
        serde_json::from_value(result).map_err(|e| {
            let err = DeribitError::ParseError(e);
            warn!("Unexpected result shape: {}", err);
            self.errors.append(err.to_string());
            err
        })
    }
}
