use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request envelope
#[derive(Clone, Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

/// JSON-RPC 2.0 response envelope. Both branches are optional here;
/// classifying which one (if either) is present happens in `venue::rpc`.
#[derive(Clone, Debug, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: Option<String>,
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<Value>,
}

/// One price level of the book, decoded from the venue's `[price, amount]` pairs
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "(Decimal, Decimal)")]
pub struct BookLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

impl From<(Decimal, Decimal)> for BookLevel {
    fn from((price, amount): (Decimal, Decimal)) -> Self {
        Self { price, amount }
    }
}

/// Order book snapshot for one instrument, in venue-returned order
#[derive(Clone, Debug, Deserialize)]
pub struct OrderBookSnapshot {
    pub best_bid_price: Option<Decimal>,
    pub best_bid_amount: Option<Decimal>,
    pub best_ask_price: Option<Decimal>,
    pub best_ask_amount: Option<Decimal>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    pub mark_price: Option<Decimal>,
    pub open_interest: Option<Decimal>,
    pub timestamp: Option<u64>,
}

/// Position details for one instrument, passed through as reported by the venue
#[derive(Clone, Debug, Deserialize)]
pub struct PositionSnapshot {
    pub instrument_name: Option<String>,
    pub estimated_liquidation_price: Option<Decimal>,
    pub size_currency: Option<Decimal>,
    pub realized_funding: Option<Decimal>,
    pub total_profit_loss: Option<Decimal>,
    pub realized_profit_loss: Option<Decimal>,
    pub floating_profit_loss: Option<Decimal>,
    pub leverage: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub delta: Option<Decimal>,
    pub interest_value: Option<Decimal>,
    pub mark_price: Option<Decimal>,
    pub settlement_price: Option<Decimal>,
    pub index_price: Option<Decimal>,
    pub direction: Option<String>,
    pub open_orders_margin: Option<Decimal>,
    pub initial_margin: Option<Decimal>,
    pub maintenance_margin: Option<Decimal>,
    pub kind: Option<String>,
    pub size: Option<Decimal>,
}

/// One open order summary
#[derive(Clone, Debug, Deserialize)]
pub struct OpenOrder {
    pub instrument_name: String,
    pub order_id: String,
    pub price: Decimal,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_book_deserialization() {
        let body = serde_json::json!({
            "best_bid_price": 49990.0,
            "best_bid_amount": 20.0,
            "best_ask_price": 50010.0,
            "best_ask_amount": 30.0,
            "asks": [[50010.0, 30.0], [50020.0, 10.0]],
            "bids": [[49990.0, 20.0]],
            "mark_price": 50000.5,
            "open_interest": 12345.0,
            "timestamp": 1700000000000u64
        });

        let book: OrderBookSnapshot = serde_json::from_value(body).unwrap();
        assert_eq!(book.best_bid_price, Some(dec!(49990)));
        assert_eq!(book.asks.len(), 2);
        assert_eq!(book.asks[0].price, dec!(50010));
        assert_eq!(book.asks[0].amount, dec!(30));
        // Venue ordering is preserved, no local re-sorting
        assert_eq!(book.asks[1].price, dec!(50020));
        assert_eq!(book.timestamp, Some(1700000000000));
    }

    #[test]
    fn test_order_book_missing_fields() {
        let book: OrderBookSnapshot = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(book.best_bid_price.is_none());
        assert!(book.asks.is_empty());
    }

    #[test]
    fn test_open_order_deserialization() {
        let body = serde_json::json!({
            "instrument_name": "BTC-PERPETUAL",
            "order_id": "42",
            "price": 50000,
            "amount": 10,
            "direction": "buy"
        });

        let order: OpenOrder = serde_json::from_value(body).unwrap();
        assert_eq!(order.order_id, "42");
        assert_eq!(order.price, dec!(50000));
        assert_eq!(order.amount, dec!(10));
    }

    #[test]
    fn test_position_null_liquidation_price() {
        let body = serde_json::json!({
            "instrument_name": "BTC-PERPETUAL",
            "estimated_liquidation_price": null,
            "size": 0.0,
            "direction": "zero",
            "kind": "future"
        });

        let position: PositionSnapshot = serde_json::from_value(body).unwrap();
        assert!(position.estimated_liquidation_price.is_none());
        assert_eq!(position.direction.as_deref(), Some("zero"));
    }
}
