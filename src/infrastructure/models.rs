use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::order::{LineItem, Order, OrderId};

/// Sorted set holding one member per order, scored by its id.
pub const ORDER_INDEX_KEY: &str = "orders";

pub fn order_key(id: OrderId) -> String {
    format!("order:{id}")
}

// ── Stored document ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDocument {
    pub item_id: Uuid,
    pub quantity: u64,
    pub price: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDocument {
    pub order_id: u64,
    pub customer_id: Uuid,
    pub line_items: Vec<LineItemDocument>,
    pub created_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderDocument {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.order_id,
            customer_id: o.customer_id,
            line_items: o
                .line_items
                .iter()
                .map(|l| LineItemDocument {
                    item_id: l.item_id,
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect(),
            created_at: o.created_at,
            shipped_at: o.shipped_at,
            completed_at: o.completed_at,
            cancelled_at: o.cancelled_at,
        }
    }
}

impl From<OrderDocument> for Order {
    fn from(d: OrderDocument) -> Self {
        Self {
            order_id: d.order_id,
            customer_id: d.customer_id,
            line_items: d
                .line_items
                .into_iter()
                .map(|l| LineItem {
                    item_id: l.item_id,
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect(),
            created_at: d.created_at,
            shipped_at: d.shipped_at,
            completed_at: d.completed_at,
            cancelled_at: d.cancelled_at,
        }
    }
}

pub fn encode_order(order: &Order) -> Result<String, RepositoryError> {
    serde_json::to_string(&OrderDocument::from(order))
        .map_err(|e| RepositoryError::Encoding(e.to_string()))
}

pub fn decode_order(raw: &str) -> Result<Order, RepositoryError> {
    serde_json::from_str::<OrderDocument>(raw)
        .map(Order::from)
        .map_err(|e| RepositoryError::Decoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn sample() -> Order {
        Order::new(
            18_446_744_073_709_551_615,
            Uuid::new_v4(),
            vec![LineItem {
                item_id: Uuid::new_v4(),
                quantity: 3,
                price: 1_000_000,
            }],
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn key_is_decimal_id() {
        assert_eq!(order_key(7), "order:7");
        assert_eq!(order_key(u64::MAX), "order:18446744073709551615");
    }

    #[test]
    fn document_uses_wire_field_names() {
        let raw = encode_order(&sample()).unwrap();
        let v: Value = serde_json::from_str(&raw).unwrap();
        for field in [
            "order_id",
            "customer_id",
            "line_items",
            "created_at",
            "shipped_at",
            "completed_at",
            "cancelled_at",
        ] {
            assert!(v.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(v["order_id"], Value::from(u64::MAX));
        assert_eq!(v["shipped_at"], Value::Null);
        assert_eq!(v["line_items"][0]["quantity"], 3);
    }

    #[test]
    fn decode_restores_the_order() {
        let order = sample();
        let decoded = decode_order(&encode_order(&order).unwrap()).unwrap();
        assert_eq!(decoded, order);
    }

    #[test]
    fn corrupt_document_is_a_decoding_error() {
        let err = decode_order("{\"order_id\": \"nope\"}").unwrap_err();
        assert!(matches!(err, RepositoryError::Decoding(_)));
    }
}
