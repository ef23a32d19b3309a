use redis::{Commands, Connection};

use crate::db::RedisPool;
use crate::domain::errors::RepositoryError;
use crate::domain::order::{Order, OrderId, OrderPage};
use crate::domain::pagination::{PageRequest, Pagination};
use crate::domain::ports::OrderRepository;

use super::models::{decode_order, encode_order, order_key, ORDER_INDEX_KEY};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<redis::RedisError> for RepositoryError {
    fn from(e: redis::RedisError) -> Self {
        RepositoryError::StoreUnavailable(e.to_string())
    }
}

impl From<r2d2::Error> for RepositoryError {
    fn from(e: r2d2::Error) -> Self {
        RepositoryError::StoreUnavailable(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Orders kept as JSON strings under `order:<id>`, plus a sorted set
/// (`orders`) whose members are those keys scored by id.
pub struct RedisOrderRepository {
    pool: RedisPool,
}

impl RedisOrderRepository {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Body of the WATCH .. EXEC window for `insert`. Any early return leaves
    /// the WATCH armed; the caller clears it.
    fn insert_watched(
        conn: &mut Connection,
        order: &Order,
        key: &str,
        payload: &str,
    ) -> Result<(), RepositoryError> {
        let exists: bool = conn.exists(key)?;
        if exists {
            return Err(RepositoryError::AlreadyExists(order.order_id));
        }

        // EXEC replies nil when the watched key was touched since WATCH.
        // Ids above 2^53 can share an f64 score; Redis then orders those
        // members by key text, which matches id order unless the tied ids
        // differ in decimal length.
        let committed: Option<(bool, u64)> = redis::pipe()
            .atomic()
            .set_nx(key, payload)
            .zadd(ORDER_INDEX_KEY, key, order.order_id as f64)
            .query(conn)?;

        match committed {
            Some((true, _)) => Ok(()),
            _ => Err(RepositoryError::AlreadyExists(order.order_id)),
        }
    }
}

impl OrderRepository for RedisOrderRepository {
    fn insert(&self, order: &Order) -> Result<(), RepositoryError> {
        let key = order_key(order.order_id);
        let payload = encode_order(order)?;
        let mut conn = self.pool.get()?;

        redis::cmd("WATCH").arg(&key).query::<()>(&mut *conn)?;
        let result = Self::insert_watched(&mut conn, order, &key, &payload);
        if result.is_err() {
            // If this fails the WATCH survives until the next checkout, where
            // the pool's UNWATCH check either clears it or drops the connection.
            let _ = redis::cmd("UNWATCH").query::<()>(&mut *conn);
        }
        result
    }

    fn find_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let mut conn = self.pool.get()?;

        let raw: Option<String> = conn.get(order_key(id))?;
        let Some(raw) = raw else {
            return Err(RepositoryError::NotFound(id));
        };

        decode_order(&raw)
    }

    fn find_all(&self, page: PageRequest) -> Result<OrderPage, RepositoryError> {
        let mut conn = self.pool.get()?;

        let total: u64 = conn.zcard(ORDER_INDEX_KEY)?;
        let pagination = Pagination::new(total, page);

        let Some((start, end)) = page.rank_range(total) else {
            return Ok(OrderPage {
                orders: vec![],
                pagination,
            });
        };

        let keys: Vec<String> = redis::cmd("ZRANGE")
            .arg(ORDER_INDEX_KEY)
            .arg(start)
            .arg(end)
            .query(&mut *conn)?;
        if keys.is_empty() {
            return Ok(OrderPage {
                orders: vec![],
                pagination,
            });
        }

        let values: Vec<Option<String>> = redis::cmd("MGET").arg(&keys).query(&mut *conn)?;

        let orders = keys
            .iter()
            .zip(values)
            .map(|(key, value)| match value {
                Some(raw) => decode_order(&raw),
                None => Err(RepositoryError::Decoding(format!(
                    "index entry {key} has no stored order"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderPage { orders, pagination })
    }

    fn update(&self, id: OrderId, order: &Order) -> Result<(), RepositoryError> {
        let payload = encode_order(order)?;
        let mut conn = self.pool.get()?;

        let written: Option<String> = redis::cmd("SET")
            .arg(order_key(id))
            .arg(payload)
            .arg("XX")
            .query(&mut *conn)?;

        match written {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let key = order_key(id);
        let mut conn = self.pool.get()?;

        let (deleted, _unindexed): (u64, u64) = redis::pipe()
            .atomic()
            .del(&key)
            .zrem(ORDER_INDEX_KEY, &key)
            .query(&mut *conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}
