use std::time::Duration;

use r2d2::{ManageConnection, Pool};
use redis::{Client, Connection, ConnectionLike, RedisError};

pub type RedisPool = Pool<RedisConnectionManager>;

/// Opens Redis connections whose every command is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct RedisConnectionManager {
    client: Client,
    timeout: Duration,
}

impl RedisConnectionManager {
    pub fn new(redis_url: &str, timeout: Duration) -> Result<Self, RedisError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            timeout,
        })
    }
}

impl ManageConnection for RedisConnectionManager {
    type Connection = Connection;
    type Error = RedisError;

    fn connect(&self) -> Result<Connection, RedisError> {
        let conn = self.client.get_connection_with_timeout(self.timeout)?;
        conn.set_read_timeout(Some(self.timeout))?;
        conn.set_write_timeout(Some(self.timeout))?;
        Ok(conn)
    }

    /// Runs on every checkout. UNWATCH doubles as the liveness check and
    /// clears any WATCH a previous borrower left armed; a connection that
    /// cannot do so is discarded instead of handed out.
    fn is_valid(&self, conn: &mut Connection) -> Result<(), RedisError> {
        redis::cmd("UNWATCH").query::<()>(conn)
    }

    fn has_broken(&self, conn: &mut Connection) -> bool {
        !conn.is_open()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("invalid redis url: {0}")]
    Client(#[from] RedisError),
    #[error("failed to build redis pool: {0}")]
    Pool(#[from] r2d2::Error),
}

pub fn create_pool(redis_url: &str, max_size: u32, timeout: Duration) -> Result<RedisPool, PoolError> {
    let manager = RedisConnectionManager::new(redis_url, timeout)?;
    Ok(Pool::builder()
        .max_size(max_size)
        .test_on_check_out(true)
        .connection_timeout(timeout)
        .build(manager)?)
}
