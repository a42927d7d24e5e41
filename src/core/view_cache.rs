use r2d2::Pool;
use redis::{Client, ConnectionLike};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use super::invalidation::{InvalidationEvent, InvalidationSink, ViewKey};

pub fn init_redis_pool(redis_url: &str) -> anyhow::Result<Pool<Client>> {
    let client = Client::open(redis_url)?;
    Ok(Pool::builder().build(client)?)
}

pub fn put_view<C: ConnectionLike, T: Serialize>(
    redis_conn: &mut C,
    key: &ViewKey,
    view: &T,
    ttl: u64,
) -> anyhow::Result<()> {
    let view_json = serde_json::to_string(view)?;
    redis::Cmd::set_ex(key.to_string(), view_json, ttl).exec(redis_conn)?;
    Ok(())
}

pub fn get_view<C: ConnectionLike, T: DeserializeOwned>(
    redis_conn: &mut C,
    key: &ViewKey,
) -> anyhow::Result<Option<T>> {
    let res: Option<String> = redis::cmd("get").arg(key.to_string()).query(redis_conn)?;
    let Some(res) = res else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(res.as_str())?))
}

pub fn remove_views<C: ConnectionLike>(redis_conn: &mut C, keys: &[ViewKey]) -> anyhow::Result<()> {
    for key in keys {
        redis::cmd("del").arg(key.to_string()).exec(redis_conn)?;
    }
    Ok(())
}

/// Rendered listing/detail views kept in redis by the calling layer.
#[derive(Clone)]
pub struct RedisViewCache {
    pub pool: Pool<Client>,
    pub ttl: u64,
}

impl RedisViewCache {
    pub fn new(pool: Pool<Client>, ttl: u64) -> Self {
        Self { pool, ttl }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &ViewKey) -> anyhow::Result<Option<T>> {
        let mut redis_conn = self.pool.get()?;
        get_view(&mut *redis_conn, key)
    }

    pub fn put<T: Serialize>(&self, key: &ViewKey, view: &T) -> anyhow::Result<()> {
        let mut redis_conn = self.pool.get()?;
        put_view(&mut *redis_conn, key, view, self.ttl)
    }
}

impl InvalidationSink for RedisViewCache {
    fn invalidate(&self, event: &InvalidationEvent) {
        let res = self
            .pool
            .get()
            .map_err(anyhow::Error::from)
            .and_then(|mut redis_conn| remove_views(&mut *redis_conn, &event.keys));
        match res {
            Ok(()) => info!("removed cached views {:?}", event.keys),
            Err(err) => error!("failed to remove cached views {:?}: {}", event.keys, err),
        }
    }
}
