use std::sync::Arc;

use crate::core::invalidation::InvalidationSink;
use sqlx::{Pool, Postgres};

pub mod cli;
pub mod core;
#[cfg(test)]
pub mod factory;
pub mod model;
pub mod query;
pub mod repository;
pub mod schema;
pub mod service;
pub mod settings;

pub struct AppState {
    pub db: Pool<Postgres>,
    pub invalidation: Arc<dyn InvalidationSink>,
}

impl AppState {
    pub fn new(db: Pool<Postgres>, invalidation: Arc<dyn InvalidationSink>) -> Self {
        Self { db, invalidation }
    }
}
