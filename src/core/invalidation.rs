use std::fmt;

use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// The full profile listing.
    Listing,
    /// The detail view of one profile.
    Detail(i32),
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKey::Listing => write!(f, "profile:list"),
            ViewKey::Detail(id) => write!(f, "profile:detail:{}", id),
        }
    }
}

/// Emitted after a successful mutation, naming the views that went stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidationEvent {
    pub keys: Vec<ViewKey>,
}

impl InvalidationEvent {
    pub fn new(keys: Vec<ViewKey>) -> Self {
        Self { keys }
    }
}

pub trait InvalidationSink: Send + Sync {
    fn invalidate(&self, event: &InvalidationEvent);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl InvalidationSink for LogSink {
    fn invalidate(&self, event: &InvalidationEvent) {
        for key in event.keys.iter() {
            info!("invalidate view {}", key);
        }
    }
}
