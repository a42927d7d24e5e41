pub mod codec;
pub mod db;
pub mod error;
pub mod invalidation;
pub mod sqlx_utils;
#[cfg(test)]
pub mod test_utils;
pub mod view_cache;
