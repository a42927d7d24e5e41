pub mod db;
pub mod profile;
pub mod seed;
