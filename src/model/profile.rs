use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;

pub const TABLE_NAME: &str = "public.profile";

// Coordinates are NUMERIC in the table and travel as decimal text.
pub const SELECT_COLUMNS: &str = "id, full_name, photo, description, street, city, state, \
zip_code, country, location, latitude::text AS latitude, longitude::text AS longitude, email, \
phone, website, interests, created_at, updated_at";

#[derive(Clone, Debug, Default, Deserialize, FromRow, PartialEq)]
pub struct ProfileRecord {
    pub id: i32,
    pub full_name: Option<String>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub interests: Option<Vec<String>>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Write shape of a profile row; id and timestamps are owned by the table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewProfileRecord {
    pub full_name: Option<String>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub interests: Option<Vec<String>>,
}
