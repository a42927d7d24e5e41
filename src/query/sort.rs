use std::{cmp::Ordering, str::FromStr};

use chrono::{DateTime, FixedOffset};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

use crate::{core::codec::parse_coordinate, model::profile::ProfileRecord};

/// Fields a listing can be ordered by. `name` is the alias for the full name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum SortKey {
    #[default]
    #[strum(to_string = "name", serialize = "fullName")]
    Name,
    #[strum(to_string = "id")]
    Id,
    #[strum(to_string = "description")]
    Description,
    #[strum(to_string = "street")]
    Street,
    #[strum(to_string = "city")]
    City,
    #[strum(to_string = "state")]
    State,
    #[strum(to_string = "zipCode")]
    ZipCode,
    #[strum(to_string = "country")]
    Country,
    #[strum(to_string = "location")]
    Location,
    #[strum(to_string = "latitude")]
    Latitude,
    #[strum(to_string = "longitude")]
    Longitude,
    #[strum(to_string = "email")]
    Email,
    #[strum(to_string = "phone")]
    Phone,
    #[strum(to_string = "website")]
    Website,
    #[strum(to_string = "createdAt")]
    CreatedAt,
    #[strum(to_string = "updatedAt")]
    UpdatedAt,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
pub enum SortOrder {
    #[default]
    #[strum(to_string = "asc")]
    Asc,
    #[strum(to_string = "desc")]
    Desc,
}

impl SortKey {
    /// Permissive lookup: an absent or unknown key sorts by name.
    // TODO: reject unknown keys once every caller sends a valid one.
    pub fn resolve(key: Option<&str>) -> SortKey {
        let Some(key) = key else {
            return SortKey::Name;
        };
        match SortKey::from_str(key) {
            Ok(val) => val,
            Err(_) => {
                warn!("unknown sort key {:?}, falling back to name", key);
                SortKey::Name
            }
        }
    }
}

impl SortOrder {
    pub fn resolve(order: Option<&str>) -> SortOrder {
        match order {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Text compares case-insensitively first and falls back to the raw bytes,
/// so "alice" sorts before "Bob" and distinct spellings still order stably.
#[derive(Debug, PartialEq, PartialOrd)]
enum SortValue<'a> {
    Int(i32),
    Text(Option<(String, &'a str)>),
    Number(Option<f64>),
    Time(Option<DateTime<FixedOffset>>),
}

fn text(value: Option<&str>) -> SortValue<'_> {
    SortValue::Text(value.map(|x| (x.to_lowercase(), x)))
}

fn sort_value(key: SortKey, record: &ProfileRecord) -> SortValue<'_> {
    match key {
        SortKey::Name => text(record.full_name.as_deref()),
        SortKey::Id => SortValue::Int(record.id),
        SortKey::Description => text(record.description.as_deref()),
        SortKey::Street => text(record.street.as_deref()),
        SortKey::City => text(record.city.as_deref()),
        SortKey::State => text(record.state.as_deref()),
        SortKey::ZipCode => text(record.zip_code.as_deref()),
        SortKey::Country => text(record.country.as_deref()),
        SortKey::Location => text(record.location.as_deref()),
        SortKey::Latitude => SortValue::Number(
            record
                .latitude
                .as_deref()
                .map(|x| parse_coordinate(Some(x))),
        ),
        SortKey::Longitude => SortValue::Number(
            record
                .longitude
                .as_deref()
                .map(|x| parse_coordinate(Some(x))),
        ),
        SortKey::Email => text(Some(record.email.as_str())),
        SortKey::Phone => text(record.phone.as_deref()),
        SortKey::Website => text(record.website.as_deref()),
        SortKey::CreatedAt => SortValue::Time(record.created_at),
        SortKey::UpdatedAt => SortValue::Time(record.updated_at),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: Option<SortKey>, order: Option<SortOrder>) -> Self {
        Self {
            key: key.unwrap_or_default(),
            order: order.unwrap_or_default(),
        }
    }

    /// Total order over records. Nulls compare smaller than any value, so they
    /// lead ascending listings and trail descending ones.
    pub fn compare(&self, a: &ProfileRecord, b: &ProfileRecord) -> Ordering {
        let ordering = sort_value(self.key, a)
            .partial_cmp(&sort_value(self.key, b))
            .unwrap_or(Ordering::Equal);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn sort(&self, records: &mut [ProfileRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}
