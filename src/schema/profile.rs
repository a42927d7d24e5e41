use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::query::sort::{SortKey, SortOrder};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub photo: String,
    pub description: String,
    pub address: Address,
    pub contact_info: ContactInfo,
    pub interests: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoInput {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Editable fields of a profile, as submitted by a form. Used whole for both
/// create and update: anything left out is stored as null.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: Option<String>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub address: Option<AddressInput>,
    pub contact_info: Option<ContactInfoInput>,
    pub interests: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub search_term: Option<String>,
    pub location: Option<String>,
    pub interests: Option<Vec<String>>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterVocabulary {
    pub locations: Vec<String>,
    pub interests: Vec<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub success: bool,
}
