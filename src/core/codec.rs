use chrono::Local;

use crate::{
    model::profile::{NewProfileRecord, ProfileRecord},
    schema::profile::{Address, ContactInfo, Profile, ProfileInput},
};

pub fn parse_coordinate(value: Option<&str>) -> f64 {
    value
        .and_then(|x| x.trim().parse::<f64>().ok())
        .filter(|x| x.is_finite())
        .unwrap_or(0.0)
}

pub fn render_coordinate(value: f64) -> String {
    value.to_string()
}

/// Denormalized "city, state, country" summary, written alongside the row.
pub fn location_summary(
    city: Option<&str>,
    state: Option<&str>,
    country: Option<&str>,
) -> Option<String> {
    let parts: Vec<&str> = [city, state, country]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(", "))
}

/// Storage row to domain profile. Never fails: nulls become empty values and
/// unparsable coordinates become 0.
pub fn to_domain(record: ProfileRecord) -> Profile {
    let created_at = record
        .created_at
        .or(record.updated_at)
        .unwrap_or_else(|| Local::now().fixed_offset());
    let updated_at = record.updated_at.unwrap_or(created_at).max(created_at);
    Profile {
        id: record.id,
        name: record.full_name.unwrap_or_default(),
        photo: record.photo.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        address: Address {
            street: record.street.unwrap_or_default(),
            city: record.city.unwrap_or_default(),
            state: record.state.unwrap_or_default(),
            zip_code: record.zip_code.unwrap_or_default(),
            country: record.country.unwrap_or_default(),
            latitude: parse_coordinate(record.latitude.as_deref()),
            longitude: parse_coordinate(record.longitude.as_deref()),
        },
        contact_info: ContactInfo {
            email: record.email,
            phone: record.phone,
            website: record.website,
        },
        interests: record.interests.unwrap_or_default(),
        created_at,
        updated_at,
    }
}

pub fn to_storage(input: &ProfileInput) -> NewProfileRecord {
    let address = input.address.clone().unwrap_or_default();
    let contact_info = input.contact_info.clone().unwrap_or_default();
    let location = location_summary(
        address.city.as_deref(),
        address.state.as_deref(),
        address.country.as_deref(),
    );
    NewProfileRecord {
        full_name: input.name.clone(),
        photo: input.photo.clone(),
        description: input.description.clone(),
        street: address.street,
        city: address.city,
        state: address.state,
        zip_code: address.zip_code,
        country: address.country,
        location,
        latitude: address.latitude.map(render_coordinate),
        longitude: address.longitude.map(render_coordinate),
        email: contact_info.email.unwrap_or_default(),
        phone: contact_info.phone,
        website: contact_info.website,
        interests: Some(input.interests.clone().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};

    use super::*;
    use crate::schema::profile::{AddressInput, ContactInfoInput};

    #[test]
    fn test_to_domain_defaults_null_fields() {
        let record = ProfileRecord {
            id: 7,
            email: "jane@example.com".to_string(),
            ..Default::default()
        };

        let profile = to_domain(record);

        assert_eq!(profile.id, 7);
        assert_eq!(profile.name, "");
        assert_eq!(profile.photo, "");
        assert_eq!(profile.address.city, "");
        assert_eq!(profile.address.latitude, 0.0);
        assert_eq!(profile.address.longitude, 0.0);
        assert_eq!(profile.contact_info.phone, None);
        assert_eq!(profile.contact_info.website, None);
        assert!(profile.interests.is_empty());
        assert!(profile.created_at <= profile.updated_at);
    }

    #[test]
    fn test_to_domain_parses_coordinates() {
        let record = ProfileRecord {
            latitude: Some("37.7749000".to_string()),
            longitude: Some("not a number".to_string()),
            ..Default::default()
        };

        let profile = to_domain(record);

        assert!((profile.address.latitude - 37.7749).abs() < 1e-9);
        assert_eq!(profile.address.longitude, 0.0);
    }

    #[test]
    fn test_to_domain_keeps_created_before_updated() {
        let now = Local::now().fixed_offset();
        let record = ProfileRecord {
            created_at: Some(now),
            updated_at: Some(now - Duration::seconds(10)),
            ..Default::default()
        };

        let profile = to_domain(record);

        assert_eq!(profile.created_at, now);
        assert_eq!(profile.updated_at, now);
    }

    #[test]
    fn test_to_storage_renders_and_passes_through() {
        let input = ProfileInput {
            name: Some("Jane Doe".to_string()),
            photo: None,
            description: Some("Engineer".to_string()),
            address: Some(AddressInput {
                street: Some("1 Market St".to_string()),
                city: Some("San Francisco".to_string()),
                state: Some("CA".to_string()),
                zip_code: Some("94105".to_string()),
                country: Some("USA".to_string()),
                latitude: Some(37.7749),
                longitude: Some(-122.4194),
            }),
            contact_info: Some(ContactInfoInput {
                email: Some("jane@example.com".to_string()),
                phone: Some("".to_string()),
                website: None,
            }),
            interests: Some(vec!["hiking".to_string(), "hiking".to_string()]),
        };

        let record = to_storage(&input);

        assert_eq!(record.latitude, Some("37.7749".to_string()));
        assert_eq!(record.longitude, Some("-122.4194".to_string()));
        assert_eq!(record.phone, Some("".to_string()));
        assert_eq!(record.website, None);
        assert_eq!(record.photo, None);
        assert_eq!(
            record.location,
            Some("San Francisco, CA, USA".to_string())
        );
        assert_eq!(
            record.interests,
            Some(vec!["hiking".to_string(), "hiking".to_string()])
        );
    }

    #[test]
    fn test_location_summary_skips_empty_parts() {
        assert_eq!(
            location_summary(Some("Paris"), Some(" "), Some("France")),
            Some("Paris, France".to_string())
        );
        assert_eq!(location_summary(None, Some(""), None), None);
    }
}
