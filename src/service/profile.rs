use chrono::Local;
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

use crate::{
    core::{
        codec::{to_domain, to_storage},
        error::ProfileError,
        invalidation::{InvalidationEvent, ViewKey},
    },
    query::{filter::build_predicate, sort::SortSpec},
    repository,
    schema::profile::{DeleteResult, FilterOptions, FilterVocabulary, Profile, ProfileInput},
    AppState,
};

fn storage_error(function: &str, step: &str, err: anyhow::Error) -> ProfileError {
    error!("service.profile {} failed at {}: {:#}", function, step, err);
    ProfileError::StorageUnavailable(err)
}

async fn begin(
    state: &AppState,
    function: &str,
) -> Result<Transaction<'static, Postgres>, ProfileError> {
    match state.db.begin().await {
        Ok(val) => Ok(val),
        Err(err) => Err(storage_error(function, "begin transaction", err.into())),
    }
}

/// Ids are positive integers; anything else cannot name a profile.
pub fn parse_profile_id(id: &str) -> Option<i32> {
    id.trim().parse::<i32>().ok().filter(|x| *x > 0)
}

fn is_blank(value: Option<&String>) -> bool {
    value.map(|x| x.trim().is_empty()).unwrap_or(true)
}

pub fn validate_profile_input(input: &ProfileInput) -> Result<(), ProfileError> {
    let mut fields: Vec<String> = vec![];
    if is_blank(input.name.as_ref()) {
        fields.push("name".to_string());
    }
    if is_blank(input.description.as_ref()) {
        fields.push("description".to_string());
    }
    match &input.address {
        None => fields.push("address".to_string()),
        Some(address) => {
            if let Some(latitude) = address.latitude {
                if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
                    fields.push("address.latitude".to_string());
                }
            }
            if let Some(longitude) = address.longitude {
                if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
                    fields.push("address.longitude".to_string());
                }
            }
        }
    }
    let email = input.contact_info.as_ref().and_then(|x| x.email.as_ref());
    if is_blank(email) {
        fields.push("contactInfo.email".to_string());
    }
    if !fields.is_empty() {
        return Err(ProfileError::Validation { fields });
    }
    Ok(())
}

pub async fn query_profiles(
    state: &AppState,
    filters: &FilterOptions,
) -> Result<Vec<Profile>, ProfileError> {
    info!("query profiles with filters: {:?}", filters);
    let mut tx = begin(state, "query_profiles").await?;
    let predicate = build_predicate(filters);
    let mut records = match repository::profile::get_all_profile(&mut tx, &predicate).await {
        Ok(val) => val,
        Err(err) => return Err(storage_error("query_profiles", "get_all_profile", err)),
    };
    SortSpec::new(filters.sort_by, filters.sort_order).sort(&mut records);
    info!("found {} profiles", records.len());
    Ok(records.into_iter().map(to_domain).collect())
}

pub async fn get_profile_by_id(state: &AppState, id: &str) -> Result<Profile, ProfileError> {
    let Some(profile_id) = parse_profile_id(id) else {
        warn!("get profile with invalid id {:?}", id);
        return Err(ProfileError::NotFound { id: id.to_string() });
    };
    let mut tx = begin(state, "get_profile_by_id").await?;
    let record = match repository::profile::get_profile_by_id(&mut tx, profile_id).await {
        Ok(val) => val,
        Err(err) => return Err(storage_error("get_profile_by_id", "get_profile_by_id", err)),
    };
    match record {
        Some(record) => Ok(to_domain(record)),
        None => {
            info!("profile {} not found", profile_id);
            Err(ProfileError::NotFound { id: id.to_string() })
        }
    }
}

pub async fn create_profile(
    state: &AppState,
    input: &ProfileInput,
) -> Result<Profile, ProfileError> {
    info!("create profile");
    validate_profile_input(input)?;
    let record = to_storage(input);
    let mut tx = begin(state, "create_profile").await?;
    let created = match repository::profile::create_profile(&mut tx, &record).await {
        Ok(val) => val,
        Err(err) => {
            return Err(match ProfileError::from_storage(err, &record.email) {
                ProfileError::StorageUnavailable(err) => {
                    storage_error("create_profile", "create_profile", err)
                }
                other => other,
            });
        }
    };
    if let Err(err) = tx.commit().await {
        return Err(storage_error("create_profile", "commit", err.into()));
    }
    info!("profile {} created", created.id);
    state.invalidation.invalidate(&InvalidationEvent::new(vec![
        ViewKey::Listing,
        ViewKey::Detail(created.id),
    ]));
    Ok(to_domain(created))
}

pub async fn update_profile(
    state: &AppState,
    id: &str,
    input: &ProfileInput,
) -> Result<Profile, ProfileError> {
    info!("update profile {:?}", id);
    validate_profile_input(input)?;
    let Some(profile_id) = parse_profile_id(id) else {
        return Err(ProfileError::NotFound { id: id.to_string() });
    };
    let record = to_storage(input);
    let now = Local::now().fixed_offset();
    let mut tx = begin(state, "update_profile").await?;
    let updated =
        match repository::profile::update_profile(&mut tx, profile_id, &record, &now).await {
            Ok(val) => val,
            Err(err) => {
                return Err(match ProfileError::from_storage(err, &record.email) {
                    ProfileError::StorageUnavailable(err) => {
                        storage_error("update_profile", "update_profile", err)
                    }
                    other => other,
                });
            }
        };
    let Some(updated) = updated else {
        info!("profile {} not found for update", profile_id);
        return Err(ProfileError::NotFound { id: id.to_string() });
    };
    if let Err(err) = tx.commit().await {
        return Err(storage_error("update_profile", "commit", err.into()));
    }
    info!("profile {} updated", profile_id);
    state.invalidation.invalidate(&InvalidationEvent::new(vec![
        ViewKey::Listing,
        ViewKey::Detail(profile_id),
    ]));
    Ok(to_domain(updated))
}

/// A missing id is reported as `success: false`, not as an error.
pub async fn delete_profile(state: &AppState, id: &str) -> Result<DeleteResult, ProfileError> {
    info!("delete profile {:?}", id);
    let Some(profile_id) = parse_profile_id(id) else {
        warn!("delete profile with invalid id {:?}", id);
        return Ok(DeleteResult { success: false });
    };
    let mut tx = begin(state, "delete_profile").await?;
    let deleted = match repository::profile::delete_profile(&mut tx, profile_id).await {
        Ok(val) => val,
        Err(err) => return Err(storage_error("delete_profile", "delete_profile", err)),
    };
    if !deleted {
        warn!("profile {} not found for deletion", profile_id);
        return Ok(DeleteResult { success: false });
    }
    if let Err(err) = tx.commit().await {
        return Err(storage_error("delete_profile", "commit", err.into()));
    }
    info!("profile {} deleted", profile_id);
    state.invalidation.invalidate(&InvalidationEvent::new(vec![
        ViewKey::Listing,
        ViewKey::Detail(profile_id),
    ]));
    Ok(DeleteResult { success: true })
}

pub async fn get_filter_options(state: &AppState) -> Result<FilterVocabulary, ProfileError> {
    let mut tx = begin(state, "get_filter_options").await?;
    let locations = match repository::profile::get_distinct_locations(&mut tx).await {
        Ok(val) => val,
        Err(err) => {
            return Err(storage_error(
                "get_filter_options",
                "get_distinct_locations",
                err,
            ))
        }
    };
    let interests = match repository::profile::get_distinct_interests(&mut tx).await {
        Ok(val) => val,
        Err(err) => {
            return Err(storage_error(
                "get_filter_options",
                "get_distinct_interests",
                err,
            ))
        }
    };
    info!(
        "found {} locations and {} interests",
        locations.len(),
        interests.len()
    );
    Ok(FilterVocabulary {
        locations,
        interests,
    })
}
