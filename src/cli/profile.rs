use std::path::Path;

use tracing::warn;

use crate::{
    core::{invalidation::ViewKey, view_cache::RedisViewCache},
    query::sort::{SortKey, SortOrder},
    schema::profile::{FilterOptions, Profile, ProfileInput},
    service, AppState,
};

#[derive(Clone, Debug, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub location: Option<String>,
    pub interests: Vec<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

pub fn filter_options_from_args(args: &ListArgs) -> FilterOptions {
    FilterOptions {
        search_term: args.search.clone(),
        location: args.location.clone(),
        interests: Some(args.interests.clone()),
        sort_by: Some(SortKey::resolve(args.sort_by.as_deref())),
        sort_order: Some(SortOrder::resolve(args.sort_order.as_deref())),
    }
}

/// The full listing: no filter clause and the default order.
pub fn is_full_listing(filters: &FilterOptions) -> bool {
    filters.search_term.as_deref().unwrap_or("").is_empty()
        && filters.location.as_deref().unwrap_or("").is_empty()
        && filters.interests.as_ref().map(|x| x.is_empty()).unwrap_or(true)
        && filters.sort_by.unwrap_or_default() == SortKey::default()
        && filters.sort_order.unwrap_or_default() == SortOrder::default()
}

fn cached<T: serde::de::DeserializeOwned>(
    cache: Option<&RedisViewCache>,
    key: &ViewKey,
) -> Option<T> {
    let cache = cache?;
    match cache.get(key) {
        Ok(val) => val,
        Err(err) => {
            warn!("failed to read cached view {}: {}", key, err);
            None
        }
    }
}

fn store<T: serde::Serialize>(cache: Option<&RedisViewCache>, key: &ViewKey, view: &T) {
    if let Some(cache) = cache {
        if let Err(err) = cache.put(key, view) {
            warn!("failed to cache view {}: {}", key, err);
        }
    }
}

pub async fn read_profile_input(path: &Path) -> anyhow::Result<ProfileInput> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn list_profiles(
    state: &AppState,
    cache: Option<&RedisViewCache>,
    args: &ListArgs,
) -> anyhow::Result<String> {
    let filters = filter_options_from_args(args);
    let full_listing = is_full_listing(&filters);
    if full_listing {
        if let Some(profiles) = cached::<Vec<Profile>>(cache, &ViewKey::Listing) {
            return Ok(serde_json::to_string_pretty(&profiles)?);
        }
    }
    let profiles = service::profile::query_profiles(state, &filters).await?;
    if full_listing {
        store(cache, &ViewKey::Listing, &profiles);
    }
    Ok(serde_json::to_string_pretty(&profiles)?)
}

pub async fn get_profile(
    state: &AppState,
    cache: Option<&RedisViewCache>,
    id: &str,
) -> anyhow::Result<String> {
    let key = service::profile::parse_profile_id(id).map(ViewKey::Detail);
    if let Some(key) = key.as_ref() {
        if let Some(profile) = cached::<Profile>(cache, key) {
            return Ok(serde_json::to_string_pretty(&profile)?);
        }
    }
    let profile = service::profile::get_profile_by_id(state, id).await?;
    store(cache, &ViewKey::Detail(profile.id), &profile);
    Ok(serde_json::to_string_pretty(&profile)?)
}

pub async fn create_profile(state: &AppState, path: &Path) -> anyhow::Result<String> {
    let input = read_profile_input(path).await?;
    let profile = service::profile::create_profile(state, &input).await?;
    Ok(serde_json::to_string_pretty(&profile)?)
}

pub async fn update_profile(state: &AppState, id: &str, path: &Path) -> anyhow::Result<String> {
    let input = read_profile_input(path).await?;
    let profile = service::profile::update_profile(state, id, &input).await?;
    Ok(serde_json::to_string_pretty(&profile)?)
}

pub async fn delete_profile(state: &AppState, id: &str) -> anyhow::Result<String> {
    let res = service::profile::delete_profile(state, id).await?;
    Ok(serde_json::to_string_pretty(&res)?)
}

pub async fn filter_options(state: &AppState) -> anyhow::Result<String> {
    let vocabulary = service::profile::get_filter_options(state).await?;
    Ok(serde_json::to_string_pretty(&vocabulary)?)
}
