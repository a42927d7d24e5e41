use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    core::{
        error::ProfileError,
        invalidation::{InvalidationEvent, ViewKey},
    },
    repository,
    schema::profile::ProfileInput,
    service::profile::{create_profile, validate_profile_input},
    AppState,
};

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SeedSummary {
    pub cleared: u64,
    pub inserted: u32,
    pub skipped: u32,
}

pub async fn read_seed_file(path: &Path) -> anyhow::Result<Vec<ProfileInput>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn seed_profiles(
    state: &AppState,
    inputs: &[ProfileInput],
    clear: bool,
) -> anyhow::Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    if clear {
        let mut tx = state.db.begin().await?;
        let ids = repository::profile::delete_all_profile(&mut tx).await?;
        tx.commit().await?;
        summary.cleared = ids.len() as u64;
        info!("cleared {} profiles", summary.cleared);
        let mut keys = vec![ViewKey::Listing];
        keys.extend(ids.into_iter().map(ViewKey::Detail));
        state.invalidation.invalidate(&InvalidationEvent::new(keys));
    }

    for (idx, input) in inputs.iter().enumerate() {
        if let Err(err) = validate_profile_input(input) {
            warn!("skip seed entry {}: {}", idx, err);
            summary.skipped += 1;
            continue;
        }
        match create_profile(state, input).await {
            Ok(_) => summary.inserted += 1,
            Err(err @ ProfileError::DuplicateEmail { .. }) => {
                warn!("skip seed entry {}: {}", idx, err);
                summary.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    info!(
        "seeded {} profiles, skipped {}",
        summary.inserted, summary.skipped
    );
    Ok(summary)
}
