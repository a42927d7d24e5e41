use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::profile::{NewProfileRecord, ProfileRecord, SELECT_COLUMNS, TABLE_NAME},
    query::filter::Predicate,
};

fn record_binds(record: &NewProfileRecord) -> Vec<SqlxBinds> {
    vec![
        SqlxBinds::OptionString(record.full_name.clone()),
        SqlxBinds::OptionString(record.photo.clone()),
        SqlxBinds::OptionString(record.description.clone()),
        SqlxBinds::OptionString(record.street.clone()),
        SqlxBinds::OptionString(record.city.clone()),
        SqlxBinds::OptionString(record.state.clone()),
        SqlxBinds::OptionString(record.zip_code.clone()),
        SqlxBinds::OptionString(record.country.clone()),
        SqlxBinds::OptionString(record.location.clone()),
        SqlxBinds::OptionString(record.latitude.clone()),
        SqlxBinds::OptionString(record.longitude.clone()),
        SqlxBinds::String(record.email.clone()),
        SqlxBinds::OptionString(record.phone.clone()),
        SqlxBinds::OptionString(record.website.clone()),
        SqlxBinds::OptionStringArray(record.interests.clone()),
    ]
}

pub async fn get_all_profile(
    tx: &mut Transaction<'_, Postgres>,
    predicate: &Predicate,
) -> anyhow::Result<Vec<ProfileRecord>> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let filters = predicate.to_sql(&mut binds);
    let stmt = query_builder(
        Some(SELECT_COLUMNS.to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
    );
    let q = binds_query_as::<ProfileRecord>(&stmt, binds);
    Ok(q.fetch_all(&mut **tx).await?)
}

pub async fn get_profile_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<ProfileRecord>> {
    let stmt = query_builder(
        Some(SELECT_COLUMNS.to_string()),
        TABLE_NAME,
        &["id = $1".to_string()],
        vec![],
        Some(1),
    );
    let q = binds_query_as::<ProfileRecord>(&stmt, vec![SqlxBinds::Int(id)]);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn create_profile(
    tx: &mut Transaction<'_, Postgres>,
    record: &NewProfileRecord,
) -> anyhow::Result<ProfileRecord> {
    let stmt = format!(
        r#"INSERT INTO {} (full_name, photo, description, street, city, state, zip_code,
        country, location, latitude, longitude, email, phone, website, interests)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10::numeric, $11::numeric, $12, $13, $14, $15)
        RETURNING {}"#,
        TABLE_NAME, SELECT_COLUMNS
    );
    let q = binds_query_as::<ProfileRecord>(&stmt, record_binds(record));
    Ok(q.fetch_one(&mut **tx).await?)
}

/// Whole-row replace. `updated_at` never moves backwards.
pub async fn update_profile(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    record: &NewProfileRecord,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Option<ProfileRecord>> {
    let stmt = format!(
        r#"UPDATE {}
        SET full_name = $1, photo = $2, description = $3, street = $4, city = $5, state = $6,
        zip_code = $7, country = $8, location = $9, latitude = $10::numeric,
        longitude = $11::numeric, email = $12, phone = $13, website = $14, interests = $15,
        updated_at = GREATEST($16, updated_at)
        WHERE id = $17
        RETURNING {}"#,
        TABLE_NAME, SELECT_COLUMNS
    );
    let mut binds = record_binds(record);
    binds.push(SqlxBinds::DateTimeFixedOffset(*now));
    binds.push(SqlxBinds::Int(id));
    let q = binds_query_as::<ProfileRecord>(&stmt, binds);
    Ok(q.fetch_optional(&mut **tx).await?)
}

pub async fn delete_profile(tx: &mut Transaction<'_, Postgres>, id: i32) -> anyhow::Result<bool> {
    let deleted: Option<(i32,)> =
        sqlx::query_as(format!("DELETE FROM {} WHERE id = $1 RETURNING id", TABLE_NAME).as_str())
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(deleted.is_some())
}

/// Returns the ids of the deleted rows.
pub async fn delete_all_profile(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<Vec<i32>> {
    let stmt = format!("DELETE FROM {} RETURNING id", TABLE_NAME);
    let rows = binds_query_as::<(i32,)>(&stmt, vec![])
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(|x| x.0).collect())
}

pub async fn get_distinct_locations(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<String>> {
    let stmt = query_builder(
        Some("DISTINCT location".to_string()),
        TABLE_NAME,
        &["location IS NOT NULL".to_string()],
        vec!["location ASC".to_string()],
        None,
    );
    let rows = binds_query_as::<(String,)>(&stmt, vec![])
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(|x| x.0).collect())
}

pub async fn get_distinct_interests(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<String>> {
    let unnested = format!(
        "(SELECT unnest(interests) AS interest FROM {} WHERE interests IS NOT NULL) AS t",
        TABLE_NAME
    );
    let stmt = query_builder(
        Some("DISTINCT interest".to_string()),
        &unnested,
        &["interest IS NOT NULL".to_string()],
        vec!["interest ASC".to_string()],
        None,
    );
    let rows = binds_query_as::<(String,)>(&stmt, vec![])
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(|x| x.0).collect())
}
