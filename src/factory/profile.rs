use chrono::Local;
use fake::{
    faker::{
        address::en::{CityName, CountryName, StateName, StreetName, ZipCode},
        internet::en::SafeEmail,
        lorem::en::{Sentence, Word},
        name::en::Name,
        phone_number::en::PhoneNumber,
    },
    Dummy, Fake, Faker,
};
use sqlx::{PgExecutor, PgPool};

use crate::model::profile::{ProfileRecord, SELECT_COLUMNS, TABLE_NAME};

pub struct ProfileFactory<T: Clone> {
    modifier_one: fn(x: &ProfileRecord, ext: T) -> ProfileRecord,
    modifier_many: fn(x: &ProfileRecord, idx: usize, ext: T) -> ProfileRecord,
}

impl<T: Clone> Default for ProfileFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

async fn insert_profile<'e, E: PgExecutor<'e>>(
    db: E,
    data: &ProfileRecord,
) -> anyhow::Result<ProfileRecord> {
    let stmt = format!(
        r#"INSERT INTO {} (full_name, photo, description, street, city, state, zip_code,
        country, location, latitude, longitude, email, phone, website, interests, created_at,
        updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10::numeric, $11::numeric, $12, $13, $14,
        $15, COALESCE($16, CURRENT_TIMESTAMP), COALESCE($17, CURRENT_TIMESTAMP))
        RETURNING {}"#,
        TABLE_NAME, SELECT_COLUMNS
    );
    Ok(sqlx::query_as(&stmt)
        .bind(&data.full_name)
        .bind(&data.photo)
        .bind(&data.description)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.state)
        .bind(&data.zip_code)
        .bind(&data.country)
        .bind(&data.location)
        .bind(&data.latitude)
        .bind(&data.longitude)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.website)
        .bind(&data.interests)
        .bind(data.created_at)
        .bind(data.updated_at)
        .fetch_one(db)
        .await?)
}

impl<T: Clone> ProfileFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &ProfileRecord, ext: T) -> ProfileRecord) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &ProfileRecord, idx: usize, ext: T) -> ProfileRecord,
    ) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<ProfileRecord> {
        let data = ProfileDummy::new().generate_one();
        let data = (self.modifier_one)(&data, ext);
        insert_profile(db, &data).await
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<ProfileRecord>> {
        let data = ProfileDummy::new().generate_many(num);
        let mut tx = db.begin().await?;
        let mut result: Vec<ProfileRecord> = vec![];
        for (idx, item) in data.iter().enumerate() {
            let item = (self.modifier_many)(item, idx, ext.clone());
            result.push(insert_profile(&mut *tx, &item).await?);
        }
        tx.commit().await?;
        Ok(result)
    }
}

#[derive(Debug, Dummy, Clone)]
struct ProfileDummy {
    #[dummy(faker = "Name()")]
    pub full_name: String,
    #[dummy(faker = "Sentence(3..8)")]
    pub description: String,
    #[dummy(faker = "StreetName()")]
    pub street: String,
    #[dummy(faker = "CityName()")]
    pub city: String,
    #[dummy(faker = "StateName()")]
    pub state: String,
    #[dummy(faker = "ZipCode()")]
    pub zip_code: String,
    #[dummy(faker = "CountryName()")]
    pub country: String,
    #[dummy(faker = "-90.0..90.0")]
    pub latitude: f64,
    #[dummy(faker = "-180.0..180.0")]
    pub longitude: f64,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    #[dummy(faker = "PhoneNumber()")]
    pub phone: String,
    #[dummy(faker = "(Word(), 1..4)")]
    pub interests: Vec<String>,
}

impl ProfileDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn to_record(&self, idx: usize) -> ProfileRecord {
        let now = Local::now().fixed_offset();
        ProfileRecord {
            id: 0,
            full_name: Some(self.full_name.clone()),
            photo: None,
            description: Some(self.description.clone()),
            street: Some(self.street.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            zip_code: Some(self.zip_code.clone()),
            country: Some(self.country.clone()),
            location: Some(format!("{}, {}, {}", self.city, self.state, self.country)),
            latitude: Some(format!("{:.4}", self.latitude)),
            longitude: Some(format!("{:.4}", self.longitude)),
            email: format!("{}.{}", idx, self.email),
            phone: Some(self.phone.clone()),
            website: None,
            interests: Some(self.interests.clone()),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn generate_one(&self) -> ProfileRecord {
        Faker.fake::<Self>().to_record(0)
    }

    pub fn generate_many(&self, num: u32) -> Vec<ProfileRecord> {
        let mut result: Vec<ProfileRecord> = vec![];
        for idx in 0..num as usize {
            result.push(Faker.fake::<Self>().to_record(idx));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::profile::ProfileFactory, model::profile::ProfileRecord};

    #[sqlx::test]
    async fn test_generate_one(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = ProfileFactory::new();
        let profile = factory.generate_one(&pool, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.profile"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 1);
        assert!(profile.id > 0);
        assert!(profile.created_at.is_some());
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = ProfileFactory::<String>::new();
        factory.modified_many(|data, idx, ext| ProfileRecord {
            city: Some(ext),
            interests: if idx % 2 == 0 { None } else { data.interests.clone() },
            ..data.clone()
        });
        factory
            .generate_many(&pool, 4, "Lisbon".to_string())
            .await?;

        // Expect
        let res: Vec<(Option<String>, Option<Vec<String>>)> =
            sqlx::query_as(r#"SELECT city, interests FROM public.profile ORDER BY id"#)
                .fetch_all(&pool)
                .await?;
        assert_eq!(res.len(), 4);
        for (idx, item) in res.iter().enumerate() {
            assert_eq!(item.0, Some("Lisbon".to_string()));
            assert_eq!(item.1.is_none(), idx % 2 == 0);
        }
        Ok(())
    }
}
