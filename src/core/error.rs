use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("invalid profile input: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("profile {id} not found")]
    NotFound { id: String },

    #[error("a profile with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("profile storage unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),
}

impl ProfileError {
    /// Classify a storage failure. Unique violations become `DuplicateEmail`,
    /// everything else is `StorageUnavailable`.
    pub fn from_storage(err: anyhow::Error, email: &str) -> Self {
        let is_unique_violation = match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        };
        if is_unique_violation {
            return ProfileError::DuplicateEmail {
                email: email.to_string(),
            };
        }
        ProfileError::StorageUnavailable(err)
    }
}
