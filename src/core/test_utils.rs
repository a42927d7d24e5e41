use std::sync::{Arc, Mutex};

use fake::{Fake, Faker};
use sqlx::PgPool;

use crate::{
    core::invalidation::{InvalidationEvent, InvalidationSink},
    schema::profile::{AddressInput, ContactInfoInput, ProfileInput},
    AppState,
};

pub fn generate_random<T: fake::Dummy<fake::Faker>>() -> T {
    Faker.fake()
}

/// Keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<InvalidationEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<InvalidationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl InvalidationSink for RecordingSink {
    fn invalidate(&self, event: &InvalidationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn generate_test_state(pool: PgPool) -> (AppState, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(pool, sink.clone());
    (state, sink)
}

pub fn profile_input(name: &str, email: &str) -> ProfileInput {
    ProfileInput {
        name: Some(name.to_string()),
        photo: Some("https://example.com/photo.jpg".to_string()),
        description: Some(format!("{} writes software", name)),
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
            email: Some(email.to_string()),
            phone: Some("555-0100".to_string()),
            website: None,
        }),
        interests: Some(vec!["hiking".to_string(), "chess".to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::core::{
        invalidation::{InvalidationEvent, InvalidationSink, ViewKey},
        test_utils::{generate_random, RecordingSink},
    };

    #[test]
    fn test_recording_sink_keeps_events() {
        let sink = Arc::new(RecordingSink::default());
        let id: i32 = generate_random();
        let event = InvalidationEvent::new(vec![ViewKey::Listing, ViewKey::Detail(id)]);

        sink.invalidate(&event);

        assert_eq!(sink.events(), vec![event]);
    }
}
