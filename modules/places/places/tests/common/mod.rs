#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for places integration tests

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use places::config::PlacesConfig;
use places::domain::ports::ShortIdGenerator;
use places::{NewPlace, PlacesApi, PlacesModule};
use uuid::Uuid;

pub fn create_module() -> PlacesModule {
    PlacesModule::in_memory(PlacesConfig::default()).unwrap()
}

/// Create a place owned by `owner` and return its short id and the id of its only grid.
pub async fn create_place(api: &dyn PlacesApi, owner: &str) -> (String, Uuid) {
    let short_id = api
        .create_place(NewPlace::new(owner, "Office", "Second floor"))
        .await
        .unwrap();
    let place = api.get_place(&short_id).await.unwrap();
    (short_id, place.grids[0].grid_id)
}

/// Hands out predetermined short ids in order, then falls back to a counter.
pub struct ScriptedShortIds {
    queue: Mutex<VecDeque<String>>,
    counter: Mutex<u32>,
}

impl ScriptedShortIds {
    pub fn new(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(ids.iter().map(|s| (*s).to_owned()).collect()),
            counter: Mutex::new(0),
        })
    }
}

impl ShortIdGenerator for ScriptedShortIds {
    fn new_short_id(&self, length: usize) -> String {
        if let Some(id) = self.queue.lock().pop_front() {
            return id;
        }
        let mut counter = self.counter.lock();
        *counter += 1;
        format!("{:0>width$}", *counter, width = length)
    }
}
