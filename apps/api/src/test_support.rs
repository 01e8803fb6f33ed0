//! Test doubles shared by the inline test modules.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::catalog::resolver::join_names;
use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::llm_client::{CompletionBackend, LlmError};
use crate::models::catalog::{DormProfileRow, DormRow, RoomRow};
use crate::search::narrator::Narrator;
use crate::state::AppState;

fn joined(names: &[&str]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let set: BTreeSet<String> = names.iter().map(|n| n.to_string()).collect();
    Some(join_names(&set))
}

pub fn dorm_row(id: i32, name: &str, address: &str) -> DormRow {
    DormRow {
        dorm_id: id,
        dorm_name: name.to_string(),
        address: address.to_string(),
        description: Some(format!("{name} near the highway")),
        landlord_id: Some(100 + id),
        joined_landlord_id: Some(100 + id),
        landlord_first_name: Some("Maria".to_string()),
        landlord_last_name: Some("Santos".to_string()),
        landlord_email: Some("maria@example.com".to_string()),
        landlord_phone: Some("0917 000 0000".to_string()),
    }
}

pub fn room_row(id: i32, dorm_id: i32, price: &str, features: &[&str]) -> RoomRow {
    RoomRow {
        room_id: id,
        dorm_id,
        room_number: Some(format!("{id}")),
        room_type: Some("Single".to_string()),
        availability: Some("Available".to_string()),
        price: Some(price.to_string()),
        furnishing_status: Some("Furnished".to_string()),
        gender_preference: Some("Mixed".to_string()),
        features: joined(features),
    }
}

/// Catalog held in memory, ordered the way the Postgres queries order rows.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    dorms: Vec<DormRow>,
    rooms: Vec<RoomRow>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dorm(mut self, dorm: DormRow) -> Self {
        self.dorms.push(dorm);
        self.dorms.sort_by_key(|d| d.dorm_id);
        self
    }

    pub fn with_room(mut self, room: RoomRow) -> Self {
        self.rooms.push(room);
        self.rooms.sort_by_key(|r| r.room_id);
        self
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn dorms(&self) -> Result<Vec<DormRow>, sqlx::Error> {
        Ok(self.dorms.clone())
    }

    async fn rooms_for_dorms(&self, dorm_ids: &[i32]) -> Result<Vec<RoomRow>, sqlx::Error> {
        Ok(self
            .rooms
            .iter()
            .filter(|r| dorm_ids.contains(&r.dorm_id))
            .cloned()
            .collect())
    }

    async fn dorm_profile(&self, dorm_id: i32) -> Result<Option<DormProfileRow>, sqlx::Error> {
        Ok(self
            .dorms
            .iter()
            .find(|d| d.dorm_id == dorm_id)
            .map(|d| DormProfileRow {
                dorm_id: d.dorm_id,
                dorm_name: d.dorm_name.clone(),
                address: d.address.clone(),
                description: d.description.clone(),
                latitude: Some(10.3236),
                longitude: Some(123.9223),
                amenities: joined(&["Laundry"]),
                rules: joined(&["No smoking"]),
                landlord_id: d.landlord_id,
                joined_landlord_id: d.joined_landlord_id,
                landlord_first_name: d.landlord_first_name.clone(),
                landlord_last_name: d.landlord_last_name.clone(),
                landlord_email: d.landlord_email.clone(),
                landlord_phone: d.landlord_phone.clone(),
            }))
    }
}

/// Every call fails as if the database were unreachable.
pub struct FailingCatalogStore;

#[async_trait]
impl CatalogStore for FailingCatalogStore {
    async fn dorms(&self) -> Result<Vec<DormRow>, sqlx::Error> {
        Err(sqlx::Error::Protocol("store offline".to_string()))
    }

    async fn rooms_for_dorms(&self, _dorm_ids: &[i32]) -> Result<Vec<RoomRow>, sqlx::Error> {
        Err(sqlx::Error::Protocol("store offline".to_string()))
    }

    async fn dorm_profile(&self, _dorm_id: i32) -> Result<Option<DormProfileRow>, sqlx::Error> {
        Err(sqlx::Error::Protocol("store offline".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub temperature: Option<f32>,
}

/// Replies with fixed text and remembers every request.
pub struct RecordingCompletion {
    reply: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for RecordingCompletion {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            temperature,
        });
        Ok(self.reply.clone())
    }
}

/// Always fails, like an upstream outage.
pub struct FailingCompletion;

#[async_trait]
impl CompletionBackend for FailingCompletion {
    async fn complete(
        &self,
        _system: &str,
        _prompt: &str,
        _temperature: Option<f32>,
    ) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}

pub fn test_state(store: Arc<dyn CatalogStore>, backend: Arc<dyn CompletionBackend>) -> AppState {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/dormhub_test".to_string()),
        _ => None,
    })
    .expect("test config is valid");

    AppState {
        store,
        narrator: Narrator::new(backend),
        config: Arc::new(config),
    }
}
