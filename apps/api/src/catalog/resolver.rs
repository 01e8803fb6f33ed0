//! Catalog Resolver — turns raw store rows into dorms with their rooms.
//!
//! Multi-valued joins arrive as one delimited string per row. They are split
//! back into lists here, and prices are coerced to numbers.

use std::collections::HashMap;

use anyhow::anyhow;
use tracing::debug;

use crate::catalog::models::{CatalogDorm, Dorm, DormProfile, Landlord, Room};
use crate::catalog::store::CatalogStore;
use crate::errors::AppError;
use crate::models::catalog::{DormProfileRow, DormRow, RoomRow};

/// Separator used when the store aggregates names into a single column.
/// ASCII unit separator, so names containing commas survive the round-trip.
pub const NAME_DELIMITER: &str = "\u{1f}";

/// Joins a deduplicated name set into the delimited form the store produces.
#[cfg(test)]
pub fn join_names(names: &std::collections::BTreeSet<String>) -> String {
    names
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(NAME_DELIMITER)
}

/// Splits an aggregated column back into a list. NULL and empty both mean "none".
pub fn split_names(joined: Option<&str>) -> Vec<String> {
    match joined {
        Some(s) if !s.is_empty() => s.split(NAME_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Missing or malformed prices count as 0 rather than failing the request.
pub fn coerce_price(raw: Option<&str>) -> f64 {
    raw.and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

/// `joined_id` is the landlord key seen through the outer join. A dorm whose
/// foreign key points at no landlord row has no landlord.
fn landlord_from(
    joined_id: Option<i32>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Option<Landlord> {
    joined_id?;
    let name = [first_name, last_name]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(Landlord {
        name,
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
    })
}

impl From<DormRow> for Dorm {
    fn from(row: DormRow) -> Self {
        let landlord = landlord_from(
            row.joined_landlord_id,
            row.landlord_first_name.as_deref(),
            row.landlord_last_name.as_deref(),
            row.landlord_email.as_deref(),
            row.landlord_phone.as_deref(),
        );
        Dorm {
            id: row.dorm_id,
            name: row.dorm_name,
            address: row.address,
            description: row.description,
            landlord_id: row.landlord_id,
            landlord,
        }
    }
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.room_id,
            number: row.room_number,
            room_type: row.room_type,
            price: coerce_price(row.price.as_deref()),
            availability: row.availability,
            furnishing_status: row.furnishing_status,
            gender_preference: row.gender_preference,
            features: split_names(row.features.as_deref()),
            dorm_id: row.dorm_id,
        }
    }
}

impl From<DormProfileRow> for DormProfile {
    fn from(row: DormProfileRow) -> Self {
        let landlord = landlord_from(
            row.joined_landlord_id,
            row.landlord_first_name.as_deref(),
            row.landlord_last_name.as_deref(),
            row.landlord_email.as_deref(),
            row.landlord_phone.as_deref(),
        );
        DormProfile {
            id: row.dorm_id,
            dorm_name: row.dorm_name,
            address: row.address,
            description: row.description,
            latitude: row.latitude,
            longitude: row.longitude,
            amenities: split_names(row.amenities.as_deref()),
            rules: split_names(row.rules.as_deref()),
            landlord,
        }
    }
}

/// Loads every dorm with all of its rooms.
/// Dorm order follows the store; rooms keep store order within each dorm.
pub async fn resolve_catalog(store: &dyn CatalogStore) -> Result<Vec<CatalogDorm>, AppError> {
    let dorms: Vec<Dorm> = store.dorms().await?.into_iter().map(Dorm::from).collect();
    if dorms.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = dorms.iter().map(|d| d.id).collect();
    let mut rooms_by_dorm: HashMap<i32, Vec<Room>> = HashMap::new();
    for row in store.rooms_for_dorms(&ids).await? {
        let room = Room::from(row);
        rooms_by_dorm.entry(room.dorm_id).or_default().push(room);
    }

    debug!(
        "Resolved {} dorms with {} rooms",
        dorms.len(),
        rooms_by_dorm.values().map(Vec::len).sum::<usize>()
    );

    let catalog: Vec<CatalogDorm> = dorms
        .into_iter()
        .map(|dorm| {
            let rooms = rooms_by_dorm.remove(&dorm.id).unwrap_or_default();
            CatalogDorm { dorm, rooms }
        })
        .collect();

    // Every room must belong to a dorm that was asked for.
    if let Some(stray) = rooms_by_dorm.keys().min() {
        return Err(anyhow!("store returned rooms for unrequested dorm {stray}").into());
    }

    Ok(catalog)
}

/// Loads one dorm's profile and its full room list.
pub async fn resolve_dorm(
    store: &dyn CatalogStore,
    dorm_id: i32,
) -> Result<(DormProfile, Vec<Room>), AppError> {
    let profile = store
        .dorm_profile(dorm_id)
        .await?
        .map(DormProfile::from)
        .ok_or_else(|| AppError::NotFound("Dorm not found".to_string()))?;

    let rooms = store
        .rooms_for_dorms(&[dorm_id])
        .await?
        .into_iter()
        .map(Room::from)
        .collect();

    Ok((profile, rooms))
}
