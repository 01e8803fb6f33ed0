//! Result Filter & Shaper — applies city and price constraints to the resolved
//! catalog and reshapes the survivors into the records the client renders.

use serde::Serialize;

use crate::catalog::models::{CatalogDorm, Landlord, Room};
use crate::search::extractor::{FilterSet, ALLOWED_CITIES};

/// A dorm with only the rooms that passed the price filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedDorm {
    #[serde(rename = "dormID")]
    pub dorm_id: i32,
    #[serde(rename = "dormName")]
    pub dorm_name: String,
    pub address: String,
    pub description: Option<String>,
    pub rooms: Vec<Room>,
    #[serde(rename = "fklandlordID")]
    pub landlord_id: Option<i32>,
    pub landlord: Option<Landlord>,
}

/// Case-insensitive check that `address` names at least one of `cities`.
/// An empty `cities` list falls back to the full allow-list.
pub fn address_in_cities(address: &str, cities: &[String]) -> bool {
    let address = address.to_lowercase();
    if cities.is_empty() {
        ALLOWED_CITIES.iter().any(|city| address.contains(city))
    } else {
        cities
            .iter()
            .any(|city| address.contains(&city.to_lowercase()))
    }
}

/// Filters and shapes the catalog. Order is preserved for dorms and rooms;
/// dorms left without rooms are dropped.
pub fn shape(catalog: Vec<CatalogDorm>, filters: &FilterSet) -> Vec<ShapedDorm> {
    catalog
        .into_iter()
        .filter(|entry| address_in_cities(&entry.dorm.address, &filters.allowed_cities))
        .filter_map(|CatalogDorm { dorm, rooms }| {
            let rooms: Vec<Room> = rooms
                .into_iter()
                .filter(|room| filters.accepts_price(room.price))
                .collect();
            if rooms.is_empty() {
                return None;
            }
            Some(ShapedDorm {
                dorm_id: dorm.id,
                dorm_name: dorm.name,
                address: dorm.address,
                description: dorm.description,
                rooms,
                landlord_id: dorm.landlord_id,
                landlord: dorm.landlord,
            })
        })
        .collect()
}
