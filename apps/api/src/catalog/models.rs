use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landlord {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A dorm as read from the store. Read-only to the search pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Dorm {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub landlord_id: Option<i32>,
    /// `None` when the dorm has no landlord on record.
    pub landlord: Option<Landlord>,
}

/// A room with its price already coerced and its features split back into a list.
/// Serialized with the field names the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    #[serde(rename = "roomID")]
    pub id: i32,
    #[serde(rename = "roomNumber")]
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub price: f64,
    pub availability: Option<String>,
    #[serde(rename = "furnishingStatus")]
    pub furnishing_status: Option<String>,
    #[serde(rename = "genderPreference")]
    pub gender_preference: Option<String>,
    pub features: Vec<String>,
    #[serde(skip)]
    pub dorm_id: i32,
}

/// A dorm together with every room it owns, in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDorm {
    pub dorm: Dorm,
    pub rooms: Vec<Room>,
}

/// Everything the single-dorm endpoint reports about one dorm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DormProfile {
    #[serde(rename = "dormID")]
    pub id: i32,
    pub dorm_name: String,
    pub address: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amenities: Vec<String>,
    pub rules: Vec<String>,
    pub landlord: Option<Landlord>,
}
