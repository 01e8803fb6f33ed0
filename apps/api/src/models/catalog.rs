use sqlx::FromRow;

/// One dorm joined with its (optional) landlord.
/// `landlord_id` is the dorm's foreign key; `joined_landlord_id` is NULL when
/// the outer join found no landlord row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DormRow {
    pub dorm_id: i32,
    pub dorm_name: String,
    pub address: String,
    pub description: Option<String>,
    pub landlord_id: Option<i32>,
    pub joined_landlord_id: Option<i32>,
    pub landlord_first_name: Option<String>,
    pub landlord_last_name: Option<String>,
    pub landlord_email: Option<String>,
    pub landlord_phone: Option<String>,
}

/// One room with its feature names aggregated into a single delimited string.
/// `price` is read as text so malformed values can be coerced instead of
/// failing the row decode.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RoomRow {
    pub room_id: i32,
    pub dorm_id: i32,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub availability: Option<String>,
    pub price: Option<String>,
    pub furnishing_status: Option<String>,
    pub gender_preference: Option<String>,
    pub features: Option<String>,
}

/// Single-dorm profile row with aggregated amenities and house rules.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DormProfileRow {
    pub dorm_id: i32,
    pub dorm_name: String,
    pub address: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amenities: Option<String>,
    pub rules: Option<String>,
    pub landlord_id: Option<i32>,
    pub joined_landlord_id: Option<i32>,
    pub landlord_first_name: Option<String>,
    pub landlord_last_name: Option<String>,
    pub landlord_email: Option<String>,
    pub landlord_phone: Option<String>,
}
