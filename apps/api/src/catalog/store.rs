//! Store access for the dorm catalog.
//!
//! `AppState` holds an `Arc<dyn CatalogStore>`; the Postgres implementation
//! opens a fresh scoped connection for every call.

use async_trait::async_trait;

use crate::catalog::resolver::NAME_DELIMITER;
use crate::db::ScopedConnection;
use crate::models::catalog::{DormProfileRow, DormRow, RoomRow};

/// Read-only access to dorms, rooms and their multi-valued joins.
///
/// Multi-valued columns (features, amenities, rules) come back deduplicated
/// and joined with `NAME_DELIMITER`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All dorms with landlord identity, ordered by dorm id.
    async fn dorms(&self) -> Result<Vec<DormRow>, sqlx::Error>;

    /// Rooms belonging to any of `dorm_ids`, ordered by room id.
    async fn rooms_for_dorms(&self, dorm_ids: &[i32]) -> Result<Vec<RoomRow>, sqlx::Error>;

    async fn dorm_profile(&self, dorm_id: i32) -> Result<Option<DormProfileRow>, sqlx::Error>;
}

const DORMS_QUERY: &str = r#"
    SELECT d.dorm_id, d.dorm_name, d.address, d.description,
           d.fk_landlord_id AS landlord_id,
           l.landlord_id    AS joined_landlord_id,
           l.firstname      AS landlord_first_name,
           l.lastname       AS landlord_last_name,
           l.email          AS landlord_email,
           l.phonenumber    AS landlord_phone
    FROM dorms d
    LEFT JOIN landlords l ON d.fk_landlord_id = l.landlord_id
    ORDER BY d.dorm_id
"#;

const ROOMS_QUERY: &str = r#"
    SELECT ro.room_id, ro.fk_dorm_id AS dorm_id,
           ro.room_number, ro.room_type, ro.availability,
           ro.price::text AS price,
           ro.furnishing_status, ro.gender_preference,
           string_agg(DISTINCT rf.feature_name, $2) AS features
    FROM rooms ro
    LEFT JOIN room_features_rooms rfr ON ro.room_id = rfr.fk_room_id
    LEFT JOIN roomfeatures rf ON rfr.fk_feature_id = rf.id
    WHERE ro.fk_dorm_id = ANY($1)
    GROUP BY ro.room_id
    ORDER BY ro.room_id
"#;

const DORM_PROFILE_QUERY: &str = r#"
    SELECT d.dorm_id, d.dorm_name, d.address, d.description,
           d.latitude::float8  AS latitude,
           d.longitude::float8 AS longitude,
           string_agg(DISTINCT a.amenity_name, $2) AS amenities,
           string_agg(DISTINCT r.rule_name, $2)    AS rules,
           d.fk_landlord_id AS landlord_id,
           l.landlord_id    AS joined_landlord_id,
           l.firstname      AS landlord_first_name,
           l.lastname       AS landlord_last_name,
           l.email          AS landlord_email,
           l.phonenumber    AS landlord_phone
    FROM dorms d
    LEFT JOIN landlords l ON d.fk_landlord_id = l.landlord_id
    LEFT JOIN amenitydorm ad ON d.dorm_id = ad.fk_dorm_id
    LEFT JOIN amenities a ON ad.fk_amenity_id = a.id
    LEFT JOIN rulesandpolicydorm rd ON d.dorm_id = rd.fk_dorm_id
    LEFT JOIN rulesandpolicies r ON rd.fk_rule_id = r.id
    WHERE d.dorm_id = $1
    GROUP BY d.dorm_id, l.landlord_id
"#;

/// Postgres-backed catalog. Holds only the connection string; every method
/// acquires and releases its own connection.
pub struct PgCatalogStore {
    database_url: String,
}

impl PgCatalogStore {
    pub fn new(database_url: String) -> Self {
        Self { database_url }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn dorms(&self) -> Result<Vec<DormRow>, sqlx::Error> {
        let mut conn = ScopedConnection::acquire(&self.database_url).await?;
        let rows = sqlx::query_as::<_, DormRow>(DORMS_QUERY)
            .fetch_all(&mut *conn)
            .await?;
        conn.release().await;
        Ok(rows)
    }

    async fn rooms_for_dorms(&self, dorm_ids: &[i32]) -> Result<Vec<RoomRow>, sqlx::Error> {
        let mut conn = ScopedConnection::acquire(&self.database_url).await?;
        let rows = sqlx::query_as::<_, RoomRow>(ROOMS_QUERY)
            .bind(dorm_ids)
            .bind(NAME_DELIMITER)
            .fetch_all(&mut *conn)
            .await?;
        conn.release().await;
        Ok(rows)
    }

    async fn dorm_profile(&self, dorm_id: i32) -> Result<Option<DormProfileRow>, sqlx::Error> {
        let mut conn = ScopedConnection::acquire(&self.database_url).await?;
        let row = sqlx::query_as::<_, DormProfileRow>(DORM_PROFILE_QUERY)
            .bind(dorm_id)
            .bind(NAME_DELIMITER)
            .fetch_optional(&mut *conn)
            .await?;
        conn.release().await;
        Ok(row)
    }
}
