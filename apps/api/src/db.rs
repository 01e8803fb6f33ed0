use std::ops::{Deref, DerefMut};

use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

/// A store connection owned by exactly one unit of work.
///
/// Connections are opened per request and never pooled. `release` closes the
/// connection gracefully; if the guard is dropped instead (early return, `?`,
/// panic unwinding) the underlying socket is closed by `PgConnection`'s drop.
pub struct ScopedConnection {
    conn: Option<PgConnection>,
}

impl ScopedConnection {
    pub async fn acquire(database_url: &str) -> Result<Self, sqlx::Error> {
        let conn = PgConnection::connect(database_url).await?;
        debug!("Store connection acquired");
        Ok(Self { conn: Some(conn) })
    }

    pub async fn release(mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close().await {
                Ok(()) => debug!("Store connection released"),
                Err(e) => warn!("Store connection did not close cleanly: {e}"),
            }
        }
    }
}

impl Deref for ScopedConnection {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        self.conn.as_ref().expect("connection used after release")
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut PgConnection {
        self.conn.as_mut().expect("connection used after release")
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        if self.conn.is_some() {
            debug!("Store connection dropped before release; closing socket");
        }
    }
}
