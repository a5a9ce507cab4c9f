//! SQLite-backed airport store

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::types::Airport;
use crate::Result;

use super::{substring_pattern, AirportStore};

// `id` may be stored as INTEGER and numeric columns may hold integers; the
// casts pin every column to the type `Airport` decodes.
const SEARCH_SQL: &str = r"
    SELECT CAST(id AS TEXT) AS id, ident, type, name,
           CAST(latitude_deg AS REAL) AS latitude_deg,
           CAST(longitude_deg AS REAL) AS longitude_deg,
           CAST(elevation_ft AS REAL) AS elevation_ft,
           continent, iso_country, iso_region, municipality, icao_code, iata_code
    FROM airports
    WHERE name LIKE ? ESCAPE '\' OR ident LIKE ? ESCAPE '\'
    LIMIT ?
";

/// Airport store over a single SQLite file opened read-only
#[derive(Clone)]
pub struct SqliteAirportStore {
    pool: SqlitePool,
}

impl SqliteAirportStore {
    /// Open an existing database file. The file is never created.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), max_connections, "Opened airport database");

        Ok(Self { pool })
    }
}

#[async_trait]
impl AirportStore for SqliteAirportStore {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Airport>> {
        let start = Instant::now();
        let pattern = substring_pattern(query);

        let airports = sqlx::query_as::<_, Airport>(SEARCH_SQL)
            .bind(&pattern)
            .bind(&pattern)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            query,
            hits = airports.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Airport search",
        );

        Ok(airports)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM airports")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
