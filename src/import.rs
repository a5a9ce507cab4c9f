//! Dataset import from the OurAirports CSV export
//!
//! Builds the `airports` table the search service reads. Heliports and closed
//! fields are dropped and only rows inside a geographic bounding box (Europe
//! by default) are kept.

use std::io::Read;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::types::Airport;
use crate::Result;

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE airports (
        id INTEGER,
        ident TEXT NOT NULL,
        type TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude_deg REAL,
        longitude_deg REAL,
        elevation_ft REAL,
        continent TEXT,
        iso_country TEXT,
        iso_region TEXT,
        municipality TEXT,
        icao_code TEXT,
        iata_code TEXT
    )
";

const INSERT_SQL: &str = "
    INSERT INTO airports (
        id, ident, type, name, latitude_deg, longitude_deg, elevation_ft,
        continent, iso_country, iso_region, municipality, icao_code, iata_code
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// Which CSV rows make it into the dataset
#[derive(Debug, Clone)]
pub struct ImportFilter {
    pub excluded_types: Vec<String>,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for ImportFilter {
    fn default() -> Self {
        Self {
            excluded_types: vec!["heliport".to_string(), "closed".to_string()],
            min_latitude: 35.0,
            max_latitude: 72.0,
            min_longitude: -10.0,
            max_longitude: 40.0,
        }
    }
}

impl ImportFilter {
    pub fn accepts(&self, airport: &Airport) -> bool {
        if self
            .excluded_types
            .iter()
            .any(|t| t == &airport.airport_type)
        {
            return false;
        }

        match (airport.latitude_deg, airport.longitude_deg) {
            (Some(lat), Some(lon)) => {
                (self.min_latitude..=self.max_latitude).contains(&lat)
                    && (self.min_longitude..=self.max_longitude).contains(&lon)
            }
            _ => false,
        }
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub read: usize,
    pub written: usize,
}

/// Parse CSV rows and keep those accepted by `filter`.
///
/// Returns the kept airports and the total number of rows read.
pub fn read_airports<R: Read>(reader: R, filter: &ImportFilter) -> Result<(Vec<Airport>, usize)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut kept = Vec::new();
    let mut read = 0;

    for record in csv_reader.deserialize::<Airport>() {
        let airport = record?;
        read += 1;
        if filter.accepts(&airport) {
            kept.push(airport);
        }
    }

    Ok((kept, read))
}

/// Open (creating if needed) a writable database at `path`
pub async fn create_database(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Replace the `airports` table with `airports` and index it by name
pub async fn write_airports(pool: &SqlitePool, airports: &[Airport]) -> Result<usize> {
    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS airports")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_TABLE_SQL).execute(&mut *tx).await?;

    for airport in airports {
        sqlx::query(INSERT_SQL)
            .bind(&airport.id)
            .bind(&airport.ident)
            .bind(&airport.airport_type)
            .bind(&airport.name)
            .bind(airport.latitude_deg)
            .bind(airport.longitude_deg)
            .bind(airport.elevation_ft)
            .bind(&airport.continent)
            .bind(&airport.iso_country)
            .bind(&airport.iso_region)
            .bind(&airport.municipality)
            .bind(&airport.icao_code)
            .bind(&airport.iata_code)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_name ON airports(name)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(airports.len())
}

/// Build the database at `db_path` from the CSV at `csv_path`
pub async fn import_csv(
    csv_path: impl AsRef<Path>,
    db_path: impl AsRef<Path>,
    filter: &ImportFilter,
) -> Result<ImportSummary> {
    let csv_path = csv_path.as_ref();
    let db_path = db_path.as_ref();

    tracing::info!(path = %csv_path.display(), "Reading airports CSV");
    let file = std::fs::File::open(csv_path)?;
    let (airports, read) = read_airports(file, filter)?;
    tracing::info!(read, kept = airports.len(), "Filtered airports");

    let pool = create_database(db_path).await?;
    let written = write_airports(&pool, &airports).await?;
    pool.close().await;

    tracing::info!(path = %db_path.display(), written, "Airport database written");

    Ok(ImportSummary { read, written })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,icao_code,iata_code
2434,EGLL,large_airport,London Heathrow Airport,51.4706,-0.461941,83,EU,GB,GB-ENG,London,yes,EGLL,LHR
29160,EGLW,heliport,London Heliport,51.4697,-0.179444,18,EU,GB,GB-ENG,London,no,,
1,XXCL,closed,Old Field,50.0,10.0,,EU,DE,DE-BY,,no,,
3622,KJFK,large_airport,John F Kennedy International Airport,40.639447,-73.779317,13,NA,US,US-NY,New York,yes,KJFK,JFK
42,EDXX,small_airport,Grass Strip,49.1,9.2,,EU,DE,DE-BW,,no,,
";

    #[test]
    fn test_read_airports_filters_rows() {
        let (airports, read) =
            read_airports(SAMPLE_CSV.as_bytes(), &ImportFilter::default()).unwrap();

        assert_eq!(read, 5);
        let idents: Vec<_> = airports.iter().map(|a| a.ident.as_str()).collect();
        assert_eq!(idents, vec!["EGLL", "EDXX"]);
    }

    #[test]
    fn test_empty_cells_become_none() {
        let (airports, _) =
            read_airports(SAMPLE_CSV.as_bytes(), &ImportFilter::default()).unwrap();
        let strip = airports.iter().find(|a| a.ident == "EDXX").unwrap();

        assert_eq!(strip.elevation_ft, None);
        assert_eq!(strip.municipality, None);
        assert_eq!(strip.icao_code, None);
        assert_eq!(strip.iata_code, None);
        assert_eq!(strip.iso_region.as_deref(), Some("DE-BW"));
    }

    #[test]
    fn test_filter_requires_coordinates() {
        let (mut airports, _) =
            read_airports(SAMPLE_CSV.as_bytes(), &ImportFilter::default()).unwrap();
        let mut heathrow = airports.remove(0);
        heathrow.longitude_deg = None;

        assert!(!ImportFilter::default().accepts(&heathrow));
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let (mut airports, _) =
            read_airports(SAMPLE_CSV.as_bytes(), &ImportFilter::default()).unwrap();
        let mut edge = airports.remove(0);
        edge.latitude_deg = Some(72.0);
        edge.longitude_deg = Some(-10.0);

        assert!(ImportFilter::default().accepts(&edge));
    }

    #[tokio::test]
    async fn test_import_csv_writes_table() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let csv_path = temp_dir.path().join("airports.csv");
        let db_path = temp_dir.path().join("airports.db");
        std::fs::write(&csv_path, SAMPLE_CSV).unwrap();

        let summary = import_csv(&csv_path, &db_path, &ImportFilter::default())
            .await
            .unwrap();
        assert_eq!(summary, ImportSummary { read: 5, written: 2 });

        // Re-running replaces rather than appends
        import_csv(&csv_path, &db_path, &ImportFilter::default())
            .await
            .unwrap();

        let pool = create_database(&db_path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM airports")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);

        let index: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_name'",
        )
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert_eq!(index.as_deref(), Some("idx_name"));
    }
}
