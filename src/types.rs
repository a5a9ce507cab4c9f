//! Core types for airport-search

use serde::{Deserialize, Serialize};

/// Hard cap on the number of rows returned by a single search
pub const SEARCH_LIMIT: u32 = 50;

/// One row of the airport reference dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Airport {
    pub id: String,
    pub ident: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub airport_type: String,
    pub name: String,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub elevation_ft: Option<f64>,
    pub continent: Option<String>,
    pub iso_country: Option<String>,
    pub iso_region: Option<String>,
    pub municipality: Option<String>,
    pub icao_code: Option<String>,
    pub iata_code: Option<String>,
}
