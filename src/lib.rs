//! airport-search - substring search over an airport reference dataset
//!
//! The service serves a single read-only SQLite table of airports over HTTP:
//! - `GET /search?q=...` matches `q` against airport name and ident
//! - `GET /` and `GET /static/*` serve the bundled landing page
//! - An offline importer builds the table from the OurAirports CSV export

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
