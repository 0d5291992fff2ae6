//! Location sources: an explicit coordinate, or a saved reading on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::geo::Coord;
use crate::ports::{LocationError, LocationSource};

/// A location supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coord);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn read_location(&self) -> Result<Coord, LocationError> {
        validated(self.0)
    }
}

/// A reading persisted as `{"latitude": .., "longitude": ..}`.
#[derive(Debug, Clone)]
pub struct JsonFileLocation {
    path: PathBuf,
}

#[derive(Deserialize)]
struct SavedReading {
    latitude: f64,
    longitude: f64,
}

impl JsonFileLocation {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocationSource for JsonFileLocation {
    async fn read_location(&self) -> Result<Coord, LocationError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LocationError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;
        let reading: SavedReading = serde_json::from_str(&raw)
            .map_err(|e| LocationError::Invalid(format!("{}: {e}", self.path.display())))?;
        validated(Coord::new(reading.latitude, reading.longitude))
    }
}

fn validated(coord: Coord) -> Result<Coord, LocationError> {
    if coord.is_valid() {
        Ok(coord)
    } else {
        Err(LocationError::Invalid(format!(
            "coordinate out of range: {coord}"
        )))
    }
}
