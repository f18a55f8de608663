use crate::models::{AddDestinationRequest, Destination};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

/// Errors that can occur while loading or changing the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid destination: {0}")]
    Validation(String),

    #[error("Destination {0} already exists")]
    DuplicateId(u32),

    #[error("Destination {0} not found")]
    UnknownId(u32),
}

/// On-disk layout. Both the wrapped form and a bare array are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { travel_spots: Vec<Destination> },
    Bare(Vec<Destination>),
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    travel_spots: &'a [Destination],
}

/// JSON-backed destination catalog
///
/// Holds the validated records and writes them back after every change when it was loaded from a
/// file. Records are kept in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    path: Option<PathBuf>,
    destinations: Vec<Destination>,
}

impl CatalogStore {
    /// Load and validate a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let destinations = parse_catalog(&raw)?;

        tracing::info!("Loaded {} destinations from {}", destinations.len(), path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            destinations,
        })
    }

    /// In-memory catalog that is never persisted
    pub fn from_destinations(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let destinations = validated(destinations)?;
        Ok(Self { path: None, destinations })
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Add a destination, assigning the next free id when none is given
    pub fn add(&mut self, request: AddDestinationRequest) -> Result<Destination, CatalogError> {
        request
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let id = match request.id {
            Some(id) if self.contains(id) => return Err(CatalogError::DuplicateId(id)),
            Some(id) => id,
            None => self.next_id()?,
        };

        let destination = Destination {
            id,
            name: request.name.trim().to_string(),
            moods: request.moods.iter().map(|m| m.trim().to_lowercase()).collect(),
            budget_min: request.budget_min,
            budget_max: request.budget_max,
            duration_days: request.duration_days,
            distance_km: request.distance_km,
            rating: request.rating,
            description: request.description,
            best_months: request.best_months.iter().map(|m| m.to_lowercase()).collect(),
        };
        validate_destination(&destination)?;

        let position = self.destinations.partition_point(|d| d.id < id);
        self.destinations.insert(position, destination.clone());
        if let Err(e) = self.save() {
            self.destinations.remove(position);
            return Err(e);
        }

        tracing::info!("Added destination {} ({})", destination.id, destination.name);
        Ok(destination)
    }

    pub fn remove(&mut self, id: u32) -> Result<Destination, CatalogError> {
        let position = self
            .destinations
            .iter()
            .position(|d| d.id == id)
            .ok_or(CatalogError::UnknownId(id))?;

        let removed = self.destinations.remove(position);
        if let Err(e) = self.save() {
            self.destinations.insert(position, removed);
            return Err(e);
        }

        tracing::info!("Removed destination {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Write the catalog back to its file; a no-op for in-memory catalogs
    pub fn save(&self) -> Result<(), CatalogError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let body = serde_json::to_string_pretty(&CatalogFileRef {
            travel_spots: &self.destinations,
        })?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, path)?;

        tracing::debug!("Persisted {} destinations to {}", self.destinations.len(), path.display());
        Ok(())
    }

    fn contains(&self, id: u32) -> bool {
        self.destinations.iter().any(|d| d.id == id)
    }

    fn next_id(&self) -> Result<u32, CatalogError> {
        match self.destinations.iter().map(|d| d.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                CatalogError::Validation(format!("no id left after {}; pass an explicit id", max))
            }),
        }
    }
}

/// Parse and validate catalog JSON
pub fn parse_catalog(raw: &str) -> Result<Vec<Destination>, CatalogError> {
    let destinations = match serde_json::from_str(raw)? {
        CatalogFile::Wrapped { travel_spots } => travel_spots,
        CatalogFile::Bare(destinations) => destinations,
    };
    validated(destinations)
}

fn validated(mut destinations: Vec<Destination>) -> Result<Vec<Destination>, CatalogError> {
    let mut seen = HashSet::with_capacity(destinations.len());
    for destination in &destinations {
        validate_destination(destination)?;
        if !seen.insert(destination.id) {
            return Err(CatalogError::DuplicateId(destination.id));
        }
    }

    destinations.sort_by_key(|d| d.id);
    Ok(destinations)
}

/// Check the per-record invariants of a destination
pub fn validate_destination(destination: &Destination) -> Result<(), CatalogError> {
    let fail = |reason: &str| {
        Err(CatalogError::Validation(format!(
            "destination {} ({}): {}",
            destination.id, destination.name, reason
        )))
    };

    if destination.name.trim().is_empty() {
        return fail("name is empty");
    }
    if destination.moods.is_empty() || destination.moods.iter().any(|m| m.trim().is_empty()) {
        return fail("at least one non-empty mood tag is required");
    }
    if destination.budget_min > destination.budget_max {
        return fail("budget_min exceeds budget_max");
    }
    if destination.duration_days == 0 {
        return fail("duration_days must be positive");
    }
    if !destination.distance_km.is_finite() || destination.distance_km < 0.0 {
        return fail("distance_km must be a non-negative number");
    }
    if !(0.0..=5.0).contains(&destination.rating) {
        return fail("rating must be between 0 and 5");
    }

    Ok(())
}
