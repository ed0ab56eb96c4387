use std::sync::Arc;

use thiserror::Error;

use crate::api::models::Track;

/// Track list shipped with the widget, in wheel display order.
const BUILTIN_TRACKS_JSON: &str = include_str!("../../assets/tracks.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("track catalog is empty")]
    Empty,
    #[error("track catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fixed, ordered, non-empty list of tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    tracks: Arc<[Track]>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            tracks: tracks.into(),
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let tracks: Vec<Track> = serde_json::from_str(raw)?;
        Self::new(tracks)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_TRACKS_JSON)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Looks up a track, wrapping the index so every value resolves.
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index % self.tracks.len()]
    }
}
