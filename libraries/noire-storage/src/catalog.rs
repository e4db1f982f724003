//! In-memory song catalog

use async_trait::async_trait;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use noire_core::{Catalog, NoireError, Track, TrackFilter, TrackId};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct CatalogEntry {
    track: Track,
    created_at: DateTime<Utc>,
}

/// Catalog held in memory, for hosts without a document store and for tests
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track uploaded at `created_at`, replacing one with the same id
    pub fn insert(&self, track: Track, created_at: DateTime<Utc>) -> noire_core::Result<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.retain(|entry| entry.track.id != track.id);
        entries.push(CatalogEntry { track, created_at });
        Ok(())
    }

    /// Remove a track, returning it if present
    pub fn remove(&self, id: &TrackId) -> Option<Track> {
        let mut entries = self.entries.write().ok()?;
        let position = entries.iter().position(|entry| &entry.track.id == id)?;
        Some(entries.remove(position).track)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the catalog holds no tracks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_tracks(&self, filter: &TrackFilter) -> noire_core::Result<Vec<Track>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| NoireError::catalog("catalog lock poisoned"))?;

        let mut matching: Vec<&CatalogEntry> = entries
            .iter()
            .filter(|entry| {
                filter
                    .mood
                    .as_ref()
                    .map_or(true, |mood| &entry.track.mood == mood)
            })
            .collect();

        if filter.order_by_recency {
            // Stable sort keeps insertion order for equal timestamps
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|entry| entry.track.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Song {id}"), "Artist", format!("https://cdn/{id}.mp3"), "calm")
    }

    #[test]
    fn insert_fails_on_poisoned_lock() {
        let catalog = MemoryCatalog::new();
        catalog.insert(track("a"), Utc::now()).unwrap();

        let poisoner = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = catalog.entries.write().unwrap();
                    panic!("writer died");
                })
                .join()
        });
        assert!(poisoner.is_err());

        let err = catalog.insert(track("b"), Utc::now()).unwrap_err();
        assert!(matches!(err, NoireError::Storage(_)));
    }
}
