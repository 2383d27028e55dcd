use std::sync::Arc;

use crate::model::{Favorite, Movie};
use crate::storage::Storage;

/// Version-suffixed storage key; bumping it abandons older payloads instead
/// of migrating them.
pub const FAVORITES_KEY: &str = "favorites_v2";

/// Persisted set of saved movie snapshots, keyed by movie id. Every mutation
/// rewrites the whole JSON list synchronously; storage trouble degrades to an
/// empty in-memory set and never surfaces to the caller.
pub struct FavoritesStore {
    storage: Arc<dyn Storage>,
    items: Vec<Favorite>,
}

impl FavoritesStore {
    /// Load the persisted set; missing or corrupt payloads yield an empty one.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let items = match storage.get(FAVORITES_KEY).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding corrupt favorites payload");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "favorites storage unavailable, starting empty");
                Vec::new()
            }
        };
        Self { storage, items }
    }

    pub fn list(&self) -> &[Favorite] {
        &self.items
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.items.iter().any(|f| f.movie.id == id)
    }

    /// Insert a snapshot with a fresh timestamp, or remove an existing one by
    /// id. Returns whether the movie is a favorite afterwards.
    pub async fn toggle(&mut self, movie: &Movie) -> bool {
        let now_favorite = match self.items.iter().position(|f| f.movie.id == movie.id) {
            Some(idx) => {
                self.items.remove(idx);
                false
            }
            None => {
                self.items.push(Favorite {
                    movie: movie.clone(),
                    saved_at: chrono::Utc::now().timestamp_millis(),
                });
                true
            }
        };
        self.persist().await;
        now_favorite
    }

    async fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize favorites");
                return;
            }
        };
        if let Err(err) = self.storage.put(FAVORITES_KEY, &payload).await {
            tracing::warn!(error = %err, "failed to persist favorites");
        }
    }
}
