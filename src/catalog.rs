use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::db::Database;
use crate::favorites::FavoritesStore;
use crate::model::{Movie, RawMovie};
use crate::normalize::normalize_movie;
use crate::query::QueryParams;
use crate::roster::{parse_roster, Roster};
use crate::source::{fetch_inputs, Endpoint};
use crate::state::{AppState, PeopleState, THEME_KEY};
use crate::storage::{MemoryStorage, Storage};

/// Library entry point. Owns the key-value store, the normalized collection
/// and the favorites set. The collection is read-only after `load`.
pub struct Catalog {
    storage: Arc<dyn Storage>,
    movies: Vec<Movie>,
    roster: Roster,
    favorites: FavoritesStore,
    theme: String,
    page_size: usize,
    people_page_size: usize,
}

impl Catalog {
    /// Connect the default database, run migrations, then fetch and
    /// normalize the startup data. Either input failing is fatal; no partial
    /// catalog is ever produced. An unusable database is not: persistence
    /// degrades to a volatile in-memory store and the catalog still loads.
    pub async fn load(config: &Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = match open_database(config).await {
            Ok(db) => Arc::new(db),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "storage unavailable, favorites and theme will not persist"
                );
                Arc::new(MemoryStorage::new())
            }
        };
        Self::load_with_storage(storage, config).await
    }

    /// Same as [`Catalog::load`] with a caller-supplied store.
    pub async fn load_with_storage(storage: Arc<dyn Storage>, config: &Config) -> Result<Self> {
        let dataset = Endpoint::parse(&config.dataset);
        let roster_src = Endpoint::parse(&config.roster);
        let (dataset_text, roster_text) = fetch_inputs(&dataset, &roster_src)
            .await
            .context("loading startup data")?;

        let raw: Vec<RawMovie> =
            serde_json::from_str(&dataset_text).context("parsing movie dataset")?;
        let movies: Vec<Movie> = raw.into_iter().map(normalize_movie).collect();
        let roster = parse_roster(&roster_text);
        tracing::info!(
            movies = movies.len(),
            actresses = roster.actresses.len(),
            actors = roster.actors.len(),
            "catalog loaded"
        );

        let favorites = FavoritesStore::load(Arc::clone(&storage)).await;
        // A missing or unreadable preference silently falls back to the
        // configured default.
        let theme = storage
            .get(THEME_KEY)
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| config.theme.clone());

        Ok(Self {
            storage,
            movies,
            roster,
            favorites,
            theme,
            page_size: config.page_size,
            people_page_size: config.people_page_size,
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Toggle the favorite state for a movie id. `None` when the id is not in
    /// the collection; otherwise whether the movie is now a favorite.
    pub async fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let movie = self.movies.iter().find(|m| m.id == id)?.clone();
        Some(self.favorites.toggle(&movie).await)
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Persist the theme preference; write failures degrade silently.
    pub async fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
        if let Err(err) = self.storage.put(THEME_KEY, theme).await {
            tracing::warn!(error = %err, "failed to persist theme");
        }
    }

    pub fn people_page_size(&self) -> usize {
        self.people_page_size
    }

    /// Snapshot an [`AppState`] for one interaction turn.
    pub fn state(&self) -> AppState {
        AppState {
            movies: self.movies.clone(),
            actresses: self.roster.actresses.clone(),
            actors: self.roster.actors.clone(),
            favorites: self.favorites.list().to_vec(),
            params: QueryParams {
                page_size: self.page_size,
                ..QueryParams::default()
            },
            people: PeopleState {
                page_size: self.people_page_size,
                ..PeopleState::default()
            },
            theme: self.theme.clone(),
        }
    }
}

async fn open_database(config: &Config) -> Result<Database> {
    let db = Database::connect(config.database_url.as_deref()).await?;
    db.run_migrations().await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"_id": "tt1", "title": "Anbe Sivam", "year": 2003, "rating": 8.6,
         "genre": "Comedy, Drama", "runtime": "160 min", "released": "2003-01-15",
         "director": "Sundar C", "cast": ["Kamal Haasan", "Madhavan"]},
        {"title": "  ", "year": "not a year"}
    ]"#;
    const ROSTER: &str = "ipc-image src\nimgA\tJane Doe\nipc-image src\nJohn Roe\n";

    async fn write_inputs(dir: &std::path::Path) -> Config {
        let dataset = dir.join("movies.json");
        let roster = dir.join("stars.txt");
        tokio::fs::write(&dataset, DATASET).await.unwrap();
        tokio::fs::write(&roster, ROSTER).await.unwrap();
        Config {
            dataset: dataset.display().to_string(),
            roster: roster.display().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn loads_and_normalizes_both_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path()).await;
        let catalog = Catalog::load_with_storage(Arc::new(MemoryStorage::new()), &config)
            .await
            .unwrap();

        assert_eq!(catalog.movies().len(), 2);
        assert_eq!(catalog.movies()[0].title, "Anbe Sivam");
        // Second row is all defaults, never absent fields.
        assert_eq!(catalog.movies()[1].title, "Untitled");
        assert_eq!(catalog.roster().actresses.len(), 1);
        assert_eq!(catalog.roster().actors.len(), 1);
        assert_eq!(catalog.theme(), "dark");
    }

    #[tokio::test]
    async fn invalid_dataset_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path()).await;
        tokio::fs::write(&config.dataset, "{ not json")
            .await
            .unwrap();
        let result = Catalog::load_with_storage(Arc::new(MemoryStorage::new()), &config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn toggle_favorite_resolves_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path()).await;
        let mut catalog = Catalog::load_with_storage(Arc::new(MemoryStorage::new()), &config)
            .await
            .unwrap();

        assert_eq!(catalog.toggle_favorite("tt1").await, Some(true));
        assert!(catalog.favorites().is_favorite("tt1"));
        assert_eq!(catalog.toggle_favorite("tt1").await, Some(false));
        assert_eq!(catalog.toggle_favorite("nope").await, None);
    }

    #[tokio::test]
    async fn unusable_database_degrades_to_volatile_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_inputs(dir.path()).await;
        config.database_url =
            Some("sqlite:///this/path/does/not/exist/kv.db?mode=ro".to_string());

        let mut catalog = Catalog::load(&config).await.unwrap();
        assert_eq!(catalog.movies().len(), 2);
        assert!(catalog.favorites().list().is_empty());
        assert_eq!(catalog.theme(), "dark");
        // Favorites still work for the session, just without persistence.
        assert_eq!(catalog.toggle_favorite("tt1").await, Some(true));
    }

    #[tokio::test]
    async fn theme_round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_inputs(dir.path()).await;
        let storage = Arc::new(MemoryStorage::new());
        let mut catalog = Catalog::load_with_storage(storage.clone(), &config).await.unwrap();
        catalog.set_theme("light").await;

        let reloaded = Catalog::load_with_storage(storage, &config).await.unwrap();
        assert_eq!(reloaded.theme(), "light");
    }
}
