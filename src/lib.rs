pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod db;
pub mod debounce;
pub mod favorites;
pub mod model;
pub mod normalize;
pub mod query;
pub mod roster;
pub mod source;
pub mod state;
pub mod storage;
pub mod views;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::config::Config;
    pub use crate::debounce::Debouncer;
    pub use crate::favorites::FavoritesStore;
    pub use crate::model::{Favorite, GenreCount, Movie, Person, RosterEntry};
    pub use crate::query::{
        query, Filter, FilterKind, QueryParams, QueryResult, SortDirection, SortKey,
    };
    pub use crate::state::{AppState, NavParams, PeopleTab};
    pub use crate::storage::Storage;
    pub use crate::views::{render, View};
}
