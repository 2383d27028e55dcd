use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fully-normalized catalog entry. Every field is defined after
/// `normalize::normalize_movie`; missing source data is substituted with
/// defaults, never left absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: Vec<String>,
    /// Display string, e.g. "165 min".
    pub runtime: String,
    /// Minutes parsed out of `runtime`; 0 when unparseable.
    pub runtime_mins: u32,
    /// Display string for the release date.
    pub released: String,
    /// Epoch milliseconds; release date, else Jan 1 of `year`, else 0.
    pub release_timestamp: i64,
    pub plot: String,
    pub director: String,
    pub cast: Vec<String>,
    pub poster: String,
}

/// Raw dataset row as it appears on disk. Field types wobble in the source
/// (ids are strings or numbers, years are numbers or numeric strings), so the
/// uncertain ones come in as `serde_json::Value` and are coerced exactly once
/// at the normalization boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    #[serde(rename = "_id")]
    pub id: Option<Value>,
    pub index: Option<Value>,
    pub title: Option<String>,
    pub year: Option<Value>,
    pub rating: Option<Value>,
    pub genre: Option<String>,
    pub runtime: Option<String>,
    pub released: Option<String>,
    pub plot: Option<String>,
    pub director: Option<String>,
    pub cast: Option<Vec<String>>,
    pub poster: Option<String>,
    pub image: Option<String>,
}

/// An actor, actress or director as shown on the people pages. `count` is
/// computed from the collection, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Portrait URL; empty when the roster has no match.
    pub img: String,
    pub count: usize,
}

/// One roster line: an image reference plus a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub img: String,
}

/// Saved movie snapshot. Serialized with the movie fields flattened so the
/// persisted payload stays one flat object per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(flatten)]
    pub movie: Movie,
    pub saved_at: i64,
}

/// Genre aggregate for the genres index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub name: String,
    pub count: usize,
}
