use url::form_urlencoded;

use crate::model::{Favorite, Movie, RosterEntry};
use crate::query::{Filter, FilterKind, QueryParams, SortKey};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

/// Tab selection on the people page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeopleTab {
    #[default]
    Actors,
    Actresses,
    Directors,
    All,
}

impl PeopleTab {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "actress" | "actresses" => Self::Actresses,
            "director" | "directors" => Self::Directors,
            "all" => Self::All,
            _ => Self::Actors,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Actors => "Actors",
            Self::Actresses => "Actresses",
            Self::Directors => "Directors",
            Self::All => "All Cast",
        }
    }
}

/// People-page browsing state: tab, name filter, window page.
#[derive(Debug, Clone)]
pub struct PeopleState {
    pub tab: PeopleTab,
    pub filter: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for PeopleState {
    fn default() -> Self {
        Self {
            tab: PeopleTab::default(),
            filter: String::new(),
            page: 1,
            page_size: crate::aggregate::PEOPLE_PAGE_SIZE,
        }
    }
}

/// Navigation parameters carried on the URL-style boundary (`id`, `type`,
/// `value`). Unrecognized `type` values survive as `FilterKind::Unknown` so
/// the query engine can answer them with an empty result instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavParams {
    pub id: Option<String>,
    pub filter: Option<Filter>,
}

impl NavParams {
    /// Parse a query string like `id=tt1&type=genre&value=Drama`.
    pub fn parse(query: &str) -> Self {
        let mut id = None;
        let mut kind = None;
        let mut value = None;
        for (k, v) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match k.as_ref() {
                "id" => id = Some(v.into_owned()),
                "type" => kind = Some(FilterKind::parse(&v)),
                "value" => value = Some(v.into_owned()),
                _ => {}
            }
        }
        let filter = kind.map(|kind| Filter {
            kind,
            value: value.unwrap_or_default(),
        });
        Self { id, filter }
    }
}

/// Whole-application state: the read-only collection plus the current
/// interaction parameters. Passed explicitly into the query engine and the
/// view selector; there are no ambient globals.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub movies: Vec<Movie>,
    pub actresses: Vec<RosterEntry>,
    pub actors: Vec<RosterEntry>,
    pub favorites: Vec<Favorite>,
    pub params: QueryParams,
    pub people: PeopleState,
    pub theme: String,
}

impl AppState {
    // Any filter or sort change resets the load-more counter.

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.params.search = term.into();
        self.params.page = 1;
    }

    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.params.filter = filter;
        self.params.page = 1;
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.params.sort_by = sort_by;
        self.params.page = 1;
    }

    pub fn toggle_direction(&mut self) {
        self.params.direction = self.params.direction.toggled();
        self.params.page = 1;
    }

    pub fn load_more(&mut self) {
        self.params.page += 1;
    }

    pub fn find_movie(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}
