use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::Movie;

/// Default movie-grid page size.
pub const PAGE_SIZE: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Year,
    Rating,
    Title,
    Runtime,
    Released,
    /// No vote counts in the dataset; aliases to rating.
    Popularity,
}

impl SortKey {
    /// Unknown keys fall back to the default (`year`).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Self::Rating,
            "title" => Self::Title,
            "runtime" => Self::Runtime,
            "released" => Self::Released,
            "popularity" => Self::Popularity,
            _ => Self::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Categorical field a structural filter selects on. `Unknown` is kept as a
/// variant so an unrecognized `type` navigation parameter yields an empty
/// result set rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Year,
    Cast,
    Director,
    Genre,
    Unknown,
}

impl FilterKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Self::Year,
            "cast" => Self::Cast,
            "director" => Self::Director,
            "genre" => Self::Genre,
            _ => Self::Unknown,
        }
    }
}

/// Exact-match (case-insensitive) filter on a single categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub kind: FilterKind,
    pub value: String,
}

/// Full parameter set for one query-engine run. Defensively coerced: there
/// is no invalid combination, only empty results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub search: String,
    pub filter: Option<Filter>,
    pub sort_by: SortKey,
    pub direction: SortDirection,
    /// 1-based "load more" counter; pages are prefix slices.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: None,
            sort_by: SortKey::default(),
            direction: SortDirection::default(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// Paginated slice of the filtered/sorted collection plus the total match
/// count before pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    pub items: Vec<&'a Movie>,
    pub total: usize,
}

/// Run the filter/search/sort/paginate pipeline. Pure: identical inputs give
/// identical output, and the collection is never touched.
pub fn query<'a>(movies: &'a [Movie], params: &QueryParams) -> QueryResult<'a> {
    let mut matched: Vec<&Movie> = movies
        .iter()
        .filter(|m| structural_match(m, params.filter.as_ref()))
        .filter(|m| search_match(m, &params.search))
        .collect();

    matched.sort_by(|a, b| compare(a, b, params.sort_by, params.direction));

    let total = matched.len();
    let limit = params.page.max(1).saturating_mul(params.page_size);
    matched.truncate(limit);

    QueryResult { items: matched, total }
}

fn structural_match(movie: &Movie, filter: Option<&Filter>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let value = &filter.value;
    match filter.kind {
        FilterKind::Year => movie
            .year
            .map(|y| y.to_string().eq_ignore_ascii_case(value))
            .unwrap_or(false),
        FilterKind::Cast => movie.cast.iter().any(|c| eq_ci(c, value)),
        FilterKind::Director => eq_ci(&movie.director, value),
        FilterKind::Genre => movie.genre.iter().any(|g| eq_ci(g, value)),
        FilterKind::Unknown => false,
    }
}

fn search_match(movie: &Movie, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    movie.title.to_lowercase().contains(&term)
        || movie.cast.iter().any(|c| c.to_lowercase().contains(&term))
        || movie.director.to_lowercase().contains(&term)
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn compare(a: &Movie, b: &Movie, key: SortKey, direction: SortDirection) -> Ordering {
    // Absent years sort after present ones before the direction flip is
    // applied, so they land last either way. This is specific to the year
    // key; other keys compare substituted defaults.
    if key == SortKey::Year {
        return match (a.year, b.year) {
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (None, None) => Ordering::Equal,
            (Some(x), Some(y)) => apply(x.cmp(&y), direction),
        };
    }
    let ordering = match key {
        SortKey::Rating | SortKey::Popularity => a
            .rating
            .unwrap_or(0.0)
            .partial_cmp(&b.rating.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Runtime => a.runtime_mins.cmp(&b.runtime_mins),
        SortKey::Released => a.release_timestamp.cmp(&b.release_timestamp),
        SortKey::Year => unreachable!("handled above"),
    };
    apply(ordering, direction)
}

fn apply(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawMovie;
    use crate::normalize::normalize_movie;

    fn movie(id: &str, title: &str, year: Option<i32>, rating: Option<f64>) -> Movie {
        let mut m = normalize_movie(RawMovie::default());
        m.id = id.to_string();
        m.title = title.to_string();
        m.year = year;
        m.rating = rating;
        m
    }

    fn fixture() -> Vec<Movie> {
        let mut a = movie("1", "Anbe Sivam", Some(2003), Some(8.6));
        a.director = "Sundar C".to_string();
        a.cast = vec!["Kamal Haasan".to_string(), "Madhavan".to_string()];
        a.genre = vec!["Comedy".to_string(), "Drama".to_string()];

        let mut b = movie("2", "Thuppakki", Some(2012), Some(7.8));
        b.director = "AR Murugadoss".to_string();
        b.cast = vec!["Vijay".to_string()];
        b.genre = vec!["Action".to_string(), "Thriller".to_string()];

        let mut c = movie("3", "Vikram", Some(2022), Some(8.3));
        c.director = "Lokesh Kanagaraj".to_string();
        c.cast = vec!["Kamal Haasan".to_string(), "Vijay Sethupathi".to_string()];
        c.genre = vec!["Action".to_string()];

        let d = movie("4", "Untitled", None, None);
        vec![a, b, c, d]
    }

    fn params() -> QueryParams {
        QueryParams::default()
    }

    #[test]
    fn structural_filter_is_exact_and_case_insensitive() {
        let movies = fixture();
        let p = QueryParams {
            filter: Some(Filter { kind: FilterKind::Genre, value: "action".into() }),
            ..params()
        };
        let ids: Vec<_> = query(&movies, &p).items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        let p = QueryParams {
            filter: Some(Filter { kind: FilterKind::Cast, value: "KAMAL HAASAN".into() }),
            ..params()
        };
        assert_eq!(query(&movies, &p).total, 2);

        let p = QueryParams {
            filter: Some(Filter { kind: FilterKind::Year, value: "2012".into() }),
            ..params()
        };
        let result = query(&movies, &p);
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].id, "2");
    }

    #[test]
    fn unknown_filter_kind_yields_empty_result() {
        let movies = fixture();
        let p = QueryParams {
            filter: Some(Filter { kind: FilterKind::parse("studio"), value: "x".into() }),
            ..params()
        };
        let result = query(&movies, &p);
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn search_narrows_after_structural_filter() {
        let movies = fixture();
        let p = QueryParams {
            filter: Some(Filter { kind: FilterKind::Genre, value: "Action".into() }),
            search: "kamal".into(),
            ..params()
        };
        let result = query(&movies, &p);
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].id, "3");
    }

    #[test]
    fn search_spans_title_cast_and_director() {
        let movies = fixture();
        for (term, expected) in [("thupp", "2"), ("madhav", "1"), ("lokesh", "3")] {
            let p = QueryParams { search: term.into(), ..params() };
            let result = query(&movies, &p);
            assert_eq!(result.total, 1, "term {term}");
            assert_eq!(result.items[0].id, expected);
        }
    }

    #[test]
    fn absent_years_sort_last_in_both_directions() {
        let movies = fixture();
        let asc = query(&movies, &params());
        assert_eq!(asc.items.last().unwrap().id, "4");

        let p = QueryParams { direction: SortDirection::Desc, ..params() };
        let desc = query(&movies, &p);
        assert_eq!(desc.items.last().unwrap().id, "4");
        assert_eq!(desc.items[0].id, "3");
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let movies = vec![
            movie("1", "zulu", None, None),
            movie("2", "Alpha", None, None),
            movie("3", "beta", None, None),
        ];
        let p = QueryParams { sort_by: SortKey::Title, ..params() };
        let ids: Vec<_> = query(&movies, &p).items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn rating_sort_substitutes_zero_for_absent() {
        let movies = fixture();
        let p = QueryParams {
            sort_by: SortKey::Rating,
            direction: SortDirection::Desc,
            ..params()
        };
        let ids: Vec<_> = query(&movies, &p).items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn popularity_aliases_rating() {
        let movies = fixture();
        let by_pop = query(&movies, &QueryParams { sort_by: SortKey::Popularity, ..params() });
        let by_rating = query(&movies, &QueryParams { sort_by: SortKey::Rating, ..params() });
        assert_eq!(by_pop, by_rating);
    }

    #[test]
    fn pagination_is_prefix_stable() {
        let movies: Vec<Movie> = (0..10)
            .map(|i| movie(&i.to_string(), &format!("M{i}"), Some(2000 + i), None))
            .collect();
        let page1 = query(&movies, &QueryParams { page: 1, page_size: 3, ..params() });
        let page2 = query(&movies, &QueryParams { page: 2, page_size: 3, ..params() });
        assert_eq!(page1.items.len(), 3);
        assert_eq!(page2.items.len(), 6);
        assert_eq!(&page1.items[..], &page2.items[..3]);
        assert_eq!(page1.total, 10);
        assert_eq!(page2.total, 10);
    }

    #[test]
    fn query_is_idempotent() {
        let movies = fixture();
        let p = QueryParams { search: "a".into(), sort_by: SortKey::Rating, ..params() };
        assert_eq!(query(&movies, &p), query(&movies, &p));
    }

    #[test]
    fn unknown_sort_key_falls_back_to_year() {
        assert_eq!(SortKey::parse("votes"), SortKey::Year);
        assert_eq!(SortKey::parse("RATING"), SortKey::Rating);
    }

    #[test]
    fn page_zero_is_coerced_to_one() {
        let movies = fixture();
        let p = QueryParams { page: 0, page_size: 2, ..params() };
        assert_eq!(query(&movies, &p).items.len(), 2);
    }
}
