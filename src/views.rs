use std::fmt::Write as _;

use crate::aggregate;
use crate::model::{Movie, Person};
use crate::normalize::upgrade_poster_url;
use crate::query::{self, FilterKind, QueryParams};
use crate::state::{AppState, NavParams, PeopleTab};

/// Number of movies on the details page's trending strip.
const TRENDING_COUNT: usize = 8;

/// Logical page identity. Each view is one pure render function over the
/// application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Years,
    Genres,
    People,
    Favorites,
    Results,
    Details,
}

impl View {
    /// Map a page identifier to a view; unknown identifiers land on home.
    pub fn from_page(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "years" => Self::Years,
            "genres" => Self::Genres,
            "cast" | "people" => Self::People,
            "favorites" => Self::Favorites,
            "results" => Self::Results,
            "details" => Self::Details,
            _ => Self::Home,
        }
    }
}

/// Render the selected view. The whole output is replaced per interaction;
/// nothing is patched incrementally.
pub fn render(view: View, state: &AppState, nav: &NavParams) -> String {
    match view {
        View::Home => render_home(state),
        View::Years => render_years(state),
        View::Genres => render_genres(state),
        View::People => render_people(state),
        View::Favorites => render_favorites(state),
        View::Results => render_results(state, nav),
        View::Details => render_details(state, nav),
    }
}

fn render_home(state: &AppState) -> String {
    let result = query::query(&state.movies, &state.params);
    let mut out = String::from("All Movies\n");
    render_grid(&mut out, &result.items, result.total);
    out
}

fn render_results(state: &AppState, nav: &NavParams) -> String {
    let params = QueryParams {
        filter: nav.filter.clone(),
        ..state.params.clone()
    };
    let result = query::query(&state.movies, &params);

    let heading = match &nav.filter {
        Some(f) => match f.kind {
            FilterKind::Year => format!("Year: {}", f.value),
            FilterKind::Cast => format!("Cast: {}", f.value),
            FilterKind::Director => format!("Director: {}", f.value),
            FilterKind::Genre => format!("Genre: {}", f.value),
            FilterKind::Unknown => "Results".to_string(),
        },
        None => "Results".to_string(),
    };

    let mut out = format!("{heading} — {} movies\n", result.total);
    render_grid(&mut out, &result.items, result.total);
    out
}

fn render_favorites(state: &AppState) -> String {
    // The favorites page narrows by title only.
    let term = state.params.search.to_lowercase();
    let shown: Vec<&Movie> = state
        .favorites
        .iter()
        .map(|f| &f.movie)
        .filter(|m| term.is_empty() || m.title.to_lowercase().contains(&term))
        .collect();

    let mut out = format!("Favorites — {} movies\n", shown.len());
    render_grid(&mut out, &shown, shown.len());
    out
}

fn render_years(state: &AppState) -> String {
    let years = aggregate::release_years(&state.movies);
    let mut out = String::from("Browse by Year\n");
    for year in years {
        let _ = writeln!(out, "  {year}");
    }
    out
}

fn render_genres(state: &AppState) -> String {
    let genres = aggregate::genre_counts(&state.movies);
    let mut out = String::from("Browse by Genre\n");
    for genre in genres {
        let _ = writeln!(out, "  {} — {} {}", genre.name, genre.count, plural(genre.count));
    }
    out
}

fn render_people(state: &AppState) -> String {
    let people = match state.people.tab {
        PeopleTab::Actors => aggregate::roster_people(&state.actors, &state.movies),
        PeopleTab::Actresses => aggregate::roster_people(&state.actresses, &state.movies),
        PeopleTab::Directors => aggregate::by_director(&state.movies),
        PeopleTab::All => {
            let mut all = aggregate::by_cast(&state.movies);
            let roster = state.actors.iter().chain(state.actresses.iter());
            aggregate::attach_roster_images(&mut all, roster);
            all
        }
    };
    let people = aggregate::filter_people(people, &state.people.filter);
    let (slice, page, total_pages) =
        aggregate::window(&people, state.people.page, state.people.page_size);

    let mut out = format!("Browse by {}\n", state.people.tab.label());
    if slice.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }
    for person in slice {
        render_person(&mut out, person);
    }
    if total_pages > 1 {
        let _ = writeln!(out, "Page {page} of {total_pages}");
    }
    out
}

fn render_details(state: &AppState, nav: &NavParams) -> String {
    let Some(movie) = nav.id.as_deref().and_then(|id| state.find_movie(id)) else {
        return "Movie not found\n".to_string();
    };
    let is_favorite = state.favorites.iter().any(|f| f.movie.id == movie.id);

    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(
        out,
        "  {} | {} | {}",
        movie
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        movie
            .rating
            .map(|r| format!("★{r}"))
            .unwrap_or_else(|| "unrated".to_string()),
        movie.runtime,
    );
    if !movie.genre.is_empty() {
        let _ = writeln!(out, "  Genre: {}", movie.genre.join(", "));
    }
    let _ = writeln!(out, "  Director: {}", movie.director);
    if !movie.cast.is_empty() {
        let _ = writeln!(out, "  Cast: {}", movie.cast.join(", "));
    }
    let _ = writeln!(out, "  {}", movie.plot);
    let _ = writeln!(out, "  Poster: {}", movie.poster);
    let _ = writeln!(out, "  Favorite: {}", if is_favorite { "yes" } else { "no" });

    let _ = writeln!(out, "\nTrending Movies");
    for m in state.movies.iter().take(TRENDING_COUNT) {
        let _ = writeln!(
            out,
            "  {} ({})",
            m.title,
            m.year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())
        );
    }
    out
}

fn render_grid(out: &mut String, shown: &[&Movie], total: usize) {
    if shown.is_empty() {
        out.push_str("No movies found.\n");
        return;
    }
    for movie in shown {
        render_movie_line(out, movie);
    }
    if shown.len() < total {
        let _ = writeln!(out, "... {} more (load more)", total - shown.len());
    }
}

fn render_movie_line(out: &mut String, movie: &Movie) {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let rating = movie
        .rating
        .map(|r| format!(" ★{r}"))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "  [{}] {} ({year}){rating} — {}",
        movie.id, movie.title, movie.runtime
    );
}

fn render_person(out: &mut String, person: &Person) {
    let portrait = if person.img.is_empty() {
        String::new()
    } else {
        format!(" — {}", upgrade_poster_url(&person.img))
    };
    let _ = writeln!(
        out,
        "  {} — {} {}{portrait}",
        person.name,
        person.count,
        plural(person.count)
    );
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "movie"
    } else {
        "movies"
    }
}
