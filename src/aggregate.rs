use std::collections::HashMap;

use crate::model::{GenreCount, Movie, Person, RosterEntry};
use crate::normalize::DEFAULT_DIRECTOR;

/// Default people-grid page size. The people pages window-paginate (slice
/// per page with prev/next) rather than prefix-slice like the movie grid.
pub const PEOPLE_PAGE_SIZE: usize = 40;

/// Group movies by director, count, order by descending count then name.
/// The substituted placeholder director is not a person and is skipped.
pub fn by_director(movies: &[Movie]) -> Vec<Person> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for movie in movies {
        let name = movie.director.trim();
        if name.is_empty() || name == DEFAULT_DIRECTOR {
            continue;
        }
        *counts.entry(name).or_insert(0) += 1;
    }
    collect_sorted(counts)
}

/// Group movies by cast member, count, order by descending count then name.
pub fn by_cast(movies: &[Movie]) -> Vec<Person> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for movie in movies {
        for member in &movie.cast {
            let name = member.trim();
            if name.is_empty() {
                continue;
            }
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    collect_sorted(counts)
}

/// Attach roster images to aggregated people by exact name match. When a
/// name appears in several roster sections the earliest entry wins.
/// Unmatched names keep an empty image; this is not an error.
pub fn attach_roster_images<'a, I>(people: &mut [Person], roster: I)
where
    I: IntoIterator<Item = &'a RosterEntry>,
{
    let mut images: HashMap<&str, &str> = HashMap::new();
    for entry in roster {
        images.entry(entry.name.as_str()).or_insert(entry.img.as_str());
    }
    for person in people {
        if let Some(img) = images.get(person.name.as_str()) {
            person.img = (*img).to_string();
        }
    }
}

/// One roster section as a people list: every roster member appears, with a
/// zero count when the collection never credits them.
pub fn roster_people(entries: &[RosterEntry], movies: &[Movie]) -> Vec<Person> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for movie in movies {
        for member in &movie.cast {
            *counts.entry(member.trim()).or_insert(0) += 1;
        }
    }
    let mut people: Vec<Person> = entries
        .iter()
        .map(|e| Person {
            name: e.name.clone(),
            img: e.img.clone(),
            count: counts.get(e.name.as_str()).copied().unwrap_or(0),
        })
        .collect();
    sort_people(&mut people);
    people
}

/// Case-insensitive substring narrowing on person names.
pub fn filter_people(people: Vec<Person>, term: &str) -> Vec<Person> {
    if term.is_empty() {
        return people;
    }
    let term = term.to_lowercase();
    people
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&term))
        .collect()
}

/// Genre name + movie count, ordered by descending count then name.
pub fn genre_counts(movies: &[Movie]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for movie in movies {
        for genre in &movie.genre {
            let name = genre.trim();
            if name.is_empty() {
                continue;
            }
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(name, count)| GenreCount { name: name.to_string(), count })
        .collect();
    genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    genres
}

/// Distinct present release years, newest first.
pub fn release_years(movies: &[Movie]) -> Vec<i32> {
    let mut years: Vec<i32> = movies.iter().filter_map(|m| m.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Window-paginate a list: the slice for a 1-based page plus the total page
/// count. An out-of-range page clamps to the last one.
pub fn window<T>(list: &[T], page: usize, page_size: usize) -> (&[T], usize, usize) {
    let page_size = page_size.max(1);
    let total_pages = list.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(list.len());
    (&list[start..end], page, total_pages)
}

fn collect_sorted(counts: HashMap<&str, usize>) -> Vec<Person> {
    let mut people: Vec<Person> = counts
        .into_iter()
        .map(|(name, count)| Person {
            name: name.to_string(),
            img: String::new(),
            count,
        })
        .collect();
    sort_people(&mut people);
    people
}

fn sort_people(people: &mut [Person]) {
    people.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawMovie;
    use crate::normalize::normalize_movie;

    fn movie(director: &str, cast: &[&str], genre: &[&str], year: Option<i32>) -> Movie {
        let mut m = normalize_movie(RawMovie::default());
        m.director = director.to_string();
        m.cast = cast.iter().map(|c| c.to_string()).collect();
        m.genre = genre.iter().map(|g| g.to_string()).collect();
        m.year = year;
        m
    }

    fn fixture() -> Vec<Movie> {
        vec![
            movie("A", &["X", "Y"], &["Drama"], Some(2020)),
            movie("A", &["X"], &["Drama", "Action"], Some(2018)),
            movie("B", &["Z"], &["Action"], Some(2020)),
            movie(DEFAULT_DIRECTOR, &[], &[], None),
        ]
    }

    #[test]
    fn directors_count_desc_then_name_asc() {
        let people = by_director(&fixture());
        let expected: Vec<(&str, usize)> = vec![("A", 2), ("B", 1)];
        let got: Vec<(&str, usize)> = people.iter().map(|p| (p.name.as_str(), p.count)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn cast_aggregate_counts_every_appearance() {
        let people = by_cast(&fixture());
        let got: Vec<(&str, usize)> = people.iter().map(|p| (p.name.as_str(), p.count)).collect();
        assert_eq!(got, vec![("X", 2), ("Y", 1), ("Z", 1)]);
    }

    #[test]
    fn roster_join_attaches_images_and_tolerates_misses() {
        let mut people = by_cast(&fixture());
        let roster = vec![RosterEntry { name: "Y".into(), img: "imgY".into() }];
        attach_roster_images(&mut people, &roster);
        let y = people.iter().find(|p| p.name == "Y").unwrap();
        assert_eq!(y.img, "imgY");
        let x = people.iter().find(|p| p.name == "X").unwrap();
        assert_eq!(x.img, "");
    }

    #[test]
    fn roster_join_prefers_the_first_section_on_duplicate_names() {
        let mut people = by_cast(&fixture());
        let roster = vec![
            RosterEntry { name: "Y".into(), img: "fromActors".into() },
            RosterEntry { name: "Y".into(), img: "fromActresses".into() },
        ];
        attach_roster_images(&mut people, &roster);
        let y = people.iter().find(|p| p.name == "Y").unwrap();
        assert_eq!(y.img, "fromActors");
    }

    #[test]
    fn roster_people_zero_fill_and_order() {
        let entries = vec![
            RosterEntry { name: "Q".into(), img: String::new() },
            RosterEntry { name: "X".into(), img: "imgX".into() },
        ];
        let people = roster_people(&entries, &fixture());
        let got: Vec<(&str, usize)> = people.iter().map(|p| (p.name.as_str(), p.count)).collect();
        assert_eq!(got, vec![("X", 2), ("Q", 0)]);
    }

    #[test]
    fn people_filter_is_substring_ci() {
        let people = vec![
            Person { name: "Kamal Haasan".into(), img: String::new(), count: 3 },
            Person { name: "Vijay".into(), img: String::new(), count: 2 },
        ];
        let narrowed = filter_people(people, "KAM");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].name, "Kamal Haasan");
    }

    #[test]
    fn genre_counts_order() {
        let genres = genre_counts(&fixture());
        let got: Vec<(&str, usize)> = genres.iter().map(|g| (g.name.as_str(), g.count)).collect();
        assert_eq!(got, vec![("Action", 2), ("Drama", 2)]);
    }

    #[test]
    fn years_are_distinct_and_descending() {
        assert_eq!(release_years(&fixture()), vec![2020, 2018]);
    }

    #[test]
    fn window_pagination_clamps() {
        let list: Vec<i32> = (0..95).collect();
        let (slice, page, total) = window(&list, 1, 40);
        assert_eq!((slice.len(), page, total), (40, 1, 3));
        let (slice, page, _) = window(&list, 3, 40);
        assert_eq!((slice.len(), page), (15, 3));
        let (slice, page, _) = window(&list, 9, 40);
        assert_eq!((slice.len(), page), (15, 3));
        let (slice, page, total) = window::<i32>(&[], 1, 40);
        assert_eq!((slice.len(), page, total), (0, 1, 1));
    }
}
