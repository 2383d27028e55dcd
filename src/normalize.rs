use chrono::{LocalResult, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::model::{Movie, RawMovie};

pub const DEFAULT_POSTER: &str = "default.png";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_RUNTIME: &str = "N/A";
pub const DEFAULT_PLOT: &str = "No plot summary available.";
pub const DEFAULT_DIRECTOR: &str = "Unknown director";

const POSTER_HOST: &str = "m.media-amazon.com";

// Everything up to and including the "@._V1_" size-suffix marker.
static POSTER_BASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+@\._V1_)").expect("poster base pattern"));
// Trailing "_.<ext>" of the original URL.
static POSTER_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)_\.(jpg|jpeg|png|webp)$").expect("poster ext pattern"));

/// Convert a raw dataset row into a fully-defaulted [`Movie`]. Total: missing
/// or malformed fields become defaults, never errors.
pub fn normalize_movie(raw: RawMovie) -> Movie {
    let id = coerce_id(raw.id.as_ref())
        .or_else(|| coerce_id(raw.index.as_ref()))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let year = coerce_number(raw.year.as_ref()).map(|n| n as i32);
    let rating = coerce_number(raw.rating.as_ref());

    let genre = raw
        .genre
        .as_deref()
        .map(split_genres)
        .unwrap_or_default();

    let runtime_mins = raw.runtime.as_deref().map(parse_runtime_mins).unwrap_or(0);
    let runtime = raw
        .runtime
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());

    let released = raw.released.clone().unwrap_or_default();
    let release_timestamp = parse_release_timestamp(raw.released.as_deref(), year);

    let poster = raw
        .poster
        .or(raw.image)
        .filter(|p| !p.is_empty())
        .map(|p| upgrade_poster_url(&p))
        .unwrap_or_else(|| DEFAULT_POSTER.to_string());

    Movie {
        id,
        title,
        year,
        rating,
        genre,
        runtime,
        runtime_mins,
        released,
        release_timestamp,
        plot: raw
            .plot
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLOT.to_string()),
        director: raw
            .director
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTOR.to_string()),
        cast: raw.cast.unwrap_or_default(),
        poster,
    }
}

/// Comma-separated genre string to a trimmed list; empty segments dropped.
pub fn split_genres(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// First run of digits in a runtime display string ("165 min" -> 165);
/// 0 when there are none, saturating when the run exceeds `u32`.
pub fn parse_runtime_mins(s: &str) -> u32 {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// Release string to epoch milliseconds. Tries the release date itself, then
/// Jan 1 of the given year, then 0. The ordering is load-bearing: release
/// sorting depends on it.
pub fn parse_release_timestamp(released: Option<&str>, year: Option<i32>) -> i64 {
    if let Some(s) = released {
        if let Some(ts) = parse_release_date(s.trim()) {
            return ts;
        }
    }
    if let Some(y) = year {
        if let Some(d) = NaiveDate::from_ymd_opt(y, 1, 1) {
            if let Some(ts) = local_midnight_millis(d) {
                return ts;
            }
        }
    }
    0
}

fn parse_release_date(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d %b %Y", "%b %d, %Y"];
    FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(local_midnight_millis)
}

fn local_midnight_millis(date: NaiveDate) -> Option<i64> {
    let dt = date.and_hms_opt(0, 0, 0)?;
    match chrono::Local.from_local_datetime(&dt) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => Some(t.timestamp_millis()),
        LocalResult::None => None,
    }
}

/// Rewrite a known-host poster URL to its 600px variant, preserving the
/// width/height aspect mode and the original extension (jpg when the
/// extension is unrecognizable). Any other input passes through unchanged.
pub fn upgrade_poster_url(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return raw.to_string();
    };
    if parsed.host_str() != Some(POSTER_HOST) {
        return raw.to_string();
    }
    let Some(base) = POSTER_BASE_RE.captures(raw).and_then(|c| c.get(1)) else {
        return raw.to_string();
    };
    let dimension = if raw.contains("UX") { "UX600" } else { "UY600" };
    let extension = POSTER_EXT_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| format!("_.{}", m.as_str()))
        .unwrap_or_else(|| "_.jpg".to_string());
    format!("{}QL100_{}_{}", base.as_str(), dimension, extension)
}

// JS-style truthy coercions for the wobbly source fields: numbers and
// numeric strings count, zero and garbage do not.

fn coerce_id(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_number(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    if n == 0.0 || n.is_nan() {
        None
    } else {
        Some(n)
    }
}
