use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal front-end for the movie catalog
#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Browse, search and favorite movies from a static catalog", long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Movie dataset path or URL (overrides config)
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    /// Cast roster path or URL (overrides config)
    #[arg(long, global = true)]
    pub roster: Option<String>,

    /// Database URL (overrides config)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the whole catalog
    Browse {
        /// Substring search over title, cast and director
        #[arg(short, long)]
        search: Option<String>,
        /// Sort key: year, title, rating, runtime, released, popularity
        #[arg(long, default_value = "year")]
        sort: String,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        direction: String,
        /// How many "load more" pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Movies matching one structural filter
    Results {
        /// Filter field: year, cast, director or genre
        #[arg(long)]
        kind: String,
        /// Exact (case-insensitive) value to match
        #[arg(long)]
        value: String,
        /// Substring search applied after the filter
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value = "year")]
        sort: String,
        #[arg(long, default_value = "desc")]
        direction: String,
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Show one movie by id
    Details {
        id: String,
    },
    /// List release years
    Years,
    /// List genres with counts
    Genres,
    /// Browse actors, actresses, directors or the full cast
    People {
        /// Tab: actors, actresses, directors or all
        #[arg(long, default_value = "actors")]
        tab: String,
        /// Substring filter on names
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List saved favorites
    Favorites {
        /// Substring search over favorite titles
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Toggle a favorite by movie id
    Fav {
        id: String,
    },
    /// Show or set the theme preference
    Theme {
        value: Option<String>,
    },
}
