mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use marquee::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }
    if let Some(roster) = cli.roster {
        config.roster = roster;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = Some(database_url);
    }

    // Startup is all-or-nothing: a failed fetch or parse is terminal.
    let mut catalog = Catalog::load(&config).await?;
    let mut state = catalog.state();

    match cli.command {
        Commands::Browse { search, sort, direction, pages } => {
            state.set_sort(SortKey::parse(&sort));
            state.params.direction = SortDirection::parse(&direction);
            if let Some(search) = search {
                state.set_search(search);
            }
            state.params.page = pages.max(1);
            print!("{}", render(View::Home, &state, &NavParams::default()));
        }
        Commands::Results { kind, value, search, sort, direction, pages } => {
            state.set_sort(SortKey::parse(&sort));
            state.params.direction = SortDirection::parse(&direction);
            if let Some(search) = search {
                state.set_search(search);
            }
            state.params.page = pages.max(1);
            let nav = NavParams {
                id: None,
                filter: Some(Filter { kind: FilterKind::parse(&kind), value }),
            };
            print!("{}", render(View::Results, &state, &nav));
        }
        Commands::Details { id } => {
            let nav = NavParams { id: Some(id), filter: None };
            print!("{}", render(View::Details, &state, &nav));
        }
        Commands::Years => {
            print!("{}", render(View::Years, &state, &NavParams::default()));
        }
        Commands::Genres => {
            print!("{}", render(View::Genres, &state, &NavParams::default()));
        }
        Commands::People { tab, filter, page } => {
            state.people.tab = PeopleTab::parse(&tab);
            state.people.filter = filter.unwrap_or_default();
            state.people.page = page.max(1);
            print!("{}", render(View::People, &state, &NavParams::default()));
        }
        Commands::Favorites { search } => {
            if let Some(search) = search {
                state.set_search(search);
            }
            print!("{}", render(View::Favorites, &state, &NavParams::default()));
        }
        Commands::Fav { id } => match catalog.toggle_favorite(&id).await {
            Some(true) => println!("Added to favorites: {id}"),
            Some(false) => println!("Removed from favorites: {id}"),
            None => println!("Movie not found: {id}"),
        },
        Commands::Theme { value } => match value {
            Some(value) => {
                catalog.set_theme(&value).await;
                println!("Theme set to {value}");
            }
            None => println!("{}", catalog.theme()),
        },
    }

    Ok(())
}
