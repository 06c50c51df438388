use clap::{Parser, Subcommand};
use log::{LevelFilter, debug, info};
use serde::Serialize;
use std::path::PathBuf;

use crate::catalog::{MusicGroup, operations::MusicCatalog};
use crate::config;

#[derive(Parser)]
#[command(name = "musicgroup")]
#[command(version = "0.1")]
#[command(about = "Query an in-memory catalog of albums and songs")]
pub struct Cli {
    /// Path to the catalog TOML file
    #[arg(short, long, default_value = "catalog.toml")]
    pub catalog: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Song names in alphabetical order
    Songs {
        /// Print every field of each song
        #[arg(short, long)]
        details: bool,
    },
    /// Album names and their years
    Albums,
    /// Albums released in the given year
    AlbumsInYear { year: i32 },
    /// Number of songs in an album
    Count { album: String },
    /// Number of songs not in any album
    CountNoAlbum,
    /// Average song duration of an album
    Average { album: String },
    /// Name of the longest song
    LongestSong,
    /// Name of the album with the longest total duration
    LongestAlbum,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    if let Err(e) = builder.try_init() {
        debug!("keeping already installed logger: {e}");
    }
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = config::Config::load(&cli.catalog)?.into_catalog()?;
    info!(
        "loaded {} songs from {}",
        catalog.song_count(),
        cli.catalog.display()
    );

    println!("{}", execute(&catalog, &cli.command, cli.json)?);
    Ok(())
}

fn render<T: Serialize>(
    value: &T,
    json: bool,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

fn or_none<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<none>".to_string())
}

/// Runs a single query and formats its result
pub fn execute(catalog: &MusicCatalog, command: &Commands, json: bool) -> anyhow::Result<String> {
    match command {
        Commands::Songs { details: false } => {
            let names = catalog.ordered_song_names().collect::<Vec<_>>();
            render(&names, json, |names| names.join("\n"))
        }

        Commands::Songs { details: true } => {
            let mut songs = catalog.songs().collect::<Vec<_>>();
            songs.sort_by(|a, b| a.name.cmp(&b.name));
            render(&songs, json, |songs| {
                songs
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        Commands::Albums => {
            let mut albums = catalog.albums().collect::<Vec<_>>();
            albums.sort_by(|a, b| a.name.cmp(&b.name));
            render(&albums, json, |albums| {
                albums
                    .iter()
                    .map(|a| format!("{} ({})", a.name, a.year))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        Commands::AlbumsInYear { year } => {
            let mut names = catalog.albums_in_year(*year).collect::<Vec<_>>();
            names.sort_unstable();
            render(&names, json, |names| names.join("\n"))
        }

        Commands::Count { album } => {
            render(&catalog.count_songs(album), json, ToString::to_string)
        }

        Commands::CountNoAlbum => render(
            &catalog.count_songs_with_no_album(),
            json,
            ToString::to_string,
        ),

        Commands::Average { album } => {
            render(&catalog.average_duration_of_songs(album), json, or_none)
        }

        Commands::LongestSong => render(&catalog.longest_song(), json, or_none),

        Commands::LongestAlbum => render(&catalog.longest_album(), json, or_none),
    }
}
