//! `cinedb` command-line entry point.
//!
//! # Usage
//!
//! ```text
//! cinedb --db catalog.db seed
//! cinedb --db catalog.db movies --genre drama
//! cinedb --db catalog.db movies --actor "Robert De Niro"
//! cinedb --db catalog.db actors --gender Female
//! ```

mod seed;

use anyhow::{anyhow, Context, Result};
use cinedb_core::db::{open_db, open_db_in_memory};
use cinedb_core::{default_log_level, init_logging, Actor, Catalog, Gender, Movie};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cinedb", version, about = "Movie catalog over SQLite")]
struct Args {
    /// SQLite database file; an in-memory database is used when absent.
    #[arg(long, env = "CINEDB_DB", value_name = "FILE")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error (default depends on build mode).
    #[arg(long, env = "CINEDB_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when absent.
    #[arg(long, env = "CINEDB_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store the sample catalog and print the created movies.
    Seed,
    /// List movies, optionally filtered by genre name or actor full name.
    Movies {
        #[arg(long, conflicts_with = "actor")]
        genre: Option<String>,
        #[arg(long)]
        actor: Option<String>,
    },
    /// List actors, optionally filtered by gender.
    Actors {
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,
    },
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::parse(value).ok_or_else(|| format!("unknown gender `{value}`; expected Male|Female|Other"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = match &args.db {
        Some(path) => {
            open_db(path).with_context(|| format!("opening database {}", path.display()))?
        }
        None => open_db_in_memory().context("opening in-memory database")?,
    };
    let catalog = Catalog::try_new(&conn).context("wiring catalog")?;

    match args.command {
        Command::Seed => {
            for movie in seed::sample_movies() {
                let created = catalog.create_movie(movie).context("creating movie")?;
                print_movie(&created);
            }
            info!("event=cli_seed module=cli status=ok");
        }
        Command::Movies { genre, actor } => {
            let movies = match (genre, actor) {
                (Some(name), _) => match catalog.genres().find_by_name(&name)? {
                    Some(genre) => catalog.movies().find_all_by_genre(&genre)?,
                    None => Vec::new(),
                },
                (None, Some(fullname)) => match catalog.actors().find_by_fullname(&fullname)? {
                    Some(actor) => catalog.movies().find_all_by_actor(&actor)?,
                    None => Vec::new(),
                },
                (None, None) => catalog.movies().find_all()?,
            };
            movies.iter().for_each(print_movie);
        }
        Command::Actors { gender } => {
            let actors = match gender {
                Some(gender) => catalog.actors().find_all_by_gender(gender)?,
                None => catalog.actors().find_all()?,
            };
            actors.iter().for_each(print_actor);
        }
    }

    Ok(())
}

fn print_movie(movie: &Movie) {
    let genres: Vec<&str> = movie.genres.iter().map(|genre| genre.name.as_str()).collect();
    println!(
        "#{} {} ({}, {} min) [{}]",
        movie.id.unwrap_or_default(),
        movie.title,
        movie.release_date,
        movie.duration.as_secs() / 60,
        genres.join(", ")
    );
    for (role, actor) in &movie.actors {
        println!(
            "    {role}: {} (#{})",
            actor.full_name(),
            actor.id.unwrap_or_default()
        );
    }
}

fn print_actor(actor: &Actor) {
    let deathdate = actor
        .deathdate
        .map(|date| format!(" - {date}"))
        .unwrap_or_default();
    println!(
        "#{} {} ({:?}, {}{})",
        actor.id.unwrap_or_default(),
        actor.full_name(),
        actor.gender,
        actor.birthdate,
        deathdate
    );
}
