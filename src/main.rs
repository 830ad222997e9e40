mod catalog;
mod data_loading;
mod frontier;
mod ids;
mod search;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::catalog::{Catalog, LookupError};
use crate::frontier::{QueueFrontier, StackFrontier};
use crate::ids::PersonId;
use crate::search::{Path, SearchReport};

#[derive(Parser)]
#[command(name = "degrees", about = "Degrees of separation between two film actors")]
struct Cli {
    /// Name of the first person.
    source: String,
    /// Name of the second person.
    target: String,
    /// Directory holding people.csv, movies.csv and stars.csv.
    #[arg(long, env = "DEGREES_DATA", default_value = "large")]
    data: PathBuf,
    /// Id to use when the source name matches several people.
    #[arg(long)]
    source_id: Option<String>,
    /// Id to use when the target name matches several people.
    #[arg(long)]
    target_id: Option<String>,
    /// Search depth-first instead; the path found may not be the shortest.
    #[arg(long)]
    depth_first: bool,
    /// Also print how many people the search expanded.
    #[arg(long)]
    stats: bool,
}

fn resolve(catalog: &Catalog, name: &str, chosen: Option<&str>) -> Result<PersonId> {
    let chosen = chosen.map(PersonId::from);
    match catalog.resolve_person(name, chosen.as_ref()) {
        Ok(id) => Ok(id),
        Err(LookupError::AmbiguousPerson { name, candidates }) => {
            eprintln!("Which '{name}'?");
            for candidate in &candidates {
                eprintln!("{candidate}");
            }
            anyhow::bail!("'{name}' is ambiguous, pick one with --source-id or --target-id")
        }
        Err(err) => Err(err.into()),
    }
}

fn name_of(catalog: &Catalog, id: &PersonId) -> String {
    catalog.person(id).map_or_else(|| id.to_string(), |p| p.name.clone())
}

/// Human readable lines for a search result.
fn describe(catalog: &Catalog, source: &PersonId, path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return vec!["Not connected.".to_string()];
    };
    let mut lines = vec![format!("{} degrees of separation.", path.degrees())];
    let mut previous = source;
    for (i, step) in path.steps.iter().enumerate() {
        let title = catalog
            .movie(&step.movie)
            .map_or_else(|| step.movie.to_string(), |m| m.title.clone());
        lines.push(format!(
            "{}: {} and {} starred in {}",
            i + 1,
            name_of(catalog, previous),
            name_of(catalog, &step.person),
            title
        ));
        previous = &step.person;
    }
    lines
}

fn run_with_stats(
    catalog: &Catalog,
    source: &PersonId,
    target: &PersonId,
    depth_first: bool,
) -> SearchReport {
    if depth_first {
        search::find_path_with(catalog, source, target, StackFrontier::new())
    } else {
        search::find_path_with(catalog, source, target, QueueFrontier::new())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("degrees=info")),
        )
        .init();

    let cli = Cli::parse();
    let (catalog, _) = data_loading::load_directory(&cli.data)
        .with_context(|| format!("loading data from {}", cli.data.display()))?;

    let source = resolve(&catalog, &cli.source, cli.source_id.as_deref())?;
    let target = resolve(&catalog, &cli.target, cli.target_id.as_deref())?;

    if cli.stats {
        let report = run_with_stats(&catalog, &source, &target, cli.depth_first);
        for line in describe(&catalog, &source, report.path.as_ref()) {
            println!("{line}");
        }
        println!("{} people explored.", report.explored);
        return Ok(());
    }

    let path = if cli.depth_first {
        search::find_any_path(&catalog, &source, &target)
    } else {
        search::find_shortest_path(&catalog, &source, &target)
    };
    for line in describe(&catalog, &source, path.as_ref()) {
        println!("{line}");
    }
    Ok(())
}
