use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::ids::{MovieId, PersonId};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },

    #[error("malformed row in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct PersonRow {
    id: PersonId,
    name: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    birth: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct MovieRow {
    id: MovieId,
    title: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct StarRow {
    person_id: PersonId,
    movie_id: MovieId,
}

/// Table sizes seen while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub people: usize,
    pub movies: usize,
    pub stars: usize,
    pub dropped_stars: usize,
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    reader
        .headers()
        .map_err(|source| LoadError::Csv { path: path.to_path_buf(), source })?; // a broken header row fails the whole table
    Ok(reader)
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, LoadError> {
    open_reader(path)?
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| LoadError::Csv { path: path.to_path_buf(), source })
}

/// Builds a catalog from `people.csv`, `movies.csv` and `stars.csv` in `dir`.
/// Star rows that are incomplete or point at an unknown person or movie are skipped.
pub fn load_directory(dir: &Path) -> Result<(Catalog, LoadSummary), LoadError> {
    let started = Instant::now();
    let mut catalog = Catalog::new();
    let mut summary = LoadSummary::default();

    for row in read_rows::<PersonRow>(&dir.join("people.csv"))? {
        catalog.add_person(row.id, &row.name, row.birth);
        summary.people += 1;
    }

    for row in read_rows::<MovieRow>(&dir.join("movies.csv"))? {
        catalog.add_movie(row.id, &row.title, row.year);
        summary.movies += 1;
    }

    let stars_path = dir.join("stars.csv");
    for row in open_reader(&stars_path)?.into_deserialize::<StarRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                debug!(error = %err, "dropping unreadable star row"); // partial rows are skipped, not fatal
                summary.dropped_stars += 1;
                continue;
            }
        };
        if catalog.add_star(&row.person_id, &row.movie_id) {
            summary.stars += 1;
        } else {
            debug!(person = %row.person_id, movie = %row.movie_id, "dropping star row with unknown id");
            summary.dropped_stars += 1;
        }
    }

    info!(
        dir = %dir.display(),
        people = summary.people,
        movies = summary.movies,
        stars = summary.stars,
        dropped = summary.dropped_stars,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "data loaded"
    );
    Ok((catalog, summary))
}
