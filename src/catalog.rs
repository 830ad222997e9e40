use std::collections::{BTreeSet, HashMap};
use std::fmt;

use thiserror::Error;

use crate::ids::{MovieId, PersonId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birth: Option<i32>,
    pub movies: BTreeSet<MovieId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub stars: BTreeSet<PersonId>,
}

/// A person offered back to the caller when a name matches more than one id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: PersonId,
    pub name: String,
    pub birth: Option<i32>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.birth {
            Some(birth) => write!(f, "ID: {}, Name: {}, Birth: {}", self.id, self.name, birth),
            None => write!(f, "ID: {}, Name: {}, Birth: unknown", self.id, self.name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("person not found: {0}")]
    UnknownPerson(String),

    #[error("'{name}' matches {} people", .candidates.len())]
    AmbiguousPerson { name: String, candidates: Vec<Candidate> },
}

/// People, movies and the "starred in" relation between them, plus a
/// lowercased name index used only for resolving names to ids.
#[derive(Debug, Default)]
pub struct Catalog {
    people: HashMap<PersonId, Person>,
    movies: HashMap<MovieId, Movie>,
    names: HashMap<String, BTreeSet<PersonId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_person(&mut self, id: PersonId, name: &str, birth: Option<i32>) {
        self.names.entry(name.to_lowercase()).or_default().insert(id.clone()); // names are matched case-insensitively
        self.people.insert(
            id.clone(),
            Person { id, name: name.to_string(), birth, movies: BTreeSet::new() },
        );
    }

    pub fn add_movie(&mut self, id: MovieId, title: &str, year: Option<i32>) {
        self.movies.insert(
            id.clone(),
            Movie { id, title: title.to_string(), year, stars: BTreeSet::new() },
        );
    }

    pub fn add_star(&mut self, person: &PersonId, movie: &MovieId) -> bool {
        let (Some(p), Some(m)) = (self.people.get_mut(person), self.movies.get_mut(movie)) else {
            return false; // unknown person or movie, link dropped and catalog untouched
        };
        p.movies.insert(movie.clone()); // person -> movies
        m.stars.insert(person.clone()); // movie -> stars
        true
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    /// Every (movie, co-star) pair one hop away from `person`.
    pub fn neighbors(&self, person: &PersonId) -> BTreeSet<(MovieId, PersonId)> {
        let mut neighbors = BTreeSet::new();
        let Some(p) = self.people.get(person) else {
            return neighbors; // unknown ids have no neighbors
        };
        for movie_id in &p.movies {
            if let Some(movie) = self.movies.get(movie_id) {
                for co_star in movie.stars.iter().filter(|star| *star != person) { // never their own neighbor
                    neighbors.insert((movie_id.clone(), co_star.clone()));
                }
            }
        }
        neighbors
    }

    pub fn person_ids_for_name(&self, name: &str) -> Vec<PersonId> {
        self.names
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Resolves a name to a single id. When several people share the name,
    /// `chosen` picks one of them; otherwise the candidates are handed back.
    pub fn resolve_person(
        &self,
        name: &str,
        chosen: Option<&PersonId>,
    ) -> Result<PersonId, LookupError> {
        let mut ids = self.person_ids_for_name(name);
        match ids.len() {
            0 => Err(LookupError::UnknownPerson(name.to_string())),
            1 => Ok(ids.remove(0)),
            _ => match chosen {
                Some(id) if ids.contains(id) => Ok(id.clone()),
                _ => Err(LookupError::AmbiguousPerson {
                    name: name.to_string(),
                    candidates: ids.iter().filter_map(|id| self.candidate(id)).collect(),
                }),
            },
        }
    }

    fn candidate(&self, id: &PersonId) -> Option<Candidate> {
        self.people.get(id).map(|p| Candidate {
            id: p.id.clone(),
            name: p.name.clone(),
            birth: p.birth,
        })
    }
}
