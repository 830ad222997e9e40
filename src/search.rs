use std::collections::HashSet;
use std::time::Instant;

use tracing::debug;

use crate::catalog::Catalog;
use crate::frontier::{Frontier, Node, QueueFrontier, StackFrontier};
use crate::ids::{MovieId, PersonId};

/// One hop: `person` is reached through `movie`, shared with the previous person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub movie: MovieId,
    pub person: PersonId,
}

/// Ordered hops from the source's first co-star to the target. Empty when
/// source and target are the same person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    pub steps: Vec<Step>,
}

impl Path {
    pub fn degrees(&self) -> usize {
        self.steps.len()
    }
}

/// Outcome of one search plus the number of people expanded along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub path: Option<Path>,
    pub explored: usize,
}

/// Breadth-first search for a path with the fewest hops. `None` means the two
/// people are not connected.
pub fn find_shortest_path(catalog: &Catalog, source: &PersonId, target: &PersonId) -> Option<Path> {
    find_path_with(catalog, source, target, QueueFrontier::new()).path
}

/// Depth-first variant. Finds some connecting path, not necessarily the shortest.
pub fn find_any_path(catalog: &Catalog, source: &PersonId, target: &PersonId) -> Option<Path> {
    find_path_with(catalog, source, target, StackFrontier::new()).path
}

/// Search driver shared by both traversal orders. Ids are assumed valid; an
/// unknown source simply has no neighbors.
pub fn find_path_with<F>(
    catalog: &Catalog,
    source: &PersonId,
    target: &PersonId,
    mut frontier: F,
) -> SearchReport
where
    F: Frontier<PersonId, MovieId>,
{
    if source == target {
        return SearchReport { path: Some(Path::default()), explored: 0 }; // zero hops, not "not connected"
    }

    let started = Instant::now();
    let mut expanded: Vec<Node<PersonId, MovieId>> = Vec::new();
    let mut explored = HashSet::new();
    frontier.add(Node::root(source.clone()));

    loop {
        if frontier.is_empty() {
            debug!(%source, %target, explored = explored.len(), "no path");
            return SearchReport { path: None, explored: explored.len() }; // everything reachable was explored
        }
        let Ok(node) = frontier.remove() else {
            return SearchReport { path: None, explored: explored.len() }; // unreachable after the emptiness check
        };
        explored.insert(node.state.clone()); // expanded people never re-enter the frontier
        let parent = expanded.len(); // index the node will have once expanded
        let neighbors = catalog.neighbors(&node.state);
        expanded.push(node);

        for (movie, co_star) in neighbors {
            if explored.contains(&co_star) || frontier.contains_state(&co_star) {
                continue; // already expanded or already waiting
            }
            let child = Node::child(co_star, parent, movie);
            if &child.state == target { // goal test on generation, one level earlier than on removal
                let path = backtrack(&expanded, child);
                debug!(
                    %source,
                    %target,
                    degrees = path.degrees(),
                    explored = explored.len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "path found"
                );
                return SearchReport { path: Some(path), explored: explored.len() };
            }
            frontier.add(child);
        }
    }
}

fn backtrack(expanded: &[Node<PersonId, MovieId>], goal: Node<PersonId, MovieId>) -> Path {
    let mut steps = Vec::new();
    let mut current = Some(&goal);
    while let Some(node) = current {
        let Some(movie) = &node.action else { break }; // the root carries no action
        steps.push(Step { movie: movie.clone(), person: node.state.clone() });
        current = node.parent.map(|index| &expanded[index]);
    }
    steps.reverse(); // collected goal first
    Path { steps }
}
