use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use thiserror::Error;

/// One discovered search state. `parent` indexes the arena of expanded nodes
/// kept by the search driver; the root has neither parent nor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<S, A> {
    pub state: S,
    pub parent: Option<usize>,
    pub action: Option<A>,
}

impl<S, A> Node<S, A> {
    pub fn root(state: S) -> Self {
        Self { state, parent: None, action: None }
    }

    pub fn child(state: S, parent: usize, action: A) -> Self {
        Self { state, parent: Some(parent), action: Some(action) }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontierError {
    #[error("cannot remove from an empty frontier")]
    Empty,
}

/// Container of nodes waiting to be expanded. The removal order is the only
/// thing that separates depth-first from breadth-first traversal.
pub trait Frontier<S, A> {
    fn add(&mut self, node: Node<S, A>);
    fn contains_state(&self, state: &S) -> bool;
    fn len(&self) -> usize;
    fn remove(&mut self) -> Result<Node<S, A>, FrontierError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// occupancy count per state, so duplicates added by a caller are still tracked
#[derive(Debug)]
struct StateCounts<S>(HashMap<S, usize>);

impl<S: Eq + Hash + Clone> StateCounts<S> {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn insert(&mut self, state: &S) {
        *self.0.entry(state.clone()).or_default() += 1;
    }

    fn release(&mut self, state: &S) {
        if let Some(count) = self.0.get_mut(state) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(state); // no copies left in the container
            }
        }
    }

    fn contains(&self, state: &S) -> bool {
        self.0.contains_key(state)
    }
}

/// LIFO frontier.
#[derive(Debug)]
pub struct StackFrontier<S, A> {
    nodes: Vec<Node<S, A>>,
    states: StateCounts<S>,
}

impl<S: Eq + Hash + Clone, A> StackFrontier<S, A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), states: StateCounts::new() }
    }
}

impl<S: Eq + Hash + Clone, A> Default for StackFrontier<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone, A> Frontier<S, A> for StackFrontier<S, A> {
    fn add(&mut self, node: Node<S, A>) {
        self.states.insert(&node.state);
        self.nodes.push(node);
    }

    fn contains_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Node<S, A>, FrontierError> {
        let node = self.nodes.pop().ok_or(FrontierError::Empty)?; // most recently added
        self.states.release(&node.state);
        Ok(node)
    }
}

/// FIFO frontier, the one breadth-first search needs.
#[derive(Debug)]
pub struct QueueFrontier<S, A> {
    nodes: VecDeque<Node<S, A>>,
    states: StateCounts<S>,
}

impl<S: Eq + Hash + Clone, A> QueueFrontier<S, A> {
    pub fn new() -> Self {
        Self { nodes: VecDeque::new(), states: StateCounts::new() }
    }
}

impl<S: Eq + Hash + Clone, A> Default for QueueFrontier<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash + Clone, A> Frontier<S, A> for QueueFrontier<S, A> {
    fn add(&mut self, node: Node<S, A>) {
        self.states.insert(&node.state);
        self.nodes.push_back(node);
    }

    fn contains_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Node<S, A>, FrontierError> {
        let node = self.nodes.pop_front().ok_or(FrontierError::Empty)?; // earliest added
        self.states.release(&node.state);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled<F: Frontier<&'static str, ()>>(mut frontier: F) -> F {
        for state in ["A", "B", "C"] {
            frontier.add(Node::root(state));
        }
        frontier
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = filled(QueueFrontier::new());
        assert_eq!(queue.remove().unwrap().state, "A");
        assert_eq!(queue.remove().unwrap().state, "B");
        assert_eq!(queue.remove().unwrap().state, "C");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut stack = filled(StackFrontier::new());
        assert_eq!(stack.remove().unwrap().state, "C");
        assert_eq!(stack.remove().unwrap().state, "B");
        assert_eq!(stack.remove().unwrap().state, "A");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_from_empty_fails() {
        let mut queue: QueueFrontier<u32, ()> = QueueFrontier::new();
        let mut stack: StackFrontier<u32, ()> = StackFrontier::new();
        assert_eq!(queue.remove(), Err(FrontierError::Empty));
        assert_eq!(stack.remove(), Err(FrontierError::Empty));
    }

    #[test]
    fn test_contains_state_tracks_removals() {
        let mut queue = filled(QueueFrontier::new());
        assert!(queue.contains_state(&"A"));
        queue.remove().unwrap();
        assert!(!queue.contains_state(&"A"));
        assert!(queue.contains_state(&"C"));
        assert!(!queue.contains_state(&"Z"));
    }

    #[test]
    fn test_duplicate_states_are_not_rejected() {
        // uniqueness is the caller's job; the frontier only reports membership
        let mut stack = StackFrontier::new();
        stack.add(Node::<_, ()>::root(7));
        stack.add(Node::root(7));
        assert_eq!(stack.len(), 2);
        stack.remove().unwrap();
        assert!(stack.contains_state(&7));
        stack.remove().unwrap();
        assert!(!stack.contains_state(&7));
    }

    #[test]
    fn test_child_node_links_parent() {
        let node = Node::child("B", 0, "M1");
        assert_eq!(node.parent, Some(0));
        assert_eq!(node.action, Some("M1"));
        let root: Node<&str, &str> = Node::root("A");
        assert_eq!(root.parent, None);
        assert_eq!(root.action, None);
    }
}
