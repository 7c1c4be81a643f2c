use std::collections::{HashSet, VecDeque};

/// Breadth-first frontier with its visited set
///
/// URLs are appended at the tail and taken from the head. The queue itself is
/// not deduplicated: a URL discovered twice before it is dequeued sits in the
/// queue twice, and the second copy is dropped by [`Frontier::next_unvisited`].
/// The visited set only ever grows.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the crawl root
    pub fn seeded(root: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(root);
        frontier
    }

    /// Appends a URL at the tail of the queue
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Appends a URL unless it has already been visited
    ///
    /// Returns true if the URL was queued.
    pub fn push_unvisited(&mut self, url: String) -> bool {
        if self.is_visited(&url) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Takes URLs from the head until one that has not been visited turns up,
    /// marks it visited, and returns it
    ///
    /// Returns `None` once the queue is exhausted.
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
            tracing::trace!("Already visited: {}", url);
        }
        None
    }

    /// Returns true if the URL has been dequeued before
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of queued entries, duplicates included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of distinct URLs dequeued so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded() {
        let frontier = Frontier::seeded("https://example.test");
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::seeded("a");
        frontier.push("b");
        frontier.push("c");

        assert_eq!(frontier.next_unvisited().as_deref(), Some("a"));
        assert_eq!(frontier.next_unvisited().as_deref(), Some("b"));
        assert_eq!(frontier.next_unvisited().as_deref(), Some("c"));
        assert_eq!(frontier.next_unvisited(), None);
    }

    #[test]
    fn test_duplicates_rejected_at_dequeue() {
        let mut frontier = Frontier::seeded("a");
        frontier.push("b");
        frontier.push("a");
        frontier.push("b");
        assert_eq!(frontier.len(), 4);

        assert_eq!(frontier.next_unvisited().as_deref(), Some("a"));
        assert_eq!(frontier.next_unvisited().as_deref(), Some("b"));
        assert_eq!(frontier.next_unvisited(), None);
        assert_eq!(frontier.visited_count(), 2);
    }

    #[test]
    fn test_push_unvisited() {
        let mut frontier = Frontier::seeded("a");
        frontier.next_unvisited();

        assert!(!frontier.push_unvisited("a".to_string()));
        assert!(frontier.push_unvisited("b".to_string()));
        assert!(frontier.is_visited("a"));
        assert!(!frontier.is_visited("b"));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_empty() {
        let mut frontier = Frontier::default();
        assert!(frontier.is_empty());
        assert_eq!(frontier.next_unvisited(), None);
    }
}
