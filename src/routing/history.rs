use tracing::info;

use crate::routing::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub location: Location,
    pub mode: HistoryMode,
}

impl NavigationRequest {
    pub fn push(location: Location) -> Self {
        Self {
            location,
            mode: HistoryMode::Push,
        }
    }

    pub fn replace(location: Location) -> Self {
        Self {
            location,
            mode: HistoryMode::Replace,
        }
    }
}

/// The routing side of the storefront: where we are, how to move, and which
/// moves happened since the last look.
pub trait Navigator {
    fn location(&self) -> &Location;

    fn navigate(&mut self, request: NavigationRequest);

    fn back(&mut self) -> bool;

    fn forward(&mut self) -> bool;

    /// Locations entered since the previous call, oldest first.
    fn drain_changes(&mut self) -> Vec<Location>;
}

/// Browser-like session history kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    changes: Vec<Location>,
    requests: Vec<NavigationRequest>,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            changes: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    /// Every navigation request received, including ones that did not move.
    pub fn requests(&self) -> &[NavigationRequest] {
        &self.requests
    }

    fn enter(&mut self, index: usize) {
        self.index = index;
        self.changes.push(self.entries[index].clone());
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    fn navigate(&mut self, request: NavigationRequest) {
        info!(target_url = %request.location, mode = ?request.mode, "navigate");
        self.requests.push(request.clone());
        match request.mode {
            HistoryMode::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(request.location);
                self.enter(self.entries.len() - 1);
            }
            HistoryMode::Replace => {
                self.entries[self.index] = request.location;
                self.enter(self.index);
            }
        }
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.enter(self.index - 1);
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.enter(self.index + 1);
        true
    }

    fn drain_changes(&mut self) -> Vec<Location> {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryHistory, NavigationRequest, Navigator};
    use crate::routing::location::Location;

    fn loc(url: &str) -> Location {
        Location::parse(url).expect("location")
    }

    #[test]
    fn push_adds_entries_and_reports_changes() {
        let mut history = MemoryHistory::new(loc("/"));
        history.navigate(NavigationRequest::push(loc("/products?q=phone")));

        assert_eq!(history.location(), &loc("/products?q=phone"));
        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.drain_changes(), vec![loc("/products?q=phone")]);
        assert!(history.drain_changes().is_empty());
    }

    #[test]
    fn replace_overwrites_the_current_entry() {
        let mut history = MemoryHistory::new(loc("/products?q=shoes&sort=price"));
        history.navigate(NavigationRequest::replace(loc("/products?sort=price")));

        assert_eq!(history.entries(), &[loc("/products?sort=price")]);
        assert!(!history.back());
    }

    #[test]
    fn back_and_forward_walk_the_stack() {
        let mut history = MemoryHistory::new(loc("/"));
        history.navigate(NavigationRequest::push(loc("/about")));
        history.navigate(NavigationRequest::push(loc("/products")));
        history.drain_changes();

        assert!(history.back());
        assert_eq!(history.location(), &loc("/about"));
        assert!(history.forward());
        assert!(!history.forward());
        assert_eq!(history.drain_changes(), vec![loc("/about"), loc("/products")]);
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut history = MemoryHistory::new(loc("/"));
        history.navigate(NavigationRequest::push(loc("/about")));
        history.back();
        history.navigate(NavigationRequest::push(loc("/cart")));

        assert_eq!(history.entries(), &[loc("/"), loc("/cart")]);
        assert!(!history.forward());
    }
}
