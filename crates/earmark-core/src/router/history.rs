use super::Route;

/// Location history rendered as URL fragments (`#/`, `#/login`).
#[derive(Debug, Default)]
pub struct HashHistory {
    entries: Vec<&'static Route>,
}

impl HashHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed navigation. Re-entering the current route is not a new entry.
    pub fn push(&mut self, route: &'static Route) {
        if self.current() != Some(route) {
            self.entries.push(route);
        }
    }

    pub fn current(&self) -> Option<&'static Route> {
        self.entries.last().copied()
    }

    /// Current location as a fragment; `#/` before any navigation
    pub fn location(&self) -> String {
        format!("#{}", self.current().map_or("/", |route| route.path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteName;

    #[test]
    fn test_location() {
        let mut history = HashHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.location(), "#/");

        history.push(RouteName::Login.route());
        assert_eq!(history.location(), "#/login");

        history.push(RouteName::Home.route());
        assert_eq!(history.location(), "#/");
    }

    #[test]
    fn test_same_route_not_duplicated() {
        let mut history = HashHistory::new();
        history.push(RouteName::Login.route());
        history.push(RouteName::Login.route());
        assert_eq!(history.len(), 1);

        history.push(RouteName::Home.route());
        history.push(RouteName::Login.route());
        assert_eq!(history.len(), 3);
    }
}
