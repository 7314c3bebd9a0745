//! Client-side routing between the `Home` and `Login` screens.
//!
//! - `guard`: navigation guards, including the login requirement
//! - `history`: hash-style location history
//! - `queue`: navigation requests raised outside the UI loop (e.g. by the HTTP layer)
//!
//! The router itself holds no authentication state. Every navigation runs the
//! registered guards, which read whatever they need at that moment.

pub mod guard;
pub mod history;
pub mod queue;

use std::fmt;

use tracing::{debug, info, warn};

pub use guard::{Decision, NavigationGuard, RequireLogin};
pub use history::HashHistory;
pub use queue::{navigation_channel, NavigationQueue, Navigator};

/// Redirect chains longer than this abort the navigation
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
}

impl RouteName {
    pub fn route(self) -> &'static Route {
        match self {
            RouteName::Home => &HOME,
            RouteName::Login => &LOGIN,
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteName::Home => f.write_str("Home"),
            RouteName::Login => f.write_str("Login"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub path: &'static str,
    /// Reachable without a session
    pub guest: bool,
}

static HOME: Route = Route {
    name: RouteName::Home,
    path: "/",
    guest: false,
};

static LOGIN: Route = Route {
    name: RouteName::Login,
    path: "/login",
    guest: true,
};

/// The route table
pub static ROUTES: [&Route; 2] = [&HOME, &LOGIN];

pub struct Router {
    history: HashHistory,
    guards: Vec<Box<dyn NavigationGuard>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with no guards and an empty history
    pub fn new() -> Self {
        Self {
            history: HashHistory::new(),
            guards: Vec::new(),
        }
    }

    /// Register a guard run before every navigation, after those already registered
    pub fn before_each<G>(&mut self, guard: G)
    where
        G: NavigationGuard + 'static,
    {
        self.guards.push(Box::new(guard));
    }

    /// The route shown now, `None` before the first navigation
    pub fn current(&self) -> Option<&'static Route> {
        self.history.current()
    }

    pub fn location(&self) -> String {
        self.history.location()
    }

    pub fn history(&self) -> &HashHistory {
        &self.history
    }

    /// Route for a location string such as `#/login`, `/login` or `login`.
    /// Unknown locations fall back to `Home`.
    pub fn resolve(location: &str) -> &'static Route {
        let path = location.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = format!("/{}", path.trim_matches('/'));

        ROUTES
            .iter()
            .copied()
            .find(|route| route.path == path)
            .unwrap_or(&HOME)
    }

    /// Navigate to a location string, see [`Router::resolve`]
    pub fn push_path(&mut self, location: &str) -> Option<RouteName> {
        self.push(Self::resolve(location).name)
    }

    /// Navigate to a named route.
    ///
    /// Guards may redirect; the route actually reached is returned. `None`
    /// means the navigation was aborted and the current route is unchanged.
    pub fn push(&mut self, name: RouteName) -> Option<RouteName> {
        let from = self.current();
        let mut target = name;

        for _ in 0..=MAX_REDIRECTS {
            match self.run_guards(target.route(), from) {
                Decision::Allow => {
                    self.history.push(target.route());
                    info!(requested = %name, resolved = %target, "Navigated");
                    return Some(target);
                }
                Decision::Redirect(next) => {
                    debug!(from = %target, to = %next, "Navigation redirected");
                    target = next;
                }
            }
        }

        warn!(requested = %name, "Too many redirects, navigation aborted");
        None
    }

    /// First redirect wins; later guards do not run
    fn run_guards(&self, to: &Route, from: Option<&Route>) -> Decision {
        for guard in &self.guards {
            if let Decision::Redirect(next) = guard.before_each(to, from) {
                return Decision::Redirect(next);
            }
        }
        Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Guard that always sends navigation to a fixed route
    struct AlwaysRedirect(RouteName);

    impl NavigationGuard for AlwaysRedirect {
        fn before_each(&self, _to: &Route, _from: Option<&Route>) -> Decision {
            Decision::Redirect(self.0)
        }
    }

    #[test]
    fn test_route_table() {
        assert_eq!(RouteName::Home.route().path, "/");
        assert!(!RouteName::Home.route().guest);
        assert_eq!(RouteName::Login.route().path, "/login");
        assert!(RouteName::Login.route().guest);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Router::resolve("#/login").name, RouteName::Login);
        assert_eq!(Router::resolve("/login/").name, RouteName::Login);
        assert_eq!(Router::resolve("login?next=home").name, RouteName::Login);
        assert_eq!(Router::resolve("#/").name, RouteName::Home);
        assert_eq!(Router::resolve("").name, RouteName::Home);
        assert_eq!(Router::resolve("#/nowhere").name, RouteName::Home);
    }

    #[test]
    fn test_push_without_guards() {
        let mut router = Router::new();
        assert_eq!(router.current(), None);

        assert_eq!(router.push(RouteName::Login), Some(RouteName::Login));
        assert_eq!(router.location(), "#/login");

        assert_eq!(router.push_path("#/"), Some(RouteName::Home));
        assert_eq!(router.current().map(|r| r.name), Some(RouteName::Home));
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_first_redirect_wins() {
        let mut router = Router::new();
        router.before_each(|to: &Route, _from: Option<&Route>| {
            if to.name == RouteName::Home {
                Decision::Redirect(RouteName::Login)
            } else {
                Decision::Allow
            }
        });
        router.before_each(AlwaysRedirect(RouteName::Home));

        // Home -> Login by the first guard, then Login -> Home by the second,
        // and so on until the redirect limit
        assert_eq!(router.push(RouteName::Home), None);
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_redirect_loop_keeps_current_route() {
        let mut router = Router::new();
        router.push(RouteName::Login);
        router.before_each(AlwaysRedirect(RouteName::Home));

        // Home redirects to Home forever
        assert_eq!(router.push(RouteName::Home), None);
        assert_eq!(router.current().map(|r| r.name), Some(RouteName::Login));
        assert_eq!(router.history().len(), 1);
    }
}
