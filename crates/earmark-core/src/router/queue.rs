use tokio::sync::mpsc;
use tracing::debug;

use crate::api::UnauthorizedHandler;

use super::RouteName;

/// Create a connected navigator/queue pair.
///
/// The navigator can be cloned into background tasks and the HTTP client;
/// the queue is drained by whoever owns the [`super::Router`].
pub fn navigation_channel() -> (Navigator, NavigationQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Navigator { tx }, NavigationQueue { rx })
}

/// Requests navigations without touching the router. Never blocks.
#[derive(Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<RouteName>,
}

impl Navigator {
    pub fn navigate(&self, name: RouteName) {
        if self.tx.send(name).is_err() {
            debug!(route = %name, "Navigation queue closed, request dropped");
        }
    }
}

/// A 401 anywhere means "show the login screen"
impl UnauthorizedHandler for Navigator {
    fn on_unauthorized(&self) {
        self.navigate(RouteName::Login);
    }
}

pub struct NavigationQueue {
    rx: mpsc::UnboundedReceiver<RouteName>,
}

impl NavigationQueue {
    /// Next pending request, without waiting
    pub fn try_next(&mut self) -> Option<RouteName> {
        self.rx.try_recv().ok()
    }
}
