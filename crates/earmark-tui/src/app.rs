//! Application state management for earmark.
//!
//! This module contains the core `App` struct that owns the token store, the
//! API client and the router, and coordinates background fetches. It is also
//! the only place that acts on navigation requests raised by the HTTP layer.

use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use earmark_core::api::{ApiClient, ApiError, HttpClient};
use earmark_core::auth::{FileStore, KeyValueStore, MemoryStore, TokenStore};
use earmark_core::config::Config;
use earmark_core::models::{AudioFile, Collection, Transcript};
use earmark_core::router::{navigation_channel, NavigationQueue, RequireLogin, RouteName, Router};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the search query.
const MAX_SEARCH_LENGTH: usize = 100;

/// Number of lines to scroll the transcript on page up/down.
pub const PAGE_SCROLL_SIZE: u16 = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Overlay / input mode on top of the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Focused pane on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Collections,
    Audios,
    Transcript,
}

impl Pane {
    pub fn next(&self) -> Self {
        match self {
            Pane::Collections => Pane::Audios,
            Pane::Audios => Pane::Transcript,
            Pane::Transcript => Pane::Collections,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Pane::Collections => Pane::Transcript,
            Pane::Audios => Pane::Collections,
            Pane::Transcript => Pane::Audios,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from background fetch tasks.
enum FetchResult {
    Collections(Vec<Collection>),
    /// Audio files of a collection (collection id, files)
    Audios(String, Vec<AudioFile>),
    /// Transcript text (title, transcript)
    Transcript(String, Transcript),
    /// Transcript titles matching a query (query, titles)
    Search(String, Vec<String>),
    Error(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    pub api: ApiClient,
    pub router: Router,
    navigation: NavigationQueue,

    // UI State
    pub state: AppState,
    pub pane: Pane,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Home screen data
    pub collections: Vec<Collection>,
    pub collection_selection: usize,
    /// Collection the audio list belongs to
    pub audio_collection: Option<String>,
    pub audios: Vec<AudioFile>,
    pub audio_selection: usize,
    /// Title and text of the transcript being shown
    pub transcript: Option<(String, Transcript)>,
    pub transcript_scroll: u16,
    /// Scroll limit in wrapped rows, recorded by the last render
    transcript_max_scroll: Cell<Option<u16>>,

    // Latest request per fetch kind; older results are dropped
    pending_audios: Option<String>,
    pending_transcript: Option<String>,
    pending_search: Option<String>,

    // Search
    pub search_query: String,
    /// Query the results belong to; `None` when no search is shown
    pub search_results_for: Option<String>,
    pub search_results: Vec<String>,
    pub search_selection: usize,

    // Background task channel
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance with storage at the default location
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let storage: Box<dyn KeyValueStore> = match FileStore::default_location() {
            Ok(store) => {
                debug!(path = ?store.path(), "Using file storage");
                Box::new(store)
            }
            Err(e) => {
                warn!(error = %e, "No data directory, token will not survive restarts");
                Box::new(MemoryStore::new())
            }
        };

        Self::with_storage(config, storage)
    }

    /// Wire the token store, HTTP client and router around the given storage
    pub fn with_storage(config: Config, storage: Box<dyn KeyValueStore>) -> Result<Self> {
        let tokens = Arc::new(TokenStore::load(storage));

        let (navigator, navigation) = navigation_channel();
        let http = HttpClient::new(Arc::clone(&tokens), Arc::new(navigator))?;
        let base_url = config.base_url();
        let api = ApiClient::new(http, &base_url)?;
        debug!(%base_url, "API client configured");

        let mut router = Router::new();
        router.before_each(RequireLogin::new(Arc::clone(&tokens)));

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Get credentials from env vars or config
        let login_username = std::env::var("EARMARK_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();

        let login_password = std::env::var("EARMARK_PASSWORD").unwrap_or_default();

        Ok(Self {
            config,
            tokens,
            api,
            router,
            navigation,

            state: AppState::Normal,
            pane: Pane::Collections,

            login_username,
            login_password,
            login_focus: LoginFocus::Username,
            login_error: None,

            collections: Vec::new(),
            collection_selection: 0,
            audio_collection: None,
            audios: Vec::new(),
            audio_selection: 0,
            transcript: None,
            transcript_scroll: 0,
            transcript_max_scroll: Cell::new(None),

            pending_audios: None,
            pending_transcript: None,
            pending_search: None,

            search_query: String::new(),
            search_results_for: None,
            search_results: Vec::new(),
            search_selection: 0,

            fetch_rx: rx,
            fetch_tx: tx,

            status_message: None,
        })
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Route currently shown. Before the first navigation nothing is
    /// authorized yet, so that is treated as the login screen.
    pub fn current_route(&self) -> RouteName {
        self.router
            .current()
            .map_or(RouteName::Login, |route| route.name)
    }

    /// Navigate through the router and prepare the screen that was reached
    pub fn navigate(&mut self, name: RouteName) -> Option<RouteName> {
        let previous = self.router.current().map(|route| route.name);
        let reached = self.router.push(name)?;

        if previous != Some(reached) {
            match reached {
                RouteName::Login => self.start_login(),
                RouteName::Home => {
                    if self.collections.is_empty() {
                        self.refresh_collections();
                    }
                }
            }
        }
        Some(reached)
    }

    /// Act on navigation requests queued by the HTTP layer and background tasks
    pub fn process_navigation(&mut self) {
        while let Some(name) = self.navigation.try_next() {
            if name == RouteName::Login && self.current_route() == RouteName::Home {
                info!("Server rejected the session");
                self.state = AppState::Normal;
                // Refetched for the next session
                self.clear_home_data();
                self.navigate(name);
                self.login_error = Some("Session expired - please log in again".to_string());
            } else {
                self.navigate(name);
            }
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    /// Reset the login form for display
    fn start_login(&mut self) {
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let username = self.login_username.clone();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return Err(anyhow::anyhow!("Username and password required"));
        }

        self.login_error = None;

        match self.api.login(&username, &password).await {
            Ok(token) => {
                self.tokens.login(&token);

                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.login_password.clear();
                info!("Login successful");

                // A rejected login queued a redirect to Login; it is stale now
                while self.navigation.try_next().is_some() {}
                self.navigate(RouteName::Home);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(login_error_message(&e));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Background Fetches
    // =========================================================================

    /// Spawn a fetch whose result is picked up by `check_background_tasks`
    fn spawn_fetch<F>(&mut self, status: &str, fetch: F)
    where
        F: Future<Output = Result<FetchResult, ApiError>> + Send + 'static,
    {
        self.status_message = Some(status.to_string());
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(e) => {
                    if e.is_unauthorized() {
                        // The navigator already queued the login screen
                        info!("Background fetch rejected, session expired");
                    } else {
                        error!(error = %e, "Background fetch failed");
                    }
                    FetchResult::Error(fetch_error_message(&e))
                }
            };
            if let Err(e) = tx.send(result).await {
                error!(error = %e, "Failed to send fetch result - channel closed");
            }
        });
    }

    pub fn refresh_collections(&mut self) {
        let api = self.api.clone();
        self.spawn_fetch("Loading collections...", async move {
            api.collections().await.map(FetchResult::Collections)
        });
    }

    pub fn load_audios(&mut self, collection_id: String) {
        self.pending_audios = Some(collection_id.clone());
        let api = self.api.clone();
        self.spawn_fetch("Loading audio files...", async move {
            let files = api.audios(&collection_id).await?;
            Ok(FetchResult::Audios(collection_id, files))
        });
    }

    pub fn load_transcript(&mut self, title: String) {
        self.pending_transcript = Some(title.clone());
        let api = self.api.clone();
        self.spawn_fetch("Loading transcript...", async move {
            let transcript = api.transcript(&title).await?;
            Ok(FetchResult::Transcript(title, transcript))
        });
    }

    pub fn run_search(&mut self) {
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            self.clear_search();
            return;
        }

        self.pending_search = Some(query.clone());
        let api = self.api.clone();
        self.spawn_fetch("Searching transcripts...", async move {
            let titles = api.search(&query).await?;
            Ok(FetchResult::Search(query, titles))
        });
    }

    pub fn clear_search(&mut self) {
        self.pending_search = None;
        self.search_query.clear();
        self.search_results_for = None;
        self.search_results.clear();
        self.search_selection = 0;
    }

    /// Drop everything fetched under the current session
    fn clear_home_data(&mut self) {
        self.collections.clear();
        self.collection_selection = 0;
        self.audio_collection = None;
        self.audios.clear();
        self.audio_selection = 0;
        self.transcript = None;
        self.transcript_scroll = 0;
        self.transcript_max_scroll.set(None);
        self.pending_audios = None;
        self.pending_transcript = None;
        self.clear_search();
        self.pane = Pane::Collections;
    }

    /// Apply finished background fetches, then any navigation they caused
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.fetch_rx.try_recv() {
            self.apply_result(result);
        }
        self.process_navigation();
    }

    fn apply_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Collections(collections) => {
                debug!(count = collections.len(), "Collections loaded");
                self.status_message = Some(format!("{} collections", collections.len()));
                self.collections = collections;
                self.collection_selection = self
                    .collection_selection
                    .min(self.collections.len().saturating_sub(1));
            }
            FetchResult::Audios(collection_id, audios) => {
                if self.pending_audios.as_deref() != Some(collection_id.as_str()) {
                    debug!(collection = %collection_id, "Dropping superseded audio list");
                    return;
                }
                self.pending_audios = None;
                debug!(collection = %collection_id, count = audios.len(), "Audio files loaded");
                self.status_message = Some(format!("{} audio files", audios.len()));
                self.audio_collection = Some(collection_id);
                self.audios = audios;
                self.audio_selection = 0;
                self.pane = Pane::Audios;
            }
            FetchResult::Transcript(title, transcript) => {
                if self.pending_transcript.as_deref() != Some(title.as_str()) {
                    debug!(%title, "Dropping superseded transcript");
                    return;
                }
                self.pending_transcript = None;
                self.status_message = Some(format!("Transcript: {}", title));
                self.transcript = Some((title, transcript));
                self.transcript_scroll = 0;
                self.transcript_max_scroll.set(None);
                self.pane = Pane::Transcript;
            }
            FetchResult::Search(query, titles) => {
                if self.pending_search.as_deref() != Some(query.as_str()) {
                    debug!(%query, "Dropping superseded search results");
                    return;
                }
                self.pending_search = None;
                self.status_message = Some(format!("{} matches for \"{}\"", titles.len(), query));
                self.search_results_for = Some(query);
                self.search_results = titles;
                self.search_selection = 0;
                self.pane = Pane::Audios;
            }
            FetchResult::Error(message) => {
                self.status_message = Some(message);
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected_collection(&self) -> Option<&Collection> {
        self.collections.get(self.collection_selection)
    }

    pub fn selected_audio(&self) -> Option<&AudioFile> {
        self.audios.get(self.audio_selection)
    }

    /// The middle pane lists search results while a search is shown
    pub fn showing_search_results(&self) -> bool {
        self.search_results_for.is_some()
    }

    pub fn select_next(&mut self) {
        match self.pane {
            Pane::Collections => {
                if self.collection_selection + 1 < self.collections.len() {
                    self.collection_selection += 1;
                }
            }
            Pane::Audios if self.showing_search_results() => {
                if self.search_selection + 1 < self.search_results.len() {
                    self.search_selection += 1;
                }
            }
            Pane::Audios => {
                if self.audio_selection + 1 < self.audios.len() {
                    self.audio_selection += 1;
                }
            }
            Pane::Transcript => self.scroll_transcript(1),
        }
    }

    pub fn select_prev(&mut self) {
        match self.pane {
            Pane::Collections => {
                self.collection_selection = self.collection_selection.saturating_sub(1);
            }
            Pane::Audios if self.showing_search_results() => {
                self.search_selection = self.search_selection.saturating_sub(1);
            }
            Pane::Audios => {
                self.audio_selection = self.audio_selection.saturating_sub(1);
            }
            Pane::Transcript => self.scroll_transcript(-1),
        }
    }

    /// Record how far the transcript can scroll at the rendered pane size
    pub fn set_transcript_max_scroll(&self, max: u16) {
        self.transcript_max_scroll.set(Some(max));
    }

    pub fn scroll_transcript(&mut self, delta: i32) {
        // Unwrapped line count until the pane has been rendered
        let max = match self.transcript_max_scroll.get() {
            Some(max) => max,
            None => {
                let lines = self
                    .transcript
                    .as_ref()
                    .map_or(0, |(_, t)| t.text.lines().count().saturating_sub(1));
                u16::try_from(lines).unwrap_or(u16::MAX)
            }
        };
        let next = i32::from(self.transcript_scroll) + delta;
        self.transcript_scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX).min(max);
    }

    /// Enter on the focused pane
    pub fn drill_down(&mut self) {
        match self.pane {
            Pane::Collections => {
                if let Some(collection) = self.selected_collection() {
                    let id = collection.id.clone();
                    self.clear_search();
                    self.load_audios(id);
                }
            }
            Pane::Audios if self.showing_search_results() => {
                if let Some(title) = self.search_results.get(self.search_selection) {
                    let title = title.clone();
                    self.load_transcript(title);
                }
            }
            Pane::Audios => {
                if let Some(file) = self.selected_audio() {
                    let title = file.transcript_title().to_string();
                    self.load_transcript(title);
                }
            }
            Pane::Transcript => {}
        }
    }

    /// Playback URL of the selected audio file, for the detail pane
    pub fn selected_media_url(&self) -> Option<String> {
        self.selected_audio()
            .and_then(|file| self.api.media_url(file).ok())
    }
}

// ============================================================================
// Messages
// ============================================================================

/// User-facing text for a failed login
pub fn login_error_message(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized => "Invalid username or password".to_string(),
        ApiError::NetworkError(err) if err.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        ApiError::NetworkError(_) => {
            "Unable to connect to server. Check the server address.".to_string()
        }
        other => format!("Login failed: {}", other),
    }
}

/// User-facing text for a failed background fetch
pub fn fetch_error_message(e: &ApiError) -> String {
    match e {
        ApiError::Unauthorized => "Session expired - please log in again".to_string(),
        ApiError::NotFound(_) => "Not found on server".to_string(),
        other => format!("Error: {}", other),
    }
}

// ============================================================================
// Input Validation
// ============================================================================

/// Check if a character is valid for text input (printable, not control)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Check if a search character should be accepted
pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let config = Config {
            base_url: Some("http://127.0.0.1:9".to_string()),
            last_username: Some("alice".to_string()),
        };
        App::with_storage(config, Box::new(MemoryStore::new())).unwrap()
    }

    fn collection(id: &str) -> Collection {
        Collection {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Routing Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_startup_without_token_shows_login() {
        let mut app = test_app();
        assert_eq!(app.current_route(), RouteName::Login);

        assert_eq!(app.navigate(RouteName::Home), Some(RouteName::Login));
        assert_eq!(app.current_route(), RouteName::Login);
        // Username remembered, so the password field gets focus
        assert_eq!(app.login_focus, LoginFocus::Password);
    }

    #[tokio::test]
    async fn test_startup_with_token_shows_home() {
        let storage = MemoryStore::new();
        storage.set("accessToken", "persisted").unwrap();
        let mut app = App::with_storage(Config::default(), Box::new(storage)).unwrap();

        assert_eq!(app.navigate(RouteName::Home), Some(RouteName::Home));
        assert_eq!(app.status_message.as_deref(), Some("Loading collections..."));
    }

    #[tokio::test]
    async fn test_rejected_request_leaves_home() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/collections")
            .with_status(401)
            .create_async()
            .await;

        let config = Config {
            base_url: Some(server.url()),
            last_username: None,
        };
        let mut app = App::with_storage(config, Box::new(MemoryStore::new())).unwrap();
        app.tokens.login("expired");
        app.collections = vec![collection("lectures")];
        assert_eq!(app.navigate(RouteName::Home), Some(RouteName::Home));
        app.state = AppState::Searching;

        assert!(app.api.collections().await.is_err());
        app.process_navigation();

        assert_eq!(app.current_route(), RouteName::Login);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(
            app.login_error.as_deref(),
            Some("Session expired - please log in again")
        );

        // Nothing from the expired session stays on screen
        assert!(app.collections.is_empty());
        assert!(app.audios.is_empty());
        assert!(app.transcript.is_none());

        // Logging in again fetches the collections anew
        app.tokens.login("fresh");
        assert_eq!(app.navigate(RouteName::Home), Some(RouteName::Home));
        assert_eq!(app.status_message.as_deref(), Some("Loading collections..."));
    }

    #[test]
    fn test_escape_from_login_stays_without_token() {
        let mut app = test_app();
        app.navigate(RouteName::Login);
        app.login_error = Some("Invalid username or password".to_string());

        assert_eq!(app.navigate(RouteName::Home), Some(RouteName::Login));
        // Same route, form untouched
        assert!(app.login_error.is_some());
    }

    // -------------------------------------------------------------------------
    // Fetch Result Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_collections_clamps_selection() {
        let mut app = test_app();
        app.collection_selection = 5;
        app.apply_result(FetchResult::Collections(vec![collection("a"), collection("b")]));
        assert_eq!(app.collection_selection, 1);
        assert_eq!(app.selected_collection().map(|c| c.id.as_str()), Some("b"));
    }

    #[test]
    fn test_apply_search_shows_results_in_middle_pane() {
        let mut app = test_app();
        app.pending_search = Some("lifetimes".to_string());
        app.apply_result(FetchResult::Search(
            "lifetimes".to_string(),
            vec!["episode-12".to_string(), "episode-40".to_string()],
        ));
        assert!(app.showing_search_results());
        assert_eq!(app.pane, Pane::Audios);

        app.select_next();
        app.select_next();
        assert_eq!(app.search_selection, 1);

        app.clear_search();
        assert!(!app.showing_search_results());
    }

    fn audio(title: &str) -> AudioFile {
        AudioFile {
            id: title.to_string(),
            title: title.to_string(),
            url: format!("/audios/{}", title),
        }
    }

    #[tokio::test]
    async fn test_out_of_order_audio_lists_keep_latest() {
        let mut app = test_app();
        app.load_audios("a".to_string());
        app.load_audios("b".to_string());

        app.apply_result(FetchResult::Audios("b".to_string(), vec![audio("b1.mp3")]));
        app.apply_result(FetchResult::Audios("a".to_string(), vec![audio("a1.mp3")]));

        assert_eq!(app.audio_collection.as_deref(), Some("b"));
        assert_eq!(app.audios, vec![audio("b1.mp3")]);
    }

    #[tokio::test]
    async fn test_superseded_transcript_is_dropped() {
        let mut app = test_app();
        app.load_transcript("first".to_string());
        app.load_transcript("second".to_string());

        app.apply_result(FetchResult::Transcript(
            "first".to_string(),
            Transcript {
                text: "old".to_string(),
            },
        ));
        assert!(app.transcript.is_none());

        app.apply_result(FetchResult::Transcript(
            "second".to_string(),
            Transcript {
                text: "new".to_string(),
            },
        ));
        assert_eq!(app.transcript.as_ref().map(|(title, _)| title.as_str()), Some("second"));
    }

    #[test]
    fn test_search_results_after_clear_are_dropped() {
        let mut app = test_app();
        app.pending_search = Some("rust".to_string());
        app.clear_search();

        app.apply_result(FetchResult::Search("rust".to_string(), vec!["episode-1".to_string()]));
        assert!(!app.showing_search_results());
    }

    #[test]
    fn test_rendered_scroll_limit_replaces_line_count() {
        let mut app = test_app();
        app.transcript = Some((
            "episode-12".to_string(),
            Transcript {
                text: "one\ntwo".to_string(),
            },
        ));

        // Wrapping made the two lines take more rows than fit
        app.set_transcript_max_scroll(7);
        app.scroll_transcript(100);
        assert_eq!(app.transcript_scroll, 7);
    }

    #[test]
    fn test_transcript_scroll_bounds() {
        let mut app = test_app();
        app.pending_transcript = Some("episode-12".to_string());
        app.apply_result(FetchResult::Transcript(
            "episode-12".to_string(),
            Transcript {
                text: "one\ntwo\nthree".to_string(),
            },
        ));
        assert_eq!(app.pane, Pane::Transcript);

        app.scroll_transcript(-3);
        assert_eq!(app.transcript_scroll, 0);
        app.scroll_transcript(PAGE_SCROLL_SIZE as i32);
        assert_eq!(app.transcript_scroll, 2);
    }

    // -------------------------------------------------------------------------
    // Pane Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_pane_cycle() {
        assert_eq!(Pane::Collections.next(), Pane::Audios);
        assert_eq!(Pane::Audios.next(), Pane::Transcript);
        assert_eq!(Pane::Transcript.next(), Pane::Collections);
        assert_eq!(Pane::Collections.prev(), Pane::Transcript);
    }

    // -------------------------------------------------------------------------
    // Message Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_error_message() {
        assert_eq!(
            login_error_message(&ApiError::Unauthorized),
            "Invalid username or password"
        );
        assert!(login_error_message(&ApiError::ServerError("boom".into())).starts_with("Login failed"));
    }

    #[test]
    fn test_fetch_error_message() {
        assert_eq!(
            fetch_error_message(&ApiError::Unauthorized),
            "Session expired - please log in again"
        );
        assert_eq!(
            fetch_error_message(&ApiError::NotFound("File not found".into())),
            "Not found on server"
        );
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\x00'));
        assert!(!can_add_username_char(0, '\n'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_search_char() {
        assert!(can_add_search_char(0, ' '));
        assert!(!can_add_search_char(100, 'a'));
        assert!(!can_add_search_char(0, '\t'));
    }
}
