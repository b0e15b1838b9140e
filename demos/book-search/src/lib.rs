//! # Book Search Example
//!
//! A book search screen whose loading, results and error views are driven
//! by an [`AsyncTracker`].
//!
//! This example showcases:
//! - Running a search through the tracker and rendering every state write
//! - Resetting back to the initial snapshot
//! - Unmounting while a search is in flight without any late update
//!
//! ## Example
//!
//! ```no_run
//! use book_search::{Catalog, SearchScreen};
//! use async_lifecycle_runtime::TrackerConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::sample(Duration::from_millis(50));
//! let screen = SearchScreen::mount(TrackerConfig::new("discover"))?;
//!
//! let handle = screen.search(&catalog, "dune");
//! assert_eq!(screen.render(), "Loading...");
//!
//! handle.await?;
//! println!("{}", screen.render());
//! # Ok(())
//! # }
//! ```

use async_lifecycle_core::{AsyncState, AsyncStateOverrides, AsyncStatus, TrackerError};
use async_lifecycle_runtime::{AsyncTracker, RunHandle, ScopeGuard, TrackerConfig};
use serde::Serialize;
use std::fmt::Write as _;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Catalog id
    pub id: u32,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
}

impl Book {
    fn new(id: u32, title: &str, author: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
        }
    }
}

/// Catalog failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The catalog could not be reached
    #[error("the catalog is offline")]
    Offline,
}

/// State rendered by the search screen
pub type SearchState = AsyncState<Vec<Book>, ClientError>;

/// In-memory catalog answering after a fixed latency
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    latency: Duration,
    online: bool,
}

impl Catalog {
    /// A small catalog of well-known books
    #[must_use]
    pub fn sample(latency: Duration) -> Self {
        Self {
            books: vec![
                Book::new(1, "Dune", "Frank Herbert"),
                Book::new(2, "The Left Hand of Darkness", "Ursula K. Le Guin"),
                Book::new(3, "Hyperion", "Dan Simmons"),
                Book::new(4, "Dune Messiah", "Frank Herbert"),
            ],
            latency,
            online: true,
        }
    }

    /// Make every search fail with [`ClientError::Offline`]
    #[must_use]
    pub const fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    /// Search titles and authors, case-insensitively
    pub fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Book>, ClientError>> + Send + use<> {
        let query = query.to_lowercase();
        let books = self.books.clone();
        let latency = self.latency;
        let online = self.online;

        async move {
            tokio::time::sleep(latency).await;
            if !online {
                return Err(ClientError::Offline);
            }
            Ok(books
                .into_iter()
                .filter(|book| {
                    book.title.to_lowercase().contains(&query)
                        || book.author.to_lowercase().contains(&query)
                })
                .collect())
        }
    }
}

/// Render a search state as text
#[must_use]
pub fn render(state: &SearchState) -> String {
    match state.status {
        AsyncStatus::Idle => "Welcome to the discover page.".to_string(),
        AsyncStatus::Pending => "Loading...".to_string(),
        AsyncStatus::Rejected => match &state.error {
            Some(error) => format!("There was an error: {error}"),
            None => "There was an error.".to_string(),
        },
        AsyncStatus::Resolved => match state.data.as_deref() {
            None | Some([]) => "Hmmm... I couldn't find any books. Try another search.".to_string(),
            Some(books) => books.iter().fold(String::new(), |mut out, book| {
                let _ = writeln!(out, "{} by {}", book.title, book.author);
                out
            }),
        },
    }
}

/// The discover screen: owns a tracker and the scope it is attached to
#[derive(Debug)]
pub struct SearchScreen {
    tracker: AsyncTracker<Vec<Book>, ClientError>,
    scope: Option<ScopeGuard>,
}

impl SearchScreen {
    /// Create and attach the screen
    ///
    /// # Errors
    ///
    /// Propagates the attach error. A freshly created tracker always attaches.
    pub fn mount(config: TrackerConfig) -> Result<Self, TrackerError> {
        Self::mount_with(AsyncStateOverrides::new(), config)
    }

    /// Create and attach the screen with a non-default initial state
    ///
    /// # Errors
    ///
    /// Propagates the attach error. A freshly created tracker always attaches.
    pub fn mount_with(
        initial: AsyncStateOverrides<Vec<Book>, ClientError>,
        config: TrackerConfig,
    ) -> Result<Self, TrackerError> {
        let tracker = AsyncTracker::with_config(initial, config);
        let scope = tracker.attach()?;
        Ok(Self {
            tracker,
            scope: Some(scope),
        })
    }

    /// Start a search
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn search(&self, catalog: &Catalog, query: &str) -> RunHandle<Vec<Book>, ClientError> {
        tracing::info!(query, "Searching catalog");
        self.tracker.run(catalog.search(query))
    }

    /// Back to the initial view
    pub fn clear(&self) {
        self.tracker.reset();
    }

    /// Current view
    #[must_use]
    pub fn render(&self) -> String {
        self.tracker.state(render)
    }

    /// Detach the screen; in-flight searches no longer update it
    pub fn unmount(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.detach();
        }
    }

    /// Whether the screen is still attached
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.scope.as_ref().is_some_and(ScopeGuard::is_live)
    }

    /// The underlying tracker
    #[must_use]
    pub const fn tracker(&self) -> &AsyncTracker<Vec<Book>, ClientError> {
        &self.tracker
    }
}
