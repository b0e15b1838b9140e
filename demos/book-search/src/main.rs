//! Book search binary
//!
//! Drives the discover screen through a successful search, a failed search,
//! a reset and an unmount while a search is still in flight. Every state
//! write is rendered by a subscriber task; profile records are flushed to
//! the log.

use async_lifecycle_core::environment::SystemClock;
use async_lifecycle_runtime::{
    ProfileError, ProfileQueue, ProfileRecord, ProfileSink, Profiler, ProfilerConfig,
    TrackerConfig, metrics, spawn_flush_loop,
};
use book_search::{Catalog, SearchScreen, render};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Writes flushed profile batches to the log as JSON
struct LogSink;

impl ProfileSink for LogSink {
    fn send(
        &self,
        batch: Vec<ProfileRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ProfileError>> + Send + '_>> {
        Box::pin(async move {
            let json = serde_json::to_string(&batch)
                .map_err(|e| ProfileError::Sink(e.to_string()))?;
            tracing::info!(records = batch.len(), %json, "Profile batch");
            Ok(())
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "book_search=info,async_lifecycle_runtime=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    metrics::register_metrics();

    println!("=== Book Search: Async Lifecycle Tracker ===\n");

    let profiler_config = ProfilerConfig::default()
        .with_flush_interval(Duration::from_secs(1))
        .with_max_queued(100);
    let queue = ProfileQueue::with_config(&profiler_config);
    let profiler = Profiler::new("discover", queue.clone(), Arc::new(SystemClock));
    let sink: Arc<dyn ProfileSink> = Arc::new(LogSink);
    let flush = spawn_flush_loop(
        queue.clone(),
        Arc::clone(&sink),
        tokio::time::interval(profiler_config.flush_interval),
    );

    let catalog = Catalog::sample(Duration::from_millis(200));
    let mut screen = SearchScreen::mount(TrackerConfig::new("discover").with_profiler(profiler))?;
    tracing::info!(tracker = screen.tracker().label(), "Screen mounted");

    // Re-render on every state write
    let mut states = screen.tracker().subscribe();
    let renderer = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let view = render(&states.borrow_and_update());
            println!("[render]\n{view}\n");
        }
    });

    println!(">>> Search: dune");
    let outcome = screen.search(&catalog, "dune").await?;
    println!("Search returned {} books\n", outcome.map(|books| books.len()).unwrap_or(0));

    println!(">>> Search: dune (catalog offline)");
    let offline = catalog.clone().offline();
    let outcome = screen.search(&offline, "dune").await?;
    if let Err(error) = outcome {
        println!("Search failed: {error}\n");
    }

    println!(">>> Clear");
    screen.clear();
    tokio::task::yield_now().await;

    println!(">>> Search: hyperion, then unmount before it returns");
    let pending = screen.search(&catalog, "hyperion");
    screen.unmount();
    let outcome = pending.await?;
    println!(
        "Late search returned {} books; screen still shows:\n{}\n",
        outcome.map(|books| books.len()).unwrap_or(0),
        screen.render()
    );

    flush.abort();
    if let Err(error) = queue.flush(sink.as_ref()).await {
        tracing::warn!(%error, "Final profile flush failed");
    }

    drop(screen);
    renderer.await?;

    println!("=== Demonstration Complete ===");
    Ok(())
}
