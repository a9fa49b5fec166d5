use jomun_core::{Config, FlattenedRecord, LawDocument};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

pub type SharedState = Arc<AppState>;

/// Where a reload reads its data from. Local files only; fetching the
/// sources from the network is outside this service.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub tsv_path: Option<PathBuf>,
    pub xml_dir: Option<PathBuf>,
}

/// One immutable, fully-built view of the loaded corpus. A reload builds
/// a complete replacement aside and publishes it with a single `Arc`
/// swap; in-flight requests keep reading the snapshot they started with.
pub struct Snapshot {
    pub records: Vec<FlattenedRecord>,
    pub documents: Vec<LawDocument>,
    pub generation: u64,
}

impl Snapshot {
    pub fn empty(generation: u64) -> Self {
        Self {
            records: Vec::new(),
            documents: Vec::new(),
            generation,
        }
    }
}

pub struct AppState {
    snapshot: RwLock<Arc<Snapshot>>,
    pub sources: Sources,
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(sources: Sources, config: Config, initial: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(initial)),
            sources,
            config,
            started_at: Instant::now(),
        }
    }

    /// Current snapshot. Cheap; the lock is held only for the Arc clone.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Publish a freshly-built snapshot, stamping the next generation.
    /// Readers see either the old or the new snapshot, never a mix.
    pub async fn publish(&self, mut next: Snapshot) -> Arc<Snapshot> {
        let mut guard = self.snapshot.write().await;
        next.generation = guard.generation + 1;
        let published = Arc::new(next);
        *guard = published.clone();
        published
    }
}
