use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use ulid::Ulid;

use crate::model::Event;
use crate::wal::Wal;

use super::{Collection, Filter, MemoryStore, Record, Repository, StoreError, StoreInfo};

const CHANNEL_CAPACITY: usize = 4096;
const MAX_BATCH: usize = 1024;

// ── Group commit ─────────────────────────────────────────

struct Append {
    event: Event,
    response: oneshot::Sender<io::Result<()>>,
}

/// Owns the log. Whatever is queued when it wakes becomes one batch that
/// shares a single fsync; every caller in the batch gets the same verdict.
async fn wal_writer_loop(mut wal: Wal, mut rx: mpsc::Receiver<Append>) {
    let mut batch = Vec::new();
    while rx.recv_many(&mut batch, MAX_BATCH).await > 0 {
        metrics::histogram!(crate::observability::WAL_FLUSH_BATCH_SIZE).record(batch.len() as f64);
        let started = std::time::Instant::now();
        let outcome = write_batch(&mut wal, batch.iter().map(|a| &a.event));
        metrics::histogram!(crate::observability::WAL_FLUSH_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        for append in batch.drain(..) {
            let reply = outcome
                .as_ref()
                .map(|_| ())
                .map_err(|e| io::Error::new(e.kind(), e.to_string()));
            let _ = append.response.send(reply);
        }
    }
    tracing::debug!("WAL writer for {} stopped after {} appends", wal.path().display(), wal.appends());
}

/// Buffer the events and sync once. The sync runs even after a failed
/// write so no half-written batch lingers in the buffer.
fn write_batch<'a>(wal: &mut Wal, events: impl Iterator<Item = &'a Event>) -> io::Result<()> {
    let written = events
        .map(|event| wal.append_buffered(event))
        .find(Result::is_err)
        .unwrap_or(Ok(()));
    let synced = wal.flush_sync();
    written.and(synced)
}

/// `MemoryStore` made durable: every create is logged before it is applied,
/// and the log is replayed on open.
pub struct WalStore {
    memory: MemoryStore,
    wal_tx: mpsc::Sender<Append>,
    path: PathBuf,
}

impl WalStore {
    /// Must be called inside a tokio runtime: spawns the writer task.
    pub fn open(path: &Path) -> io::Result<Self> {
        let (events, wal) = Wal::recover(path)?;
        let memory = MemoryStore::new();
        let replayed = events.len();
        for event in events {
            if let Err(e) = memory.apply(Record::from(event)) {
                warn!("replay skipped event: {e}");
            }
        }
        info!("replayed {replayed} events from {}", path.display());

        let (wal_tx, wal_rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(wal_writer_loop(wal, wal_rx));

        Ok(Self {
            memory,
            wal_tx,
            path: path.to_path_buf(),
        })
    }

    async fn wal_append(&self, event: Event) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();
        self.wal_tx
            .send(Append { event, response: tx })
            .await
            .map_err(|_| StoreError::Wal("WAL writer shut down".into()))?;
        rx.await
            .map_err(|_| StoreError::Wal("WAL writer dropped response".into()))?
            .map_err(|e| StoreError::Wal(e.to_string()))
    }
}

#[async_trait]
impl Repository for WalStore {
    async fn create(&self, record: Record) -> Result<Ulid, StoreError> {
        let id = record.id();
        if self.memory.contains(record.collection(), &id) {
            return Err(StoreError::AlreadyExists(id));
        }
        self.wal_append(Event::from(record.clone())).await?;
        self.memory.apply(record)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        self.memory.query(collection, filter)
    }

    fn describe(&self) -> StoreInfo {
        self.memory
            .info("wal", Some(self.path.display().to_string()))
    }
}
