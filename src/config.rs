use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::engine::Engine;
use crate::store::{MemoryStore, WalStore};

/// Which repository backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// MemoryStore + write-ahead log in `data_dir`.
    Wal,
    Memory,
    /// No repository: requests that need storage fail.
    Disabled,
}

impl StoreKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wal" => Some(StoreKind::Wal),
            "memory" | "mem" => Some(StoreKind::Memory),
            "none" | "disabled" | "off" => Some(StoreKind::Disabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub metrics_port: Option<u16>,
    /// Seed the demo catalogue when the store starts empty.
    pub seed_on_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 8000,
            data_dir: PathBuf::from("./data"),
            store: StoreKind::Wal,
            metrics_port: None,
            seed_on_empty: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let store = match lookup("STAYBOOK_STORE") {
            Some(raw) => StoreKind::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("unknown STAYBOOK_STORE {raw:?}, using wal");
                StoreKind::Wal
            }),
            None => defaults.store,
        };
        Self {
            bind: lookup("STAYBOOK_BIND").unwrap_or(defaults.bind),
            port: lookup("STAYBOOK_PORT")
                .or_else(|| lookup("PORT"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: lookup("STAYBOOK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            store,
            metrics_port: lookup("STAYBOOK_METRICS_PORT").and_then(|s| s.parse().ok()),
            seed_on_empty: lookup("STAYBOOK_SEED")
                .is_some_and(|s| matches!(s.trim(), "1" | "true" | "yes")),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn wal_path(&self) -> PathBuf {
        self.data_dir.join("staybook.wal")
    }

    /// Open the configured store. A WAL that cannot be opened leaves the
    /// engine without storage instead of aborting startup.
    /// Must run inside a tokio runtime: the WAL writer is spawned here.
    pub fn open_engine(&self) -> Engine {
        match self.store {
            StoreKind::Memory => {
                info!("store: memory (not persisted)");
                Engine::new(Arc::new(MemoryStore::new()))
            }
            StoreKind::Disabled => {
                info!("store: disabled");
                Engine::without_storage()
            }
            StoreKind::Wal => {
                let path = self.wal_path();
                let opened = std::fs::create_dir_all(&self.data_dir)
                    .and_then(|_| WalStore::open(&path));
                match opened {
                    Ok(store) => {
                        info!("store: wal at {}", path.display());
                        Engine::new(Arc::new(store))
                    }
                    Err(e) => {
                        error!("failed to open wal {}: {e}; running without storage", path.display());
                        Engine::without_storage()
                    }
                }
            }
        }
    }
}
