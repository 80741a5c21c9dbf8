//! HTTP surface of the booking service.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  http (axum handlers, DTOs, error mapping)   │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │  engine (validation, overlap, pricing)       │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │  store (Repository: memory / wal)            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Handlers own no logic beyond decoding requests and shaping responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
