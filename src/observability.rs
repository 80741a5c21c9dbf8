use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: booking attempts. Labels: outcome.
pub const BOOKINGS_TOTAL: &str = "staybook_bookings_total";

/// Histogram: booking decision latency in seconds.
pub const BOOKING_DURATION_SECONDS: &str = "staybook_booking_duration_seconds";

/// Counter: availability queries. Labels: outcome.
pub const AVAILABILITY_QUERIES_TOTAL: &str = "staybook_availability_queries_total";

/// Histogram: rooms returned per availability query.
pub const AVAILABLE_ROOMS: &str = "staybook_available_rooms";

// ── USE metrics (resource utilization) ──────────────────────────

/// Histogram: WAL group-commit flush duration in seconds.
pub const WAL_FLUSH_DURATION_SECONDS: &str = "staybook_wal_flush_duration_seconds";

/// Histogram: WAL group-commit batch size (events per flush).
pub const WAL_FLUSH_BATCH_SIZE: &str = "staybook_wal_flush_batch_size";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Short metric label for an engine outcome.
pub fn outcome_label(result: &Result<impl Sized, crate::engine::EngineError>) -> &'static str {
    use crate::engine::EngineError;
    match result {
        Ok(_) => "ok",
        Err(EngineError::InvalidDate(_)) => "invalid_date",
        Err(EngineError::InvalidRange { .. }) => "invalid_range",
        Err(EngineError::NotFound { .. }) => "not_found",
        Err(EngineError::Conflict(_)) => "conflict",
        Err(EngineError::StorageUnavailable) => "storage_unavailable",
        Err(EngineError::Invalid(_)) => "invalid",
        Err(EngineError::LimitExceeded(_)) => "limit_exceeded",
        Err(EngineError::Storage(_)) => "storage_error",
    }
}
