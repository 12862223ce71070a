use log::{debug, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        let initialized = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("miru_mapping_lib", log::LevelFilter::Debug) // Verbose for our crate
            .filter_module("governor", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn) // Reduce tokio noise
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        // A host application may already own the global logger
        if initialized.is_ok() {
            info!("Logging system initialized");
        }
    });
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log a provider search attempt
    pub fn search_attempt(provider: &str, query: &str, results: Option<usize>) {
        match results {
            Some(count) => {
                debug!("Search: '{}' via {} returned {} results", query, provider, count)
            }
            None => debug!("Search: Starting '{}' via {}", query, provider),
        }
    }

    /// Log a match decision for one provider
    pub fn match_outcome(provider: &str, title: &str, similarity: Option<f64>) {
        match similarity {
            Some(score) => info!(
                "Match: '{}' matched on {} with similarity {:.2}",
                title, provider, score
            ),
            None => debug!("Match: no match for '{}' on {}", title, provider),
        }
    }

    /// Log a provider failure with entity context
    pub fn provider_failure(
        stage: &str,
        media_id: &str,
        provider: &str,
        error: &dyn std::fmt::Display,
    ) {
        warn!(
            "{}: provider {} failed for media {}: {}",
            stage, provider, media_id, error
        );
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
