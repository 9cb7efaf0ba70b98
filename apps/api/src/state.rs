use std::sync::Arc;

use crate::collectors::Collector;
use crate::config::Config;
use crate::search::scoring::ScoringTables;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Enabled collectors, in configuration order. Order is part of the
    /// pipeline's determinism contract.
    pub collectors: Arc<Vec<Arc<dyn Collector>>>,
    /// Domain term tables, validated at startup. Built-in defaults unless
    /// SCORING_TABLES_PATH points at an override file.
    pub tables: Arc<ScoringTables>,
}
