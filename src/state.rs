use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::db::{DocumentStore, StoreError};
use crate::error::AppError;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

impl AppState {
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Log a store failure under a fresh correlation id and turn it into
    /// the 500 the caller sees.
    pub fn store_failure(&self, message: &str, err: StoreError) -> AppError {
        let reference = Uuid::now_v7();
        tracing::error!(%reference, backend = self.store.backend(), "{message}: {err}");

        let detail = if self.config.expose_store_errors {
            err.to_string()
        } else {
            format!("Internal error (ref {reference})")
        };

        AppError::Store {
            message: message.to_string(),
            detail,
        }
    }
}
