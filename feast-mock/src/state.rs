use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use shared::error::AppResult;

use crate::catalog::Catalog;
use crate::config::MockConfig;
use crate::store::MockStore;

/// Shared handler state: the mutable store and the read-only catalog
#[derive(Debug, Clone)]
pub struct MockState {
    pub store: Arc<MockStore>,
    pub catalog: Arc<Catalog>,
}

impl MockState {
    pub fn new(store: MockStore, catalog: Catalog) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
        }
    }

    /// Demo data with the embedded catalog
    pub fn seeded() -> AppResult<Self> {
        Self::from_config(&MockConfig::default())
    }

    /// Demo data with the catalog source and fees from `config`
    pub fn from_config(config: &MockConfig) -> AppResult<Self> {
        let catalog = match &config.data_dir {
            Some(dir) => Catalog::from_dir(dir),
            None => Catalog::embedded(),
        };
        Ok(Self::new(MockStore::seeded(config.fees)?, catalog))
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
