use std::sync::Arc;

use crate::config::Config;
use crate::search::orchestrator::SearchOrchestrator;
use crate::store::json::JsonRecordStore;
use crate::store::RecordStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub orchestrator: Arc<SearchOrchestrator>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> =
            Arc::new(JsonRecordStore::open_or_create(&config.data_dir)?);

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        let orchestrator = Arc::new(SearchOrchestrator::new(
            store.clone(),
            http_client.clone(),
            config.embedding.clone(),
        ));

        Ok(Self {
            config,
            store,
            orchestrator,
            http_client,
        })
    }
}
