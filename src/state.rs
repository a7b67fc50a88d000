use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::musixmatch::MusixmatchClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{SongFinder, TrackSearch};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reusing one client enables connection pooling and avoids socket
/// exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Tunebuddy/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub finder: Arc<SongFinder>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(config.musixmatch.request_timeout_seconds.into())?;
        let musixmatch = Arc::new(MusixmatchClient::with_shared_client(
            http_client,
            &config.musixmatch,
        ));

        Self::with_search(config, musixmatch).await
    }

    /// Wires the state around an arbitrary [`TrackSearch`] implementation so
    /// tests can stub the upstream API without network access.
    pub async fn with_search(
        config: Config,
        search: Arc<dyn TrackSearch>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let finder = Arc::new(SongFinder::new(search));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            finder,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
