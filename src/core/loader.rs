use super::rate::RateProvider;
use super::status::{LoadError, LoadStatus};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Fetches the current rate once, in the background, and publishes the
/// outcome as a [`LoadStatus`].
///
/// The request is issued by a single task spawned in [`RateLoader::start`];
/// nothing else writes the status, and it is written at most once.
pub struct RateLoader {
    status: watch::Receiver<LoadStatus>,
}

impl RateLoader {
    /// Spawns the fetch. Must be called from within a tokio runtime.
    pub fn start(provider: Arc<dyn RateProvider>) -> Self {
        let (tx, rx) = watch::channel(LoadStatus::Loading);

        tokio::spawn(async move {
            let status = load(provider.as_ref()).await;
            if tx.send(status).is_err() {
                debug!("Rate loader finished with no observers left");
            }
        });

        Self { status: rx }
    }

    /// The status right now, without waiting.
    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    /// Waits until the load has reached `Ready` or `Error`.
    pub async fn settled(&mut self) -> LoadStatus {
        match self.status.wait_for(|s| !s.is_loading()).await {
            Ok(status) => status.clone(),
            Err(_) => LoadStatus::Error("La carga de la TRM se interrumpió".to_string()),
        }
    }
}

#[instrument(name = "RateLoad", skip(provider))]
async fn load(provider: &dyn RateProvider) -> LoadStatus {
    let status = LoadStatus::from(provider.fetch_latest().await.map_err(LoadError::from));
    debug!(?status, "Rate load settled");
    status
}
