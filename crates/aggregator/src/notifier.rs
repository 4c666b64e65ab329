use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use reqwest::Client;
use tickerhub_core::SnapshotEvent;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::builder::SnapshotBuilder;
use crate::config::NotifierConfig;
use crate::error::NotifyError;

/// Periodically builds a snapshot and POSTs it to a webhook.
///
/// Builds go straight through the [`SnapshotBuilder`], bypassing the cache.
/// A failed iteration is logged and the loop carries on at the next tick.
pub struct OutboundNotifier {
    builder: Arc<SnapshotBuilder>,
    client: Client,
    config: NotifierConfig,
}

impl OutboundNotifier {
    pub fn new(builder: Arc<SnapshotBuilder>, config: NotifierConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .user_agent(concat!("tickerhub/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            builder,
            client,
            config,
        })
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Build one snapshot and deliver it. Returns the number of pairs sent.
    #[instrument(skip(self), fields(exchange = %self.config.exchange))]
    pub async fn deliver_once(&self) -> Result<usize, NotifyError> {
        let snapshot = self
            .builder
            .build(self.config.exchange, &self.config.request)
            .await?;

        self.client
            .post(&self.config.url)
            .json(&SnapshotEvent::new(&snapshot))
            .send()
            .await?
            .error_for_status()?;

        Ok(snapshot.total_pairs)
    }

    /// Deliver forever, sleeping `interval` between attempts
    pub async fn run(self) {
        info!(
            exchange = %self.config.exchange,
            interval_secs = self.config.interval.as_secs(),
            "outbound notifier started"
        );

        loop {
            // A panicking iteration is logged like any other failure
            match AssertUnwindSafe(self.deliver_once()).catch_unwind().await {
                Ok(Ok(pairs)) => info!(pairs, "snapshot delivered"),
                Ok(Err(e)) => error!(error = %e, "snapshot delivery failed"),
                Err(_) => error!("snapshot delivery panicked"),
            }
            tokio::time::sleep(self.config.interval).await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
