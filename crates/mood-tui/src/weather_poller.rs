//! Background weather polling with an explicit stop.

use std::time::Duration;

use mood_proto::{ApiClient, WeatherSnapshot};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fetches the weather immediately, then every `interval`, until stopped.
/// Only successful fetches are forwarded; a failed tick leaves whatever the
/// receiver already shows and is retried on the next tick.
pub struct WeatherPoller {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl WeatherPoller {
    pub fn spawn(
        client: ApiClient,
        interval: Duration,
        tx: mpsc::Sender<WeatherSnapshot>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            info!("[weather] polling every {:?}", interval);
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let snapshot = tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    snapshot = client.fetch_weather() => snapshot,
                };

                match snapshot {
                    Some(snapshot) => {
                        if tx.send(snapshot).await.is_err() {
                            debug!("[weather] receiver gone");
                            break;
                        }
                    }
                    None => warn!("[weather] keeping previous snapshot"),
                }
            }
            info!("[weather] poller stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the poll loop and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("[weather] poller task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for WeatherPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
