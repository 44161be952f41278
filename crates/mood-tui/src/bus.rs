//! Typed publish/subscribe channel between the mood selector and the
//! playback controller.

use mood_proto::{Mood, Track};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Published after a mood's song list settles.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistUpdated {
    pub mood: Mood,
    pub tracks: Vec<Track>,
    /// Sequence number of the fetch that produced `tracks`.
    pub seq: u64,
}

#[derive(Clone)]
pub struct PlaylistBus {
    tx: broadcast::Sender<PlaylistUpdated>,
}

impl PlaylistBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns how many subscribers received the message.
    pub fn publish(&self, update: PlaylistUpdated) -> usize {
        debug!(
            "[bus] playlist updated: mood={} tracks={} seq={}",
            update.mood,
            update.tracks.len(),
            update.seq
        );
        match self.tx.send(update) {
            Ok(n) => n,
            Err(_) => {
                debug!("[bus] no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> PlaylistSubscriber {
        PlaylistSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

pub struct PlaylistSubscriber {
    rx: broadcast::Receiver<PlaylistUpdated>,
}

impl PlaylistSubscriber {
    /// Next update, or `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<PlaylistUpdated> {
        loop {
            match self.rx.recv().await {
                Ok(update) => return Some(update),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("[bus] subscriber lagged by {} messages", n);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<PlaylistUpdated> {
        loop {
            match self.rx.try_recv() {
                Ok(update) => return Some(update),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("[bus] subscriber lagged by {} messages", n);
                }
                Err(_) => return None,
            }
        }
    }
}
