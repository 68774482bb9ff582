//! Async request dispatch.
//!
//! Requests run as tokio tasks; each task delivers exactly one
//! [`Completion`] onto a channel read by the UI loop, which is the only
//! place controller state is mutated. Completions from independent
//! requests can arrive in any order. Dropping the [`Inbox`] (screen
//! teardown) turns late deliveries into no-ops.
//!
//! A loop that drops its [`Dispatcher`] once everything is spawned sees
//! [`Inbox::recv`] return `None` when every task has finished, including
//! tasks that died without delivering.

use crate::core::controller::RequestToken;
use crate::error::Outcome;
use crate::models::{MovieRecord, VideoRecord};
use crate::services::tmdb::TmdbApi;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Failure reported for a request whose task ended without delivering.
pub const NO_RESPONSE: &str = "request ended without a response";

/// Why a videos request was made, so the loop can route it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPurpose {
    Share,
    Playback,
}

/// A finished request.
#[derive(Debug)]
pub enum Completion {
    NowPlaying {
        token: RequestToken,
        outcome: Outcome<MovieRecord>,
    },
    Videos {
        token: RequestToken,
        movie_id: i64,
        purpose: VideoPurpose,
        outcome: Outcome<VideoRecord>,
    },
    Image {
        index: usize,
        movie_id: i64,
        success: bool,
    },
}

/// Receiving end of the completion channel.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Inbox {
    /// Wait for the next completion.
    ///
    /// Returns `None` once the dispatcher is gone and nothing is left.
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}

/// Spawns requests against a shared API client.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn TmdbApi>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(api: Arc<dyn TmdbApi>) -> (Self, Inbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, tx }, Inbox { rx })
    }

    pub fn spawn_now_playing(&self, token: RequestToken) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.fetch_now_playing().await;
            deliver(&tx, Completion::NowPlaying { token, outcome });
        });
    }

    pub fn spawn_videos(&self, token: RequestToken, movie_id: i64, purpose: VideoPurpose) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.fetch_videos(movie_id).await;
            deliver(
                &tx,
                Completion::Videos {
                    token,
                    movie_id,
                    purpose,
                    outcome,
                },
            );
        });
    }

    /// Load a row image. `movie_id` lets the loop ignore results for a
    /// row that now shows a different movie.
    pub fn spawn_image(&self, index: usize, movie_id: i64, url: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let success = api.image_available(&url).await;
            deliver(
                &tx,
                Completion::Image {
                    index,
                    movie_id,
                    success,
                },
            );
        });
    }
}

fn deliver(tx: &mpsc::UnboundedSender<Completion>, completion: Completion) {
    if tx.send(completion).is_err() {
        tracing::debug!("Screen gone, dropping completion");
    }
}
