//! Trailer command implementation.

use crate::core::controller::{PlaybackAction, VideoController};
use crate::core::dispatch::{Completion, Dispatcher, VideoPurpose, NO_RESPONSE};
use crate::services::tmdb::TmdbApi;
use crate::FetchError;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Execute trailer command.
pub async fn trailer(api: Arc<dyn TmdbApi>, movie_id: i64) -> Result<()> {
    let mut player = VideoController::new(movie_id);

    match play_trailer(api, &mut player).await {
        Some(PlaybackAction::Play { url, .. }) => {
            println!("{} {}", "▶ Trailer:".green().bold(), url);
        }
        Some(PlaybackAction::Close { notice }) => println!("{}", notice.yellow()),
        Some(PlaybackAction::Fetch(_)) | None => {
            tracing::info!("No trailer available for movie {}", movie_id)
        }
    }

    Ok(())
}

/// Run the player screen until it knows what to play.
pub async fn play_trailer(api: Arc<dyn TmdbApi>, player: &mut VideoController) -> Option<PlaybackAction> {
    let token = match player.start() {
        PlaybackAction::Fetch(token) => token,
        other => return Some(other),
    };

    let movie_id = player.movie_id();
    let (dispatcher, mut inbox) = Dispatcher::new(api);
    dispatcher.spawn_videos(token, movie_id, VideoPurpose::Playback);
    drop(dispatcher);

    let pb = super::spinner("Fetching trailer...");
    let action = loop {
        match inbox.recv().await {
            Some(Completion::Videos {
                token: done,
                movie_id: fetched,
                purpose: VideoPurpose::Playback,
                outcome,
            }) if fetched == movie_id => break player.on_videos(done, outcome),
            Some(other) => tracing::debug!("Ignoring completion {:?}", other),
            None => {
                tracing::warn!("Trailer request for movie {} ended without a response", movie_id);
                break player.on_videos(token, Err(FetchError::Network(NO_RESPONSE.to_string())));
            }
        }
    };
    pb.finish_and_clear();

    action
}
