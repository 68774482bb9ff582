//! Share command implementation.

use crate::core::controller::{DetailsController, ShareAction};
use crate::core::dispatch::{Completion, Dispatcher, VideoPurpose, NO_RESPONSE};
use crate::models::config::Config;
use crate::services::tmdb::TmdbApi;
use crate::FetchError;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Execute share command.
pub async fn share(api: Arc<dyn TmdbApi>, config: &Config, movie_id: i64) -> Result<()> {
    let movie = super::resolve_movie(Arc::clone(&api), config, movie_id).await?;
    let mut screen = DetailsController::new(movie);

    match share_trailer(api, &mut screen).await {
        Some(ShareAction::Share(payload)) => {
            println!("{} {}", "Subject:".dimmed(), payload.subject.bold());
            println!();
            println!("{}", payload.text);
        }
        Some(ShareAction::Notice(notice)) => println!("{}", notice.yellow()),
        None => tracing::info!("No trailer to share for movie {}", movie_id),
    }

    Ok(())
}

/// Run the share flow of the details screen to completion.
///
/// `None` means there was nothing to share. Videos for any other movie
/// are ignored.
pub async fn share_trailer(api: Arc<dyn TmdbApi>, screen: &mut DetailsController) -> Option<ShareAction> {
    let movie_id = screen.movie().id;
    let token = screen.share_clicked();

    let (dispatcher, mut inbox) = Dispatcher::new(api);
    dispatcher.spawn_videos(token, movie_id, VideoPurpose::Share);
    drop(dispatcher);

    let pb = super::spinner("Looking up trailer...");
    let action = loop {
        match inbox.recv().await {
            Some(Completion::Videos {
                token: done,
                movie_id: fetched,
                purpose: VideoPurpose::Share,
                outcome,
            }) if fetched == movie_id => break screen.on_videos(done, outcome),
            Some(other) => tracing::debug!("Ignoring completion {:?}", other),
            None => {
                tracing::warn!("Videos request for movie {} ended without a response", movie_id);
                break screen.on_videos(token, Err(FetchError::Network(NO_RESPONSE.to_string())));
            }
        }
    };
    pb.finish_and_clear();

    action
}
