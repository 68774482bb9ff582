//! CLI command implementations.

pub mod details;
pub mod list;
pub mod share;
pub mod trailer;

use crate::core::controller::{HomeController, RefreshPolicy};
use crate::core::state::{self, SavedState};
use crate::models::config::Config;
use crate::models::MovieRecord;
use crate::services::tmdb::TmdbApi;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Spinner shown while a request is in flight.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Find a movie by id in the saved list, fetching a fresh list if the
/// saved one is missing or doesn't contain it.
pub async fn resolve_movie(api: Arc<dyn TmdbApi>, config: &Config, movie_id: i64) -> Result<MovieRecord> {
    match state::load_state(&config.state_file) {
        Ok(saved) => {
            if let Some(movie) = saved.find(movie_id) {
                return Ok(movie.clone());
            }
            tracing::debug!("Movie {} not in saved list, fetching", movie_id);
        }
        Err(e) => tracing::debug!("No usable saved state: {}", e),
    }

    let mut home = HomeController::new(RefreshPolicy::Replace);
    list::refresh_home(api, &mut home).await;

    let movies = home.adapter().movies().to_vec();
    if !movies.is_empty() {
        let saved = SavedState::new(movies);
        if let Err(e) = state::save_state(&saved, &config.state_file) {
            tracing::warn!("Failed to save state: {}", e);
        }
    }

    home.adapter()
        .movies()
        .iter()
        .find(|m| m.id == movie_id)
        .cloned()
        .ok_or(Error::MovieNotFound(movie_id))
}
