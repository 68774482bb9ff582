//! Details command implementation.

use crate::core::adapter::DetailView;
use crate::core::controller::DetailsController;
use crate::core::dispatch::{Completion, Dispatcher};
use crate::core::format::rating_stars;
use crate::models::config::Config;
use crate::services::tmdb::TmdbApi;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Execute details command.
pub async fn details(api: Arc<dyn TmdbApi>, config: &Config, movie_id: i64, check_image: bool) -> Result<()> {
    let movie = super::resolve_movie(Arc::clone(&api), config, movie_id).await?;
    let mut screen = DetailsController::new(movie);

    if check_image {
        load_banner(api, &mut screen).await;
    }

    print_details(movie_id, &screen.view());
    Ok(())
}

/// Load the banner image and record whether it succeeded.
pub async fn load_banner(api: Arc<dyn TmdbApi>, screen: &mut DetailsController) {
    let movie_id = screen.movie().id;
    let Some(url) = screen.movie().banner_url() else {
        tracing::debug!("Movie {} has no banner image", movie_id);
        screen.image_loaded(false);
        return;
    };

    let (dispatcher, mut inbox) = Dispatcher::new(api);
    dispatcher.spawn_image(0, movie_id, url);
    drop(dispatcher);

    while let Some(completion) = inbox.recv().await {
        match completion {
            Completion::Image {
                movie_id: loaded,
                success,
                ..
            } if loaded == movie_id => {
                screen.image_loaded(success);
                return;
            }
            other => tracing::debug!("Ignoring completion {:?}", other),
        }
    }

    tracing::debug!("Banner load for movie {} ended without a result", movie_id);
    screen.image_loaded(false);
}

fn print_details(movie_id: i64, view: &DetailView) {
    println!("{}", view.title.bold().cyan());
    println!(
        "{} {}   {} {} ({:.1}/5)",
        "Released:".dimmed(),
        view.release_date,
        "Rating:".dimmed(),
        rating_stars(view.rating).yellow(),
        view.rating
    );
    println!();
    println!("{}", view.overview);
    println!();
    println!(
        "{} {}",
        "Banner:".dimmed(),
        super::list::image_label(view.banner_url.as_deref())
    );
    if view.play_visible {
        println!("{} flickster trailer {}", "▶ Play:".green(), movie_id);
    }
    println!("{} flickster share {}", "Share:".dimmed(), movie_id);
}
