//! List command implementation.
//!
//! Drives the home screen: restore or fetch the now-playing list, bind
//! every row and print it.

use crate::core::adapter::{Orientation, RowView};
use crate::core::controller::{HomeController, RefreshPolicy, ScreenState};
use crate::core::dispatch::{Completion, Dispatcher, NO_RESPONSE};
use crate::core::state::{self, SavedState};
use crate::models::config::Config;
use crate::services::tmdb::TmdbApi;
use crate::{Error, FetchError};
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Options for the list command.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub orientation: Orientation,
    pub format: String,
    pub cached: bool,
    pub refresh: bool,
    pub policy: RefreshPolicy,
    pub check_images: bool,
}

/// Execute list command.
///
/// `api` is only needed when the list has to be fetched or images checked,
/// so a restored list can be shown without an API key.
pub async fn list(api: Option<Arc<dyn TmdbApi>>, config: &Config, options: ListOptions) -> Result<()> {
    let saved = if options.cached || options.refresh {
        match state::load_state(&config.state_file) {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::debug!("No saved list to restore: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut home = match saved {
        Some(saved) => HomeController::restore(saved.movies, options.policy),
        None => HomeController::new(options.policy),
    };

    if home.needs_initial_fetch() || options.refresh {
        let api = api.clone().ok_or(Error::ApiKeyMissing)?;
        refresh_home(api, &mut home).await;
    }

    if home.state() == ScreenState::Loaded {
        let saved = SavedState::new(home.adapter().movies().to_vec());
        if let Err(e) = state::save_state(&saved, &config.state_file) {
            tracing::warn!("Failed to save state: {}", e);
        }
    }

    if options.check_images {
        match api {
            Some(api) => load_row_images(api, &mut home, options.orientation).await,
            None => tracing::warn!("Skipping image checks: TMDB API key not configured"),
        }
    }

    let rows = home.adapter().rows(options.orientation);
    let ids: Vec<i64> = home.adapter().movies().iter().map(|m| m.id).collect();

    match options.format.as_str() {
        "json" => print_json(&ids, &rows)?,
        "simple" => print_simple(&ids, &rows),
        _ => print_table(&ids, &rows),
    }

    Ok(())
}

/// Run one fetch cycle on the home screen and wait for its outcome.
///
/// Failure is silent: the spinner stops and existing rows are kept.
pub async fn refresh_home(api: Arc<dyn TmdbApi>, home: &mut HomeController) {
    let Some(token) = home.begin_refresh() else {
        return;
    };

    let (dispatcher, mut inbox) = Dispatcher::new(api);
    let pb = super::spinner("Loading now playing movies...");
    dispatcher.spawn_now_playing(token);
    drop(dispatcher);

    while home.is_refreshing() {
        match inbox.recv().await {
            Some(Completion::NowPlaying { token: done, outcome }) => {
                home.on_now_playing(done, outcome);
            }
            Some(other) => tracing::debug!("Ignoring completion {:?}", other),
            None => {
                tracing::warn!("Now playing request ended without a response");
                home.on_now_playing(token, Err(FetchError::Network(NO_RESPONSE.to_string())));
                break;
            }
        }
    }

    pb.finish_and_clear();
}

/// Bind every row and load its image. Banner rows whose image loads get
/// their play button. Rows without an image count as failed loads.
pub async fn load_row_images(api: Arc<dyn TmdbApi>, home: &mut HomeController, orientation: Orientation) {
    let (dispatcher, mut inbox) = Dispatcher::new(api);
    let adapter = home.adapter_mut();

    let mut pending = 0usize;
    for index in 0..adapter.len() {
        let Some(movie_id) = adapter.get(index).map(|m| m.id) else {
            continue;
        };
        let Some(row) = adapter.bind(index, orientation) else {
            continue;
        };
        match row.image_url() {
            Some(url) => {
                dispatcher.spawn_image(index, movie_id, url.to_string());
                pending += 1;
            }
            None => adapter.image_loaded(index, false),
        }
    }
    drop(dispatcher);

    while pending > 0 {
        match inbox.recv().await {
            Some(Completion::Image {
                index,
                movie_id,
                success,
            }) => {
                pending -= 1;
                if adapter.get(index).map(|m| m.id) == Some(movie_id) {
                    adapter.image_loaded(index, success);
                }
            }
            Some(other) => tracing::debug!("Ignoring completion {:?}", other),
            None => {
                tracing::debug!("{} image loads ended without a result", pending);
                break;
            }
        }
    }
}

/// Print rows as JSON.
fn print_json(ids: &[i64], rows: &[RowView]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct RowJson<'a> {
        id: i64,
        #[serde(flatten)]
        row: &'a RowView,
    }

    let output: Vec<RowJson> = ids
        .iter()
        .zip(rows)
        .map(|(&id, row)| RowJson { id, row })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print rows in simple format.
fn print_simple(ids: &[i64], rows: &[RowView]) {
    for (id, row) in ids.iter().zip(rows) {
        let variant = match row {
            RowView::Poster { .. } => "poster",
            RowView::Banner { .. } => "banner",
        };
        println!("{}\t{}\t{}", id, variant, row.title());
    }
}

/// Print rows as a table.
fn print_table(ids: &[i64], rows: &[RowView]) {
    if rows.is_empty() {
        println!("{}", "No movies to show.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Now playing ({} movies):", rows.len()).bold().cyan()
    );
    println!();

    for (id, row) in ids.iter().zip(rows) {
        match row {
            RowView::Banner {
                title,
                image_url,
                play_visible,
            } => {
                let play = if *play_visible {
                    format!("  {} flickster trailer {}", "▶".green(), id)
                } else {
                    String::new()
                };
                println!("{} {}{}", format!("[{}]", id).dimmed(), title.bold().yellow(), play);
                println!("    {}", image_label(image_url.as_deref()).dimmed());
                println!("    {} flickster details {}", "More:".dimmed(), id);
            }
            RowView::Poster {
                title,
                overview,
                image_url,
            } => {
                println!("{} {}", format!("[{}]", id).dimmed(), title.bold());
                println!("    {}", truncate(overview, 160));
                println!("    {}", image_label(image_url.as_deref()).dimmed());
            }
        }
        println!();
    }
}

pub(crate) fn image_label(url: Option<&str>) -> &str {
    url.unwrap_or("(no image)")
}

/// Shorten text to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("ab cd ef", 4), "ab…");
    }

    #[test]
    fn test_image_label() {
        assert_eq!(image_label(None), "(no image)");
        assert_eq!(image_label(Some("u")), "u");
    }
}
