//! Tolerant parsing of TMDB list responses.
//!
//! A response is an object with a `results` array. The envelope must be
//! well formed; individual entries that fail to deserialize are logged
//! and dropped so one bad record never fails the whole list.

use crate::models::{MovieRecord, VideoRecord};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    results: Vec<Value>,
}

/// Parse a now-playing response body.
pub fn parse_movies(body: &str) -> Result<Vec<MovieRecord>> {
    parse_results(body, "movie")
}

/// Parse a videos response body.
pub fn parse_videos(body: &str) -> Result<Vec<VideoRecord>> {
    parse_results(body, "video")
}

/// Parse the `results` array of a response body, keeping server order.
///
/// Fails only if the body is not JSON or has no `results` array.
pub fn parse_results<T: DeserializeOwned>(body: &str, kind: &str) -> Result<Vec<T>> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(from_values(envelope.results, kind))
}

/// Convert raw entries into records, skipping the ones that don't parse.
pub fn from_values<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match parse_item(position, value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping {} entry: {}", kind, e);
                None
            }
        })
        .collect();

    if records.len() != total {
        tracing::debug!("Parsed {} of {} {} entries", records.len(), total, kind);
    }

    records
}

fn parse_item<T: DeserializeOwned>(position: usize, value: Value) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::ItemParse {
        position,
        reason: e.to_string(),
    })
}
