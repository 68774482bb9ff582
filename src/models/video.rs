//! Video record model.

use serde::{Deserialize, Serialize};

/// Prefix for trailer playback links.
pub const TRAILER_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A video attached to a movie. Only the YouTube key is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub key: String,
}

impl VideoRecord {
    /// Playback URL for this video.
    pub fn trailer_url(&self) -> String {
        format!("{}{}", TRAILER_URL_PREFIX, self.key)
    }
}
