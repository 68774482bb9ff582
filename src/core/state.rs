//! Saved screen state.
//!
//! The home list is written out after a fetch so a later run can show it
//! again without going to the network, and so other screens can look a
//! movie up by id.

use crate::models::MovieRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const STATE_VERSION: &str = "1.0";

/// Snapshot of the home screen list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub version: String,
    pub saved_at: String,
    pub movies: Vec<MovieRecord>,
}

impl SavedState {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
            movies,
        }
    }

    /// Find a movie by TMDB id.
    pub fn find(&self, movie_id: i64) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == movie_id)
    }
}

/// Save state to a JSON file.
pub fn save_state(state: &SavedState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::debug!("State saved to {:?}", path);
    Ok(())
}

/// Load state from a JSON file.
pub fn load_state(path: &Path) -> Result<SavedState> {
    let content = fs::read_to_string(path)?;
    let state: SavedState = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidStateFile(format!("{}: {}", path.display(), e)))?;

    if state.version != STATE_VERSION {
        return Err(Error::InvalidStateFile(format!(
            "unsupported version {}",
            state.version
        )));
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id() {
        let state = SavedState::new(vec![MovieRecord {
            id: 7,
            original_title: "Seven".to_string(),
            overview: String::new(),
            release_date: "1995-09-22".to_string(),
            vote_average: 8.3,
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
        }]);

        assert_eq!(state.find(7).map(|m| m.original_title.as_str()), Some("Seven"));
        assert!(state.find(8).is_none());
    }
}
