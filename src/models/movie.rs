//! Movie record model.

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix for poster and backdrop images. Paths are appended verbatim.
pub const IMAGE_URL_PREFIX: &str = "https://image.tmdb.org/t/p/w500/";

/// A now-playing movie as returned by TMDB.
///
/// Field names match the TMDB wire format, which is also the format
/// used for saved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// TMDB ID. Used as the lookup key for the movie's videos.
    pub id: i64,
    /// Original title.
    pub original_title: String,
    /// Overview/synopsis.
    pub overview: String,
    /// Release date as sent by the API (YYYY-MM-DD).
    pub release_date: String,
    /// User rating (0-10).
    pub vote_average: f64,
    /// Relative poster path (e.g. "/abc.jpg"). TMDB sends `null` when
    /// there is no image; the key itself must be present.
    #[serde(deserialize_with = "nullable_path")]
    pub poster_path: Option<String>,
    /// Relative backdrop path.
    #[serde(deserialize_with = "nullable_path")]
    pub backdrop_path: Option<String>,
}

impl MovieRecord {
    /// Full URL of the portrait poster image.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(image_url)
    }

    /// Full URL of the landscape backdrop image.
    pub fn banner_url(&self) -> Option<String> {
        self.backdrop_path.as_deref().map(image_url)
    }

    /// Rating on a five star scale.
    pub fn rating_out_of_five(&self) -> f64 {
        self.vote_average / 2.0
    }
}

/// Accept `null` as "no image" without making the field optional.
fn nullable_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// Build an image URL from a relative TMDB path.
pub fn image_url(path: &str) -> String {
    format!("{}{}", IMAGE_URL_PREFIX, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieRecord {
        MovieRecord {
            id: 1,
            original_title: "T".to_string(),
            overview: "O".to_string(),
            release_date: "2020-01-02".to_string(),
            vote_average: 7.4,
            poster_path: Some("/a.jpg".to_string()),
            backdrop_path: Some("/b.jpg".to_string()),
        }
    }

    #[test]
    fn test_image_urls_keep_path_verbatim() {
        let movie = sample();
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500//a.jpg")
        );
        assert_eq!(
            movie.banner_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500//b.jpg")
        );
        assert_eq!(image_url("x y?.png"), "https://image.tmdb.org/t/p/w500/x y?.png");
    }

    #[test]
    fn test_missing_backdrop_has_no_url() {
        let mut movie = sample();
        movie.backdrop_path = None;
        assert!(movie.banner_url().is_none());
        assert!(movie.poster_url().is_some());
    }

    #[test]
    fn test_rating_out_of_five() {
        assert!((sample().rating_out_of_five() - 3.7).abs() < 1e-9);

        let mut movie = sample();
        movie.vote_average = 10.0;
        assert_eq!(movie.rating_out_of_five(), 5.0);
        movie.vote_average = 0.0;
        assert_eq!(movie.rating_out_of_five(), 0.0);
    }
}
