//! Movie list view-model.
//!
//! Holds the ordered movie list shown on the home screen, decides which
//! presentation each row gets and produces the fields a renderer binds.

use crate::core::format::format_release_date;
use crate::models::MovieRecord;
use serde::{Deserialize, Serialize};

/// Movies rated strictly above this get the banner layout.
pub const BANNER_THRESHOLD: f64 = 5.0;

/// Device/terminal orientation. Decides which image a poster row uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!("unknown orientation '{}'", other)),
        }
    }
}

/// Presentation shape of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Poster,
    Banner,
}

/// Pick the row variant for a movie.
pub fn classify(movie: &MovieRecord) -> Variant {
    if movie.vote_average > BANNER_THRESHOLD {
        Variant::Banner
    } else {
        Variant::Poster
    }
}

/// Bindable state of one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum RowView {
    Poster {
        title: String,
        overview: String,
        /// `None` when the movie has no image for this layout.
        image_url: Option<String>,
    },
    Banner {
        title: String,
        image_url: Option<String>,
        /// Play button is shown only once the banner image has loaded.
        play_visible: bool,
    },
}

impl RowView {
    pub fn variant(&self) -> Variant {
        match self {
            RowView::Poster { .. } => Variant::Poster,
            RowView::Banner { .. } => Variant::Banner,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            RowView::Poster { title, .. } | RowView::Banner { title, .. } => title,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            RowView::Poster { image_url, .. } | RowView::Banner { image_url, .. } => {
                image_url.as_deref()
            }
        }
    }
}

/// Bindable state of the details screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub overview: String,
    /// Release date formatted for display.
    pub release_date: String,
    /// Rating on a 0-5 scale.
    pub rating: f64,
    pub banner_url: Option<String>,
    pub play_visible: bool,
}

impl DetailView {
    pub fn new(movie: &MovieRecord, image_loaded: bool) -> Self {
        Self {
            title: movie.original_title.clone(),
            overview: movie.overview.clone(),
            release_date: format_release_date(&movie.release_date),
            rating: movie.rating_out_of_five(),
            banner_url: movie.banner_url(),
            play_visible: image_loaded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageState {
    Pending,
    Loaded,
    Failed,
}

/// Ordered movie list plus per-row image load state.
#[derive(Debug, Default)]
pub struct MovieListAdapter {
    movies: Vec<MovieRecord>,
    images: Vec<ImageState>,
}

impl MovieListAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter over an existing list (e.g. restored state).
    pub fn with_movies(movies: Vec<MovieRecord>) -> Self {
        let mut adapter = Self::new();
        adapter.append(movies);
        adapter
    }

    /// Add movies after the existing rows.
    pub fn append(&mut self, movies: Vec<MovieRecord>) {
        self.images
            .extend(std::iter::repeat(ImageState::Pending).take(movies.len()));
        self.movies.extend(movies);
    }

    /// Drop all rows and show `movies` instead.
    pub fn replace(&mut self, movies: Vec<MovieRecord>) {
        self.movies.clear();
        self.images.clear();
        self.append(movies);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn variant_at(&self, index: usize) -> Option<Variant> {
        self.movies.get(index).map(classify)
    }

    /// Bind a row afresh. Any earlier image result for it is forgotten,
    /// so the play button stays hidden until the next successful load.
    pub fn bind(&mut self, index: usize, orientation: Orientation) -> Option<RowView> {
        let state = self.images.get_mut(index)?;
        *state = ImageState::Pending;
        self.row(index, orientation)
    }

    /// Record the outcome of loading a row's image.
    ///
    /// Failures are silent: the row keeps its placeholder.
    pub fn image_loaded(&mut self, index: usize, success: bool) {
        if let Some(state) = self.images.get_mut(index) {
            *state = if success {
                ImageState::Loaded
            } else {
                ImageState::Failed
            };
        }
    }

    /// Current view of a row without resetting its image state.
    pub fn row(&self, index: usize, orientation: Orientation) -> Option<RowView> {
        let movie = self.movies.get(index)?;
        let loaded = self.images.get(index) == Some(&ImageState::Loaded);

        let view = match classify(movie) {
            Variant::Banner => RowView::Banner {
                title: movie.original_title.clone(),
                image_url: movie.banner_url(),
                play_visible: loaded,
            },
            Variant::Poster => RowView::Poster {
                title: movie.original_title.clone(),
                overview: movie.overview.clone(),
                image_url: match orientation {
                    Orientation::Portrait => movie.poster_url(),
                    Orientation::Landscape => movie.banner_url(),
                },
            },
        };

        Some(view)
    }

    /// Current views of every row, in list order.
    pub fn rows(&self, orientation: Orientation) -> Vec<RowView> {
        (0..self.movies.len())
            .filter_map(|i| self.row(i, orientation))
            .collect()
    }
}
