//! Screen controllers.
//!
//! Controllers are plain state machines owned by the UI loop. They never
//! touch the network: starting a request hands back a [`RequestToken`]
//! for the caller to dispatch, and the caller feeds the outcome back in
//! with that token. A response whose token is not the one a controller
//! is waiting for is stale and gets discarded.

use crate::core::adapter::{classify, DetailView, MovieListAdapter, Variant};
use crate::error::Outcome;
use crate::models::{MovieRecord, VideoRecord};
use serde::{Deserialize, Serialize};

/// Identifies one outstanding request of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Tracks the single request a controller currently cares about.
#[derive(Debug, Default)]
struct RequestTracker {
    issued: u64,
    outstanding: Option<RequestToken>,
}

impl RequestTracker {
    /// Issue a new token. It supersedes any earlier one.
    fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.outstanding = Some(token);
        token
    }

    /// Accept a response if it belongs to the outstanding request.
    fn settle(&mut self, token: RequestToken) -> bool {
        if self.outstanding == Some(token) {
            self.outstanding = None;
            true
        } else {
            tracing::debug!("Discarding stale response {:?}", token);
            false
        }
    }

    fn forget(&mut self) {
        self.outstanding = None;
    }
}

/// Lifecycle of a screen's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What a refresh does with the rows already shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Add fetched rows after the existing ones.
    #[default]
    Append,
    /// Show only the fetched rows.
    Replace,
}

/// Navigation requested by a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Open the details screen for a movie.
    ShowDetails(MovieRecord),
    /// Open the player for a movie's trailer.
    PlayTrailer(i64),
}

/// Home screen: the now-playing list.
#[derive(Debug)]
pub struct HomeController {
    adapter: MovieListAdapter,
    state: ScreenState,
    policy: RefreshPolicy,
    requests: RequestTracker,
}

impl HomeController {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            adapter: MovieListAdapter::new(),
            state: ScreenState::Idle,
            policy,
            requests: RequestTracker::default(),
        }
    }

    /// Rebuild the screen from a saved list. No initial fetch is needed.
    pub fn restore(movies: Vec<MovieRecord>, policy: RefreshPolicy) -> Self {
        Self {
            adapter: MovieListAdapter::with_movies(movies),
            state: ScreenState::Loaded,
            policy,
            requests: RequestTracker::default(),
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Whether the loading indicator should be shown.
    pub fn is_refreshing(&self) -> bool {
        self.state == ScreenState::Loading
    }

    /// Whether the screen still has to do its first fetch.
    pub fn needs_initial_fetch(&self) -> bool {
        self.state == ScreenState::Idle
    }

    pub fn adapter(&self) -> &MovieListAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut MovieListAdapter {
        &mut self.adapter
    }

    /// Start a fetch. Returns `None` while one is already running.
    pub fn begin_refresh(&mut self) -> Option<RequestToken> {
        if self.state == ScreenState::Loading {
            tracing::debug!("Refresh already in progress");
            return None;
        }
        self.state = ScreenState::Loading;
        Some(self.requests.issue())
    }

    /// Apply a now-playing outcome. Returns `false` if it was stale.
    ///
    /// Failure is silent: the indicator stops and the rows stay as they were.
    pub fn on_now_playing(&mut self, token: RequestToken, outcome: Outcome<MovieRecord>) -> bool {
        if !self.requests.settle(token) {
            return false;
        }

        match outcome {
            Ok(movies) => {
                tracing::info!("Loaded {} movies", movies.len());
                match self.policy {
                    RefreshPolicy::Append => self.adapter.append(movies),
                    RefreshPolicy::Replace => self.adapter.replace(movies),
                }
                self.state = ScreenState::Loaded;
            }
            Err(e) => {
                tracing::debug!("Now playing fetch failed: {}", e);
                self.state = ScreenState::Failed;
            }
        }
        true
    }

    /// A row was tapped (or a banner's "more" button).
    pub fn select_row(&self, index: usize) -> Option<Intent> {
        self.adapter
            .get(index)
            .map(|movie| Intent::ShowDetails(movie.clone()))
    }

    /// A row's play button was tapped. Only banner rows have one.
    pub fn play_clicked(&self, index: usize) -> Option<Intent> {
        let movie = self.adapter.get(index)?;
        match classify(movie) {
            Variant::Banner => Some(Intent::PlayTrailer(movie.id)),
            Variant::Poster => None,
        }
    }

    /// The screen is going away; a late response must be ignored.
    pub fn teardown(&mut self) {
        self.requests.forget();
    }
}

/// Text to hand to a share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub subject: String,
    pub text: String,
}

impl SharePayload {
    pub fn new(movie: &MovieRecord, video: &VideoRecord) -> Self {
        Self {
            subject: format!("Check out the trailer for {}", movie.original_title),
            text: format!(
                "Trailer: {}\n\nOverview: {}",
                video.trailer_url(),
                movie.overview
            ),
        }
    }
}

/// Result of the share flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    Share(SharePayload),
    /// Short transient message for the user.
    Notice(String),
}

pub const SERVER_ERROR_NOTICE: &str = "Server error, please try again later.";

/// Details screen for one movie.
#[derive(Debug)]
pub struct DetailsController {
    movie: MovieRecord,
    image_loaded: bool,
    state: ScreenState,
    requests: RequestTracker,
}

impl DetailsController {
    pub fn new(movie: MovieRecord) -> Self {
        Self {
            movie,
            image_loaded: false,
            state: ScreenState::Loaded,
            requests: RequestTracker::default(),
        }
    }

    pub fn movie(&self) -> &MovieRecord {
        &self.movie
    }

    /// State of the share request.
    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn view(&self) -> DetailView {
        DetailView::new(&self.movie, self.image_loaded)
    }

    /// Banner image finished loading. Only success reveals the play button.
    pub fn image_loaded(&mut self, success: bool) {
        self.image_loaded = success;
    }

    pub fn play_clicked(&self) -> Intent {
        Intent::PlayTrailer(self.movie.id)
    }

    /// Start fetching videos to share. A new click supersedes an
    /// earlier, still running one.
    pub fn share_clicked(&mut self) -> RequestToken {
        self.state = ScreenState::Loading;
        self.requests.issue()
    }

    /// Apply a videos outcome for the share flow.
    ///
    /// An empty list means there is nothing to share.
    pub fn on_videos(&mut self, token: RequestToken, outcome: Outcome<VideoRecord>) -> Option<ShareAction> {
        if !self.requests.settle(token) {
            return None;
        }

        match outcome {
            Ok(videos) => {
                self.state = ScreenState::Loaded;
                let video = videos.first()?;
                Some(ShareAction::Share(SharePayload::new(&self.movie, video)))
            }
            Err(e) => {
                tracing::warn!("Video fetch for movie {} failed: {}", self.movie.id, e);
                self.state = ScreenState::Failed;
                Some(ShareAction::Notice(SERVER_ERROR_NOTICE.to_string()))
            }
        }
    }

    pub fn teardown(&mut self) {
        self.requests.forget();
    }
}

/// What the player screen should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Dispatch a videos request with this token.
    Fetch(RequestToken),
    /// Play the trailer.
    Play { key: String, url: String },
    /// Show a notice and close the player.
    Close { notice: String },
}

pub const NO_VIDEO_NOTICE: &str = "No Video Found for this item";
pub const API_ERROR_NOTICE: &str = "Unable to get information from the API.";

/// Trailer player screen.
#[derive(Debug)]
pub struct VideoController {
    movie_id: i64,
    state: ScreenState,
    requests: RequestTracker,
}

impl VideoController {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            state: ScreenState::Idle,
            requests: RequestTracker::default(),
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Start the player. An id of 0 means no movie was handed over.
    pub fn start(&mut self) -> PlaybackAction {
        if self.movie_id == 0 {
            self.state = ScreenState::Failed;
            return PlaybackAction::Close {
                notice: NO_VIDEO_NOTICE.to_string(),
            };
        }
        self.state = ScreenState::Loading;
        PlaybackAction::Fetch(self.requests.issue())
    }

    /// Apply a videos outcome. The first video is played; an empty list
    /// leaves the player as it is.
    pub fn on_videos(&mut self, token: RequestToken, outcome: Outcome<VideoRecord>) -> Option<PlaybackAction> {
        if !self.requests.settle(token) {
            return None;
        }

        match outcome {
            Ok(videos) => {
                self.state = ScreenState::Loaded;
                videos.first().map(|video| PlaybackAction::Play {
                    key: video.key.clone(),
                    url: video.trailer_url(),
                })
            }
            Err(e) => {
                tracing::warn!("Video fetch for movie {} failed: {}", self.movie_id, e);
                self.state = ScreenState::Failed;
                Some(PlaybackAction::Close {
                    notice: API_ERROR_NOTICE.to_string(),
                })
            }
        }
    }

    pub fn teardown(&mut self) {
        self.requests.forget();
    }
}

impl std::str::FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(RefreshPolicy::Append),
            "replace" => Ok(RefreshPolicy::Replace),
            other => Err(format!("unknown refresh policy '{}'", other)),
        }
    }
}
