//! Integration tests for response parsing.
//!
//! Tests cover:
//! - Now playing scenario with classification and rating
//! - Dropping malformed entries while keeping order
//! - Envelope failures

use flickster::core::adapter::{classify, MovieListAdapter, Orientation, RowView, Variant};
use flickster::core::records::{parse_movies, parse_videos};
use flickster::Error;

const ONE_MOVIE: &str = r#"{"results":[{"id":1,"poster_path":"/a.jpg","backdrop_path":"/b.jpg","original_title":"T","overview":"O","vote_average":7.4,"release_date":"2020-01-02"}]}"#;

fn movie_json(id: i64, title: &str, vote: f64) -> String {
    format!(
        r#"{{"id":{},"poster_path":"/p{}.jpg","backdrop_path":"/b{}.jpg","original_title":"{}","overview":"o","vote_average":{},"release_date":"2021-05-05"}}"#,
        id, id, id, title, vote
    )
}

#[test]
fn test_single_movie_scenario() {
    let movies = parse_movies(ONE_MOVIE).unwrap();

    assert_eq!(movies.len(), 1);
    let movie = &movies[0];
    assert_eq!(movie.id, 1);
    assert_eq!(movie.original_title, "T");
    assert_eq!(movie.overview, "O");
    assert_eq!(movie.release_date, "2020-01-02");
    assert_eq!(movie.poster_path.as_deref(), Some("/a.jpg"));
    assert_eq!(movie.backdrop_path.as_deref(), Some("/b.jpg"));
    assert_eq!(classify(movie), Variant::Banner);
    assert!((movie.rating_out_of_five() - 3.7).abs() < 1e-9);
}

#[test]
fn test_entry_missing_id_is_dropped() {
    let body = r#"{"results":[
        {"poster_path":"/x.jpg","backdrop_path":"/y.jpg","original_title":"NoId","overview":"O","vote_average":6.0,"release_date":"2020-01-02"},
        {"id":2,"poster_path":"/a.jpg","backdrop_path":"/b.jpg","original_title":"Good","overview":"O","vote_average":4.0,"release_date":"2020-01-02"}
    ]}"#;

    let movies = parse_movies(body).unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, 2);
    assert_eq!(movies[0].original_title, "Good");
}

#[test]
fn test_malformed_entries_keep_relative_order() {
    let body = format!(
        r#"{{"page":1,"results":[{},{{"id":"nope"}},{},{{"id":9,"original_title":null}},{}],"total_pages":3}}"#,
        movie_json(10, "A", 6.5),
        movie_json(11, "B", 2.0),
        movie_json(12, "C", 5.0),
    );

    let movies = parse_movies(&body).unwrap();
    let titles: Vec<_> = movies.iter().map(|m| m.original_title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[test]
fn test_wrong_typed_fields_are_dropped() {
    let body = r#"{"results":[
        {"id":1.5,"poster_path":"/a.jpg","backdrop_path":"/b.jpg","original_title":"T","overview":"O","vote_average":7,"release_date":"2020-01-02"},
        {"id":2,"poster_path":"/a.jpg","backdrop_path":"/b.jpg","original_title":"T","overview":"O","vote_average":"7","release_date":"2020-01-02"},
        {"id":3,"poster_path":"/a.jpg","backdrop_path":"/b.jpg","original_title":"T","overview":"O","vote_average":7,"release_date":"2020-01-02"},
        {"id":4,"poster_path":"/a.jpg","backdrop_path":5,"original_title":"T","overview":"O","vote_average":7,"release_date":"2020-01-02"},
        {"id":5,"poster_path":"/a.jpg","backdrop_path":null,"original_title":"T","overview":"O","vote_average":7,"release_date":"2020-01-02"}
    ]}"#;

    let movies = parse_movies(body).unwrap();
    let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 5]);
    assert_eq!(movies[0].vote_average, 7.0);
    assert_eq!(movies[1].backdrop_path, None);
}

#[test]
fn test_null_image_paths_keep_the_movie() {
    let body = r#"{"results":[
        {"id":1,"poster_path":"/a.jpg","backdrop_path":null,"original_title":"NoBackdrop","overview":"O","vote_average":7.4,"release_date":"2020-01-02"},
        {"id":2,"poster_path":null,"backdrop_path":"/b.jpg","original_title":"NoPoster","overview":"O","vote_average":3.0,"release_date":"2020-01-02"},
        {"id":3,"poster_path":"/c.jpg","original_title":"NoBackdropKey","overview":"O","vote_average":7.0,"release_date":"2020-01-02"}
    ]}"#;

    let movies = parse_movies(body).unwrap();
    let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);

    assert!(movies[0].backdrop_path.is_none());
    assert!(movies[0].banner_url().is_none());
    assert!(movies[1].poster_url().is_none());

    let mut adapter = MovieListAdapter::with_movies(movies);
    let row = adapter.bind(0, Orientation::Portrait).unwrap();
    assert_eq!(
        row,
        RowView::Banner {
            title: "NoBackdrop".to_string(),
            image_url: None,
            play_visible: false,
        }
    );

    // Nothing to load, so the play button stays hidden.
    adapter.image_loaded(0, false);
    assert_eq!(
        adapter.row(0, Orientation::Portrait).unwrap().image_url(),
        None
    );
    assert!(matches!(
        adapter.row(0, Orientation::Portrait),
        Some(RowView::Banner { play_visible: false, .. })
    ));

    let poster = adapter.row(1, Orientation::Portrait).unwrap();
    assert_eq!(poster.variant(), Variant::Poster);
    assert_eq!(poster.image_url(), None);
    assert_eq!(
        adapter.row(1, Orientation::Landscape).unwrap().image_url(),
        Some("https://image.tmdb.org/t/p/w500//b.jpg")
    );
}

#[test]
fn test_all_entries_malformed_is_empty_success() {
    let movies = parse_movies(r#"{"results":[{},{"id":1}]}"#).unwrap();
    assert!(movies.is_empty());
}

#[test]
fn test_envelope_failures() {
    assert!(matches!(parse_movies("not json"), Err(Error::Parse(_))));
    assert!(matches!(parse_movies(r#"{"page":1}"#), Err(Error::Parse(_))));
    assert!(matches!(parse_movies(r#"{"results":null}"#), Err(Error::Parse(_))));
    assert!(matches!(parse_movies(r#"[]"#), Err(Error::Parse(_))));
}

#[test]
fn test_empty_video_results() {
    let videos = parse_videos(r#"{"id":1,"results":[]}"#).unwrap();
    assert!(videos.is_empty());
}

#[test]
fn test_video_trailer_url() {
    let videos = parse_videos(r#"{"results":[{"key":"dQw4w9WgXcQ","name":"Trailer"}]}"#).unwrap();
    assert_eq!(
        videos[0].trailer_url(),
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
    );
}
