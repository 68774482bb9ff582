//! Flickster Library
//!
//! Fetches the TMDB now-playing list, turns it into poster and banner rows
//! and looks up trailers to play or share.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, FetchError, Outcome, Result};
