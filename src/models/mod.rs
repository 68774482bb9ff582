//! Data models.

pub mod config;
pub mod movie;
pub mod video;

pub use movie::MovieRecord;
pub use video::VideoRecord;
