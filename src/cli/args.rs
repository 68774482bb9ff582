//! Command line argument definitions.

use crate::core::adapter::Orientation;
use crate::core::controller::RefreshPolicy;
use clap::{Parser, Subcommand};

/// Flickster - Browse now playing movies and their trailers
#[derive(Parser, Debug)]
#[command(name = "flickster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show movies now playing
    List {
        /// Orientation for poster rows: portrait or landscape
        #[arg(short, long)]
        orientation: Option<Orientation>,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Show the saved list without fetching
        #[arg(long, conflicts_with = "refresh")]
        cached: bool,

        /// Refresh the saved list instead of starting fresh
        #[arg(long)]
        refresh: bool,

        /// What a refresh does with saved rows: append or replace
        #[arg(long)]
        policy: Option<RefreshPolicy>,

        /// Load row images to decide which play buttons to show
        #[arg(long)]
        check_images: bool,
    },

    /// Show details for a movie
    Details {
        /// TMDB movie ID
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,

        /// Load the banner image to decide whether to offer playback
        #[arg(long)]
        check_image: bool,
    },

    /// Look up the trailer for a movie
    Trailer {
        /// TMDB movie ID
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,
    },

    /// Build a share message for a movie's trailer
    Share {
        /// TMDB movie ID
        #[arg(value_name = "MOVIE_ID")]
        movie_id: i64,
    },
}

impl Commands {
    /// Whether the command may run without network access.
    pub fn is_offline(&self) -> bool {
        matches!(self, Commands::List { cached: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_options() {
        let cli = Cli::parse_from([
            "flickster",
            "list",
            "--orientation",
            "landscape",
            "--refresh",
            "--policy",
            "replace",
        ]);

        match cli.command {
            Commands::List {
                orientation,
                refresh,
                policy,
                cached,
                ..
            } => {
                assert_eq!(orientation, Some(Orientation::Landscape));
                assert!(refresh);
                assert!(!cached);
                assert_eq!(policy, Some(RefreshPolicy::Replace));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cached_conflicts_with_refresh() {
        assert!(Cli::try_parse_from(["flickster", "list", "--cached", "--refresh"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["flickster", "trailer", "550", "-v", "--skip-preflight"]);
        assert!(cli.verbose);
        assert!(cli.skip_preflight);
        assert!(matches!(cli.command, Commands::Trailer { movie_id: 550 }));
    }
}
