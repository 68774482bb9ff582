//! Display formatting helpers.

use chrono::NaiveDate;

/// Format a `YYYY-MM-DD` release date as e.g. "Jan 2, 2020".
///
/// Input that doesn't parse is returned unchanged.
pub fn format_release_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(e) => {
            tracing::debug!("Unparsable release date '{}': {}", raw, e);
            raw.to_string()
        }
    }
}

/// Render a 0-5 rating as filled and empty stars, rounded to the nearest half.
pub fn rating_stars(rating: f64) -> String {
    let halves = (rating.clamp(0.0, 5.0) * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;
    format!("{}{}{}", "★".repeat(full), "½".repeat(half), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("2020-01-02"), "Jan 2, 2020");
        assert_eq!(format_release_date("2016-11-18"), "Nov 18, 2016");
    }

    #[test]
    fn test_format_release_date_passthrough() {
        assert_eq!(format_release_date(""), "");
        assert_eq!(format_release_date("soon"), "soon");
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(rating_stars(3.7), "★★★½☆");
        assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(5.0), "★★★★★");
        assert_eq!(rating_stars(2.0), "★★☆☆☆");
    }
}
