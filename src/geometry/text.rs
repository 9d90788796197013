//! Text form of a point list: `[(x1, y1), (x2, y2), ...]`.

use glam::DVec2;
use regex::Regex;
use std::sync::LazyLock;

const NUMBER: &str = r"([-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?)";

static POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\(\s*{NUMBER}\s*,\s*{NUMBER}\s*\)")).expect("point pattern is valid")
});

/// Format points with zero decimals; an empty list gives an empty string.
///
/// ```
/// use det_review::geometry::text::format_points;
/// use glam::DVec2;
///
/// let text = format_points(&[DVec2::new(1.2, 3.0), DVec2::new(10.0, 20.7)]);
/// assert_eq!(text, "[(1, 3), (10, 21)]");
/// ```
pub fn format_points(points: &[DVec2]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let body = points
        .iter()
        .map(|p| format!("({:.0}, {:.0})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

/// Extract every `(number, number)` pair, ignoring anything else.
///
/// ```
/// use det_review::geometry::text::parse_points;
/// use glam::DVec2;
///
/// let points = parse_points("[( 1.5 ,2), junk (3e1, -.5)]");
/// assert_eq!(points, vec![DVec2::new(1.5, 2.0), DVec2::new(30.0, -0.5)]);
/// ```
pub fn parse_points(text: &str) -> Vec<DVec2> {
    POINT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let x = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let y = caps.get(2)?.as_str().parse::<f64>().ok()?;
            Some(DVec2::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty() {
        assert_eq!(format_points(&[]), "");
    }

    #[test]
    fn test_parse_ignores_malformed_pairs() {
        let points = parse_points("(1, 2) (3,) (a, b) (4 , 5)(6.,7)");
        assert_eq!(
            points,
            vec![DVec2::new(1.0, 2.0), DVec2::new(4.0, 5.0), DVec2::new(6.0, 7.0)]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_points("").is_empty());
        assert!(parse_points("no points here").is_empty());
    }

    #[test]
    fn test_round_trip_integers() {
        let points = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(10.0, 20.0)];
        assert_eq!(parse_points(&format_points(&points)), points);
    }
}
