use std::collections::HashSet;

use schubert_core::{Point, PointError};

/// Points with no strict dominator in `points`, in input order.
///
/// Quadratic scan; each candidate stops at its first dominator.
pub fn maximal_points(points: &[Point]) -> Result<Vec<Point>, PointError> {
    let mut maximal = Vec::new();
    'candidates: for candidate in points {
        for other in points {
            if candidate.lt(other)? {
                continue 'candidates;
            }
        }
        maximal.push(candidate.clone());
    }
    Ok(maximal)
}

/// Drop later duplicates, keeping first occurrences in order.
pub fn dedup_points(mut points: Vec<Point>) -> Vec<Point> {
    let mut seen = HashSet::new();
    points.retain(|p| seen.insert(p.clone()));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use schubert_core::parse_point;

    fn points(texts: &[&str]) -> Vec<Point> {
        texts.iter().map(|t| parse_point(t).unwrap()).collect()
    }

    #[test]
    fn test_chain_has_single_maximum() {
        let pts = points(&["(1|2|3)", "(2|1|3)", "(4b|2|3)"]);
        assert_eq!(maximal_points(&pts).unwrap(), points(&["(4b|2|3)"]));
    }

    #[test]
    fn test_antichain_is_kept_whole() {
        let pts = points(&["(2|1|3)", "(1|3|2)"]);
        assert_eq!(maximal_points(&pts).unwrap(), pts);
    }

    #[test]
    fn test_indeterminate_input_fails() {
        let mut open = parse_point("(1|2)").unwrap();
        schubert_core::Reflection::Open(1).apply(&mut open).unwrap();
        let pts = vec![parse_point("(1|2)").unwrap(), open];
        assert!(matches!(
            maximal_points(&pts),
            Err(PointError::IncompatibleComparison { .. })
        ));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let pts = points(&["(1|2)", "(2|1)", "(1|2)", "(2b|1)", "(2|1)"]);
        assert_eq!(dedup_points(pts), points(&["(1|2)", "(2|1)", "(2b|1)"]));
    }
}
