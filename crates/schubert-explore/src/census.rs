//! Point families and pairwise comparability counts.

use serde::{Deserialize, Serialize};

use schubert_core::{Point, PointError, Relation, SignedValue};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CensusError {
    #[error("fixed position {position} out of range for arity {arity}")]
    PositionOutOfRange { position: usize, arity: usize },

    #[error(transparent)]
    Point(#[from] PointError),
}

/// Relation counts over every unordered pair of a point list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparabilityCensus {
    pub less: usize,
    pub greater: usize,
    pub equal: usize,
    /// Incomparable pairs in scan order (earlier point first).
    pub incomparable: Vec<(Point, Point)>,
}

impl ComparabilityCensus {
    pub fn comparable(&self) -> usize {
        self.less + self.greater
    }

    /// Incomparable pairs whose first slots both hold `leading`.
    pub fn incomparable_with_leading(&self, leading: SignedValue) -> Vec<&(Point, Point)> {
        let starts_with = |p: &Point| p.slots().first().and_then(|s| s.value()) == Some(leading);
        self.incomparable
            .iter()
            .filter(|(a, b)| starts_with(a) && starts_with(b))
            .collect()
    }
}

/// Classify every pair `(points[i], points[j])` with `i < j`.
pub fn comparability_census(points: &[Point]) -> Result<ComparabilityCensus, PointError> {
    let mut census = ComparabilityCensus::default();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            match a.compare(b)? {
                Relation::Less => census.less += 1,
                Relation::Greater => census.greater += 1,
                Relation::Equal => census.equal += 1,
                Relation::Incomparable => census.incomparable.push((a.clone(), b.clone())),
            }
        }
    }
    Ok(census)
}

/// Every ordered selection of `arity` distinct pool entries, as points, in
/// lexicographic order of pool positions. Empty when `arity` exceeds the pool.
pub fn arrangements(pool: &[SignedValue], arity: usize) -> Result<Vec<Point>, PointError> {
    if arity == 0 {
        return Err(PointError::EmptyPoint);
    }
    let mut out = Vec::new();
    let mut used = vec![false; pool.len()];
    let mut current = Vec::with_capacity(arity);
    arrange(pool, arity, &mut used, &mut current, &mut out)?;
    Ok(out)
}

fn arrange(
    pool: &[SignedValue],
    arity: usize,
    used: &mut [bool],
    current: &mut Vec<SignedValue>,
    out: &mut Vec<Point>,
) -> Result<(), PointError> {
    if current.len() == arity {
        out.push(Point::new(current.clone())?);
        return Ok(());
    }
    for i in 0..pool.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(pool[i]);
        arrange(pool, arity, used, current, out)?;
        current.pop();
        used[i] = false;
    }
    Ok(())
}

/// Points of `arity` slots with `fixed` at 1-based `position` and the other
/// slots ranging over the arrangements of `pool`.
pub fn fixed_position_family(
    fixed: SignedValue,
    pool: &[SignedValue],
    arity: usize,
    position: usize,
) -> Result<Vec<Point>, CensusError> {
    if position == 0 || position > arity {
        return Err(CensusError::PositionOutOfRange { position, arity });
    }
    if arity == 1 {
        return Ok(vec![Point::new(vec![fixed])?]);
    }

    arrangements(pool, arity - 1)?
        .into_iter()
        .map(|rest| {
            let mut values = rest.values().unwrap_or_default();
            values.insert(position - 1, fixed);
            Ok(Point::new(values)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(m: u32) -> SignedValue {
        SignedValue::plain(m).unwrap()
    }

    #[test]
    fn test_arrangement_count_and_order() {
        let pool = [p(1), p(2), p(3)];
        let pts = arrangements(&pool, 2).unwrap();
        let shown: Vec<String> = pts.iter().map(ToString::to_string).collect();
        assert_eq!(
            shown,
            vec!["(1 | 2)", "(1 | 3)", "(2 | 1)", "(2 | 3)", "(3 | 1)", "(3 | 2)"]
        );
    }

    #[test]
    fn test_arrangements_larger_than_pool() {
        assert!(arrangements(&[p(1)], 2).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_position_inserts_value() {
        let pts = fixed_position_family(p(9), &[p(1), p(2)], 3, 2).unwrap();
        let shown: Vec<String> = pts.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["(1 | 9 | 2)", "(2 | 9 | 1)"]);
    }

    #[test]
    fn test_fixed_position_out_of_range() {
        assert_eq!(
            fixed_position_family(p(9), &[p(1)], 2, 3),
            Err(CensusError::PositionOutOfRange { position: 3, arity: 2 })
        );
    }
}
