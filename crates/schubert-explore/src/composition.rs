//! Integer compositions and the reflection sequences they generate.
//!
//! Enumeration strategy:
//! - **Compositions**: the `2^(n-1)` compositions of `n` are read off the
//!   binary strings of length `n - 1`; bit `b` set means a cut after
//!   position `b + 1`. Results are stably sorted by part count.
//! - **Translation**: a cursor starts at slot 1; each run `L` swaps the cursor
//!   with `cursor + L`, or opens the cursor slot when `cursor + L` is past the
//!   arity. Only the final run may pass the arity.
//! - **Orderings**: every permutation of a translated sequence is its own path,
//!   duplicates included (`k!` paths for `k` runs).

use serde::{Deserialize, Serialize};

use schubert_core::{Reflection, ReflectionSequence};

/// Largest degree the enumerator accepts: `2^19` compositions, each cut
/// pattern read from a `u64` mask. Full path expansion is far larger than the
/// composition list; [`CalculatorConfig::max_degree`](crate::CalculatorConfig)
/// bounds that.
pub const MAX_ENUMERABLE_DEGREE: usize = 20;

/// Errors during enumeration or translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("unsupported degree {degree}: must be between 1 and {max}")]
    UnsupportedDegree { degree: usize, max: usize },

    #[error("composition has no runs")]
    EmptyComposition,

    #[error("run {run} has length zero")]
    EmptyRun { run: usize },

    #[error("run {run} moves the cursor to {cursor}, past arity {arity}, before the final run")]
    CursorOverflow { run: usize, cursor: usize, arity: usize },
}

/// One composition together with its translated sequence and every ordering of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionBlock {
    /// Run lengths, e.g. `[1, 1, 2]`.
    pub runs: Vec<usize>,
    /// The runs translated into reflections, in run order.
    pub sequence: ReflectionSequence,
    /// Every permutation of `sequence`, `runs.len()!` entries.
    pub orderings: Vec<ReflectionSequence>,
}

impl CompositionBlock {
    /// Translate `runs` against a point of `arity` slots and expand its orderings.
    pub fn new(runs: Vec<usize>, arity: usize) -> Result<Self, CompositionError> {
        let sequence = translate(&runs, arity)?;
        let orderings = orderings(&sequence);
        Ok(Self {
            runs,
            sequence,
            orderings,
        })
    }
}

/// Produces the full set of reflection sequences for one degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionEnumerator {
    degree: usize,
}

impl CompositionEnumerator {
    pub fn new(degree: usize) -> Result<Self, CompositionError> {
        if degree == 0 || degree > MAX_ENUMERABLE_DEGREE {
            return Err(CompositionError::UnsupportedDegree {
                degree,
                max: MAX_ENUMERABLE_DEGREE,
            });
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn compositions(&self) -> Vec<Vec<usize>> {
        compositions(self.degree)
    }

    /// Every composition translated against arity `degree`, in composition order.
    pub fn blocks(&self) -> Result<Vec<CompositionBlock>, CompositionError> {
        self.compositions()
            .into_iter()
            .map(|runs| CompositionBlock::new(runs, self.degree))
            .collect()
    }

    /// All sequences to evaluate: block order, then permutation order.
    pub fn sequences(&self) -> Result<Vec<ReflectionSequence>, CompositionError> {
        Ok(self
            .blocks()?
            .into_iter()
            .flat_map(|block| block.orderings)
            .collect())
    }

    /// `sum(k!)` over every composition, `k` its part count. `None` on overflow.
    pub fn sequence_count(&self) -> Option<u128> {
        self.compositions()
            .iter()
            .try_fold(0u128, |acc, runs| acc.checked_add(factorial(runs.len())?))
    }
}

/// All compositions of `degree`, stably sorted by number of parts.
///
/// `degree` must be in `1..=MAX_ENUMERABLE_DEGREE`; see [`CompositionEnumerator::new`].
fn compositions(degree: usize) -> Vec<Vec<usize>> {
    let cuts = degree.saturating_sub(1);
    let mut all: Vec<Vec<usize>> = (0..1u64 << cuts)
        .map(|mask| {
            let mut runs = Vec::new();
            let mut run = 1;
            for bit in 0..cuts {
                if mask >> bit & 1 == 1 {
                    runs.push(run);
                    run = 1;
                } else {
                    run += 1;
                }
            }
            runs.push(run);
            runs
        })
        .collect();
    all.sort_by_key(Vec::len);
    all
}

/// Translate run lengths into reflections against a point of `arity` slots.
pub fn translate(runs: &[usize], arity: usize) -> Result<ReflectionSequence, CompositionError> {
    if runs.is_empty() {
        return Err(CompositionError::EmptyComposition);
    }
    if arity == 0 {
        return Err(CompositionError::UnsupportedDegree {
            degree: arity,
            max: MAX_ENUMERABLE_DEGREE,
        });
    }

    let mut steps = Vec::with_capacity(runs.len());
    let mut cursor = 1;
    for (i, &len) in runs.iter().enumerate() {
        if len == 0 {
            return Err(CompositionError::EmptyRun { run: i + 1 });
        }
        let target = cursor + len;
        if target <= arity {
            steps.push(Reflection::Swap(cursor, target));
            cursor = target;
        } else if i + 1 == runs.len() {
            steps.push(Reflection::Open(cursor));
        } else {
            return Err(CompositionError::CursorOverflow {
                run: i + 1,
                cursor: target,
                arity,
            });
        }
    }
    Ok(ReflectionSequence::new(steps))
}

/// Every ordering of `sequence`'s steps, in lexicographic order of step positions.
pub fn orderings(sequence: &ReflectionSequence) -> Vec<ReflectionSequence> {
    let steps = sequence.steps();
    let mut order: Vec<usize> = (0..steps.len()).collect();
    let mut out: Vec<ReflectionSequence> = Vec::new();
    loop {
        out.push(order.iter().map(|&i| steps[i]).collect::<Vec<_>>().into());
        if !next_permutation(&mut order) {
            break;
        }
    }
    out
}

fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = order.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(successor) = order.iter().rposition(|&x| x > order[pivot]) else {
        return false;
    };
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}

fn factorial(k: usize) -> Option<u128> {
    (1..=k as u128).try_fold(1u128, |acc, x| acc.checked_mul(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compositions_of_three() {
        assert_eq!(
            compositions(3),
            vec![vec![3], vec![1, 2], vec![2, 1], vec![1, 1, 1]]
        );
    }

    #[test]
    fn test_compositions_of_one() {
        assert_eq!(compositions(1), vec![vec![1]]);
    }

    #[test]
    fn test_next_permutation_lexicographic() {
        let mut order = vec![0, 1, 2];
        let mut seen = vec![order.clone()];
        while next_permutation(&mut order) {
            seen.push(order.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(40), None);
    }
}
