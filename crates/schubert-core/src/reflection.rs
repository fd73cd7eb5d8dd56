//! Elementary reflections applied in place to a [`Point`].
//!
//! Indices are 1-based: `Swap(1, 2)` exchanges the first two slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::point::{Placeholder, Point, Slot};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectionError {
    #[error("slot index {index} out of range for arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },

    #[error("swap of slot {index} with itself")]
    SelfSwap { index: usize },

    #[error("cannot open slot {index}: point already has two open slots")]
    TooManyPlaceholders { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reflection {
    /// `t_i - t_j`: exchange slots `i` and `j`.
    Swap(usize, usize),
    /// `t_i - t_k` against an index beyond the arity: slot `i` becomes
    /// indeterminate.
    Open(usize),
}

impl Reflection {
    pub fn apply(&self, point: &mut Point) -> Result<(), ReflectionError> {
        match *self {
            Reflection::Swap(i, j) => {
                let (a, b) = (slot_index(point, i)?, slot_index(point, j)?);
                if a == b {
                    return Err(ReflectionError::SelfSwap { index: i });
                }
                point.slots_mut().swap(a, b);
            }
            Reflection::Open(i) => {
                let index = slot_index(point, i)?;
                let current = point.slots()[index];
                // Reopening an open slot keeps its placeholder.
                if let Slot::Value(value) = current {
                    let placeholder = Placeholder::nth(point.indeterminate_count())
                        .ok_or(ReflectionError::TooManyPlaceholders { index: i })?;
                    point.slots_mut()[index] = Slot::Open(placeholder);
                    point.record_displaced(value);
                }
            }
        }
        Ok(())
    }

    /// Largest slot index this reflection touches.
    pub fn max_index(&self) -> usize {
        match *self {
            Reflection::Swap(i, j) => i.max(j),
            Reflection::Open(i) => i,
        }
    }
}

fn slot_index(point: &Point, index: usize) -> Result<usize, ReflectionError> {
    if index == 0 || index > point.arity() {
        return Err(ReflectionError::IndexOutOfRange {
            index,
            arity: point.arity(),
        });
    }
    Ok(index - 1)
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reflection::Swap(i, j) => write!(f, "t{i}-t{j}"),
            Reflection::Open(i) => write!(f, "t{i}-tk"),
        }
    }
}

/// An ordered list of reflections: one path through the search space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReflectionSequence {
    steps: Vec<Reflection>,
}

impl ReflectionSequence {
    pub fn new(steps: Vec<Reflection>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Reflection] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step in order to `point`.
    pub fn apply(&self, point: &mut Point) -> Result<(), ReflectionError> {
        self.steps.iter().try_for_each(|step| step.apply(point))
    }

    /// Apply to a fresh copy of `base`, leaving `base` untouched.
    pub fn applied_to(&self, base: &Point) -> Result<Point, ReflectionError> {
        let mut point = base.clone();
        self.apply(&mut point)?;
        Ok(point)
    }
}

impl From<Vec<Reflection>> for ReflectionSequence {
    fn from(steps: Vec<Reflection>) -> Self {
        Self::new(steps)
    }
}

impl fmt::Display for ReflectionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
