//! Fixed-arity points over signed values, their partial order, and the
//! resolution of indeterminate slots.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::signed::SignedValue;

/// Marker for a slot whose value is decided later by [`Point::resolve`].
///
/// Identity follows the order in which slots of one point were opened,
/// not their positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Placeholder {
    First,
    Second,
}

impl Placeholder {
    /// The placeholder handed out when `open` slots are already indeterminate.
    pub fn nth(open: usize) -> Option<Self> {
        match open {
            0 => Some(Placeholder::First),
            1 => Some(Placeholder::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::First => write!(f, "x"),
            Placeholder::Second => write!(f, "y"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Value(SignedValue),
    Open(Placeholder),
}

impl Slot {
    pub fn value(&self) -> Option<SignedValue> {
        match self {
            Slot::Value(v) => Some(*v),
            Slot::Open(_) => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Slot::Open(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(v) => write!(f, "{v}"),
            Slot::Open(p) => write!(f, "{p}"),
        }
    }
}

/// Outcome of comparing two determinate points of equal arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Less,
    Equal,
    Greater,
    Incomparable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    #[error("a point needs at least one slot")]
    EmptyPoint,

    #[error(
        "cannot compare points: arities {left_arity} and {right_arity}, \
         determinate {left_determinate} and {right_determinate}"
    )]
    IncompatibleComparison {
        left_arity: usize,
        right_arity: usize,
        left_determinate: bool,
        right_determinate: bool,
    },

    #[error("no unused candidate value left to resolve a point of arity {arity}")]
    ResolutionExhausted { arity: usize },

    #[error("placeholder {placeholder} appears in more than one slot")]
    DuplicatePlaceholder { placeholder: Placeholder },
}

/// A fixed-arity tuple of slots.
///
/// Equality and hashing look at slot contents only; the record of values
/// displaced by opening is carried along for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PointRepr")]
pub struct Point {
    slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    displaced: Vec<SignedValue>,
}

impl Point {
    pub fn new(values: Vec<SignedValue>) -> Result<Self, PointError> {
        Self::from_slots(values.into_iter().map(Slot::Value).collect())
    }

    /// Fails on an empty slot list or a placeholder used twice.
    pub fn from_slots(slots: Vec<Slot>) -> Result<Self, PointError> {
        if slots.is_empty() {
            return Err(PointError::EmptyPoint);
        }
        let mut seen = Vec::with_capacity(2);
        for slot in &slots {
            if let Slot::Open(placeholder) = *slot {
                if seen.contains(&placeholder) {
                    return Err(PointError::DuplicatePlaceholder { placeholder });
                }
                seen.push(placeholder);
            }
        }
        Ok(Self {
            slots,
            displaced: Vec::new(),
        })
    }

    /// The canonical base point `(1, 2, ..., arity)`.
    pub fn ascending(arity: u32) -> Result<Self, PointError> {
        let values = (1..=arity)
            .filter_map(NonZeroU32::new)
            .map(|m| SignedValue::from_nonzero(m, false))
            .collect();
        Self::new(values)
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Values removed from the point by opening slots, in the order they were removed.
    pub fn displaced(&self) -> &[SignedValue] {
        &self.displaced
    }

    /// All slot values, or `None` while any slot is open.
    pub fn values(&self) -> Option<Vec<SignedValue>> {
        self.slots.iter().map(Slot::value).collect()
    }

    pub fn is_determinate(&self) -> bool {
        !self.slots.iter().any(Slot::is_open)
    }

    pub fn indeterminate_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_open()).count()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub(crate) fn record_displaced(&mut self, value: SignedValue) {
        self.displaced.push(value);
    }

    /// Concatenation of every prefix sorted ascending: first slot, first two
    /// sorted, ..., all slots sorted. Length `arity * (arity + 1) / 2`.
    ///
    /// `None` for indeterminate points.
    pub fn comparison_vector(&self) -> Option<Vec<SignedValue>> {
        let values = self.values()?;
        let arity = values.len();
        let mut vector = Vec::with_capacity(arity * (arity + 1) / 2);
        for prefix_len in 1..=arity {
            let mut prefix = values[..prefix_len].to_vec();
            prefix.sort();
            vector.extend(prefix);
        }
        Some(vector)
    }

    /// Compare under the prefix-sorted partial order.
    ///
    /// Fails unless both points are determinate and share an arity.
    pub fn compare(&self, other: &Point) -> Result<Relation, PointError> {
        let (left, right) = match (self.comparison_vector(), other.comparison_vector()) {
            (Some(l), Some(r)) if self.arity() == other.arity() => (l, r),
            _ => {
                return Err(PointError::IncompatibleComparison {
                    left_arity: self.arity(),
                    right_arity: other.arity(),
                    left_determinate: self.is_determinate(),
                    right_determinate: other.is_determinate(),
                })
            }
        };

        if self == other {
            return Ok(Relation::Equal);
        }
        let le = left.iter().zip(&right).all(|(a, b)| a <= b);
        let ge = left.iter().zip(&right).all(|(a, b)| a >= b);
        Ok(match (le, ge) {
            (true, false) => Relation::Less,
            (false, true) => Relation::Greater,
            // Equal vectors only come from equal points.
            (true, true) => Relation::Equal,
            (false, false) => Relation::Incomparable,
        })
    }

    /// `self <= other`.
    pub fn le(&self, other: &Point) -> Result<bool, PointError> {
        Ok(matches!(
            self.compare(other)?,
            Relation::Less | Relation::Equal
        ))
    }

    /// `self < other`: below `other` and not equal to it.
    pub fn lt(&self, other: &Point) -> Result<bool, PointError> {
        Ok(self.compare(other)? == Relation::Less)
    }

    /// Assign values to every open slot. No-op on determinate points.
    ///
    /// Candidates are the barred values `2̄, 3̄, ..., (arity+1)̄` in that order,
    /// minus every determinate slot value and its negation. Open slots are
    /// filled in placeholder order (`First` before `Second`) by a single scan
    /// over the candidates, so the second placeholder always receives a
    /// candidate later than the first.
    pub fn resolve(&mut self) -> Result<(), PointError> {
        if self.is_determinate() {
            return Ok(());
        }
        let arity = self.arity();

        let mut open: Vec<(usize, Placeholder)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                Slot::Open(p) => Some((i, *p)),
                Slot::Value(_) => None,
            })
            .collect();
        open.sort_by_key(|&(_, p)| p);

        let blacklist: HashSet<SignedValue> = self
            .slots
            .iter()
            .filter_map(Slot::value)
            .flat_map(|v| [v, -v])
            .collect();

        let top = u32::try_from(arity + 1).map_err(|_| PointError::ResolutionExhausted { arity })?;
        let mut candidates = (2..=top)
            .filter_map(NonZeroU32::new)
            .map(|m| SignedValue::from_nonzero(m, true))
            .filter(|v| !blacklist.contains(v));

        for (index, _) in open {
            let value = candidates
                .next()
                .ok_or(PointError::ResolutionExhausted { arity })?;
            self.slots[index] = Slot::Value(value);
        }
        Ok(())
    }
}

/// Wire form of [`Point`]; deserialised points go through [`Point::from_slots`].
#[derive(Deserialize)]
struct PointRepr {
    slots: Vec<Slot>,
    #[serde(default)]
    displaced: Vec<SignedValue>,
}

impl TryFrom<PointRepr> for Point {
    type Error = PointError;

    fn try_from(repr: PointRepr) -> Result<Self, Self::Error> {
        let mut point = Point::from_slots(repr.slots)?;
        point.displaced = repr.displaced;
        Ok(point)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

/// Renders the textual notation, e.g. `(1 | 2b | 3)`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(m: u32) -> SignedValue {
        SignedValue::plain(m).unwrap()
    }

    fn b(m: u32) -> SignedValue {
        SignedValue::bar(m).unwrap()
    }

    fn point(values: &[SignedValue]) -> Point {
        Point::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_point_rejected() {
        assert_eq!(Point::new(vec![]), Err(PointError::EmptyPoint));
    }

    #[test]
    fn test_ascending_base_point() {
        let base = Point::ascending(3).unwrap();
        assert_eq!(base, point(&[p(1), p(2), p(3)]));
        assert!(base.is_determinate());
    }

    #[test]
    fn test_comparison_vector_layout() {
        let pt = point(&[p(3), p(1), p(2)]);
        let vector = pt.comparison_vector().unwrap();
        assert_eq!(vector, vec![p(3), p(1), p(3), p(1), p(2), p(3)]);
    }

    #[test]
    fn test_comparison_vector_length() {
        let pt = Point::ascending(5).unwrap();
        assert_eq!(pt.comparison_vector().unwrap().len(), 15);
    }

    #[test]
    fn test_prefix_sorted_incomparable() {
        // [2,1,2,1,2,3] vs [1,1,3,1,2,3]: first component up, third down.
        let a = point(&[p(2), p(1), p(3)]);
        let c = point(&[p(1), p(3), p(2)]);
        assert_eq!(a.compare(&c).unwrap(), Relation::Incomparable);
        assert_eq!(c.compare(&a).unwrap(), Relation::Incomparable);
    }

    #[test]
    fn test_repeated_values_compare_by_prefix_vectors() {
        // [2,1,2,1,1,2] dominates [1,1,1,1,1,2] in every component.
        let a = point(&[p(2), p(1), p(1)]);
        let c = point(&[p(1), p(1), p(2)]);
        assert_eq!(a.compare(&c).unwrap(), Relation::Greater);
        assert_eq!(c.compare(&a).unwrap(), Relation::Less);
    }

    #[test]
    fn test_less_and_greater() {
        let low = point(&[p(1), p(2), p(3)]);
        let high = point(&[b(4), p(2), p(3)]);
        assert_eq!(low.compare(&high).unwrap(), Relation::Less);
        assert_eq!(high.compare(&low).unwrap(), Relation::Greater);
        assert!(low.lt(&high).unwrap());
        assert!(!high.lt(&low).unwrap());
    }

    #[test]
    fn test_largest_magnitudes_compare_strictly() {
        let plain = point(&[p(u32::MAX)]);
        let barred = point(&[b(u32::MAX)]);
        assert_eq!(plain.compare(&barred).unwrap(), Relation::Less);
        assert_eq!(barred.compare(&plain).unwrap(), Relation::Greater);
    }

    #[test]
    fn test_equal_is_reflexive() {
        let pt = point(&[b(2), p(1)]);
        assert_eq!(pt.compare(&pt).unwrap(), Relation::Equal);
        assert!(pt.le(&pt).unwrap());
        assert!(!pt.lt(&pt).unwrap());
    }

    #[test]
    fn test_compare_different_arity_fails() {
        let a = Point::ascending(2).unwrap();
        let c = Point::ascending(3).unwrap();
        assert!(matches!(
            a.compare(&c),
            Err(PointError::IncompatibleComparison { left_arity: 2, right_arity: 3, .. })
        ));
    }

    #[test]
    fn test_compare_indeterminate_fails() {
        let a = Point::from_slots(vec![Slot::Open(Placeholder::First), Slot::Value(p(2))]).unwrap();
        let c = Point::ascending(2).unwrap();
        let err = c.compare(&a).unwrap_err();
        assert_eq!(
            err,
            PointError::IncompatibleComparison {
                left_arity: 2,
                right_arity: 2,
                left_determinate: true,
                right_determinate: false,
            }
        );
    }

    #[test]
    fn test_resolve_single_open_slot() {
        let mut pt = Point::from_slots(vec![
            Slot::Open(Placeholder::First),
            Slot::Value(p(2)),
            Slot::Value(p(3)),
        ])
        .unwrap();
        pt.resolve().unwrap();
        assert_eq!(pt, point(&[b(4), p(2), p(3)]));
    }

    #[test]
    fn test_resolve_arity_one() {
        let mut pt = Point::from_slots(vec![Slot::Open(Placeholder::First)]).unwrap();
        pt.resolve().unwrap();
        assert_eq!(pt, point(&[b(2)]));
    }

    #[test]
    fn test_resolve_follows_placeholder_order_not_position() {
        // Second sits left of First: First still takes the earlier candidate.
        let mut pt = Point::from_slots(vec![
            Slot::Open(Placeholder::Second),
            Slot::Value(p(1)),
            Slot::Open(Placeholder::First),
        ])
        .unwrap();
        pt.resolve().unwrap();
        assert_eq!(pt, point(&[b(3), p(1), b(2)]));
    }

    #[test]
    fn test_resolve_two_slots_never_share_a_value() {
        let mut pt = Point::from_slots(vec![
            Slot::Value(b(2)),
            Slot::Open(Placeholder::First),
            Slot::Open(Placeholder::Second),
            Slot::Value(p(4)),
        ])
        .unwrap();
        pt.resolve().unwrap();
        // Pool 2b 3b 4b 5b minus {2, 2b, 4, 4b}.
        assert_eq!(pt, point(&[b(2), b(3), b(5), p(4)]));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut pt = point(&[p(2), b(1)]);
        let before = pt.clone();
        pt.resolve().unwrap();
        assert_eq!(pt, before);
    }

    #[test]
    fn test_equality_ignores_displaced() {
        let mut a = point(&[p(1), p(2)]);
        a.record_displaced(p(3));
        assert_eq!(a, point(&[p(1), p(2)]));
    }

    #[test]
    fn test_placeholder_equality_by_kind() {
        let a = Point::from_slots(vec![Slot::Open(Placeholder::First)]).unwrap();
        let c = Point::from_slots(vec![Slot::Open(Placeholder::Second)]).unwrap();
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_duplicate_placeholder_rejected() {
        let slots = vec![Slot::Open(Placeholder::First), Slot::Open(Placeholder::First)];
        assert_eq!(
            Point::from_slots(slots),
            Err(PointError::DuplicatePlaceholder {
                placeholder: Placeholder::First
            })
        );
    }

    #[test]
    fn test_deserialize_validates_slots() {
        let empty = serde_json::from_str::<Point>(r#"{"slots":[]}"#);
        assert!(empty.is_err());

        let doubled = r#"{"slots":[{"Open":"First"},{"Open":"First"}]}"#;
        assert!(serde_json::from_str::<Point>(doubled).is_err());
    }

    #[test]
    fn test_json_keeps_displaced_values() {
        let mut pt = Point::from_slots(vec![Slot::Open(Placeholder::First), Slot::Value(p(2))]).unwrap();
        pt.record_displaced(p(1));
        let json = serde_json::to_string(&pt).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pt);
        assert_eq!(back.displaced(), &[p(1)]);
    }

    #[test]
    fn test_display_notation() {
        let pt = Point::from_slots(vec![
            Slot::Value(p(1)),
            Slot::Value(b(2)),
            Slot::Open(Placeholder::First),
        ])
        .unwrap();
        assert_eq!(pt.to_string(), "(1 | 2b | x)");
    }
}
