//! Signed values, points under the prefix-sorted partial order, and the
//! reflections that act on them.

pub mod parse;
pub mod point;
pub mod reflection;
pub mod signed;
pub mod tex;

pub use parse::{parse_point, parse_value, ParseError};
pub use point::{Placeholder, Point, PointError, Relation, Slot};
pub use reflection::{Reflection, ReflectionError, ReflectionSequence};
pub use signed::{SignedValue, ValueError, BAR_MARKER};
pub use tex::{exclusion_tex, ToTex};
