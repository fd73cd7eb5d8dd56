//! TeX markup for the symbolic trace.

use crate::point::{Placeholder, Point, Slot};
use crate::reflection::{Reflection, ReflectionSequence};
use crate::signed::SignedValue;

pub trait ToTex {
    fn to_tex(&self) -> String;
}

impl ToTex for SignedValue {
    fn to_tex(&self) -> String {
        if self.is_barred() {
            format!("\\bar{{{}}}", self.magnitude())
        } else {
            self.magnitude().to_string()
        }
    }
}

impl ToTex for Placeholder {
    fn to_tex(&self) -> String {
        self.to_string()
    }
}

impl ToTex for Slot {
    fn to_tex(&self) -> String {
        match self {
            Slot::Value(v) => v.to_tex(),
            Slot::Open(p) => p.to_tex(),
        }
    }
}

impl ToTex for Point {
    fn to_tex(&self) -> String {
        let body: Vec<String> = self.slots().iter().map(ToTex::to_tex).collect();
        format!(" ( {} ) ", body.join(r" \vert "))
    }
}

impl ToTex for Reflection {
    fn to_tex(&self) -> String {
        let expression = match self {
            Reflection::Swap(i, j) => format!("t_{i} - t_{j}"),
            Reflection::Open(i) => format!("t_{i} - t_k"),
        };
        format!("\\xrightarrow{{{expression}}}")
    }
}

impl ToTex for ReflectionSequence {
    fn to_tex(&self) -> String {
        self.steps()
            .iter()
            .map(ToTex::to_tex)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `x \in A^c \cup \{...\}.` listing the negations of the values the point
/// lost to opening, skipping 1̄. The union is omitted when nothing is listed.
pub fn exclusion_tex(point: &Point) -> String {
    let one_bar = SignedValue::bar(1).ok();
    let excluded: Vec<String> = point
        .displaced()
        .iter()
        .filter(|v| Some(**v) != one_bar)
        .map(|v| (-*v).to_tex())
        .collect();

    let mut tex = String::from(r"x \in A^c ");
    if !excluded.is_empty() {
        tex.push_str(r"\cup \{");
        tex.push_str(&excluded.join(","));
        tex.push_str(r"\}");
    }
    tex.push('.');
    tex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tex() {
        assert_eq!(SignedValue::plain(3).unwrap().to_tex(), "3");
        assert_eq!(SignedValue::bar(3).unwrap().to_tex(), r"\bar{3}");
    }

    #[test]
    fn test_point_tex() {
        let pt = Point::new(vec![
            SignedValue::bar(4).unwrap(),
            SignedValue::plain(2).unwrap(),
            SignedValue::plain(3).unwrap(),
        ])
        .unwrap();
        assert_eq!(pt.to_tex(), r" ( \bar{4} \vert 2 \vert 3 ) ");
    }

    #[test]
    fn test_reflection_tex() {
        assert_eq!(Reflection::Swap(1, 2).to_tex(), r"\xrightarrow{t_1 - t_2}");
        assert_eq!(Reflection::Open(3).to_tex(), r"\xrightarrow{t_3 - t_k}");
    }

    #[test]
    fn test_exclusion_tex() {
        let mut pt = Point::ascending(3).unwrap();
        assert_eq!(exclusion_tex(&pt), r"x \in A^c .");
        Reflection::Open(2).apply(&mut pt).unwrap();
        assert_eq!(exclusion_tex(&pt), r"x \in A^c \cup \{\bar{2}\}.");
    }
}
