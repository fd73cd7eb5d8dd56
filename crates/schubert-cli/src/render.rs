//! Text and JSON rendering of calculation results.

use anyhow::Result;
use serde::Serialize;

use schubert_core::{Point, Relation, SignedValue, ToTex};
use schubert_explore::census::ComparabilityCensus;
use schubert_explore::Calculation;

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn calculation(calculation: &Calculation, as_json: bool) -> Result<String> {
    if as_json {
        return json(calculation);
    }
    let stats = calculation.stats;
    let mut out = format!(
        "% base {}: {} paths, {} distinct, {} maximal\n",
        calculation.base, stats.paths, stats.distinct, stats.maximal
    );
    out.push_str(&calculation.log.render());
    Ok(out)
}

pub fn points(points: &[Point], as_json: bool) -> Result<String> {
    if as_json {
        return json(points);
    }
    Ok(points.iter().map(|p| format!("{}\n", p.to_tex())).collect())
}

#[derive(Serialize)]
struct RelationReport<'a> {
    left: &'a Point,
    right: &'a Point,
    relation: Relation,
}

pub fn relation(left: &Point, right: &Point, relation: Relation, as_json: bool) -> Result<String> {
    if as_json {
        return json(&RelationReport {
            left,
            right,
            relation,
        });
    }
    let symbol = match relation {
        Relation::Less => "<",
        Relation::Equal => "=",
        Relation::Greater => ">",
        Relation::Incomparable => "<>",
    };
    Ok(format!("{left} {symbol} {right}\n"))
}

#[derive(Serialize)]
struct CensusReport<'a> {
    comparable: usize,
    incomparable: usize,
    equal: usize,
    pairs: Vec<&'a (Point, Point)>,
}

pub fn census(
    census: &ComparabilityCensus,
    leading: Option<SignedValue>,
    as_json: bool,
) -> Result<String> {
    let pairs = match leading {
        Some(value) => census.incomparable_with_leading(value),
        None => census.incomparable.iter().collect(),
    };
    if as_json {
        return json(&CensusReport {
            comparable: census.comparable(),
            incomparable: census.incomparable.len(),
            equal: census.equal,
            pairs,
        });
    }

    let mut out = format!(
        "Comparable = {}\nNot comparable = {}\n",
        census.comparable(),
        census.incomparable.len()
    );
    for (a, b) in pairs {
        out.push_str(&format!("{a} <> {b}\n"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schubert_core::parse_point;

    #[test]
    fn test_relation_text() {
        let a = parse_point("(2|1|3)").unwrap();
        let b = parse_point("(1|3|2)").unwrap();
        let text = relation(&a, &b, Relation::Incomparable, false).unwrap();
        assert_eq!(text, "(2 | 1 | 3) <> (1 | 3 | 2)\n");
    }

    #[test]
    fn test_relation_json() {
        let a = parse_point("(1)").unwrap();
        let text = relation(&a, &a, Relation::Equal, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["relation"], "Equal");
    }

    #[test]
    fn test_points_text() {
        let pts = vec![parse_point("(3b|2)").unwrap()];
        assert_eq!(points(&pts, false).unwrap(), " ( \\bar{3} \\vert 2 ) \n");
    }
}
