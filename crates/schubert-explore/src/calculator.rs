//! Reflection calculator: apply every path to the base point, resolve the
//! indeterminate results, and keep the maximal points.
//!
//! The phases are encoded in types and consume their input, so they can only
//! run in order: [`AppliedPaths`] -> [`ResolvedPoints`] -> maximal points.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use schubert_core::{
    exclusion_tex, Point, PointError, ReflectionError, ReflectionSequence, ToTex,
};

use crate::composition::{CompositionBlock, CompositionEnumerator, CompositionError};
use crate::config::CalculatorConfig;
use crate::maximal::maximal_points;
use crate::trace::{CalculationLog, Phase};

/// Errors during a calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("reflection error: {0}")]
    Reflection(#[from] ReflectionError),

    #[error("point error: {0}")]
    Point(#[from] PointError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStats {
    /// Reflection sequences applied.
    pub paths: usize,
    /// Points left after resolution and deduplication.
    pub distinct: usize,
    /// Points in the maximal antichain.
    pub maximal: usize,
}

/// Result of a full calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    /// The point every path started from.
    pub base: Point,
    /// Resolved, deduplicated points in first-seen order.
    pub distinct: Vec<Point>,
    /// The antichain of maximal points, a subsequence of `distinct`.
    pub maximal: Vec<Point>,
    /// Path, distinct and maximal counts.
    pub stats: CalculationStats,
    /// Plan, apply, resolve and maximal trace lines in recording order.
    pub log: CalculationLog,
}

/// Owns a base point and evaluates reflection paths against it.
#[derive(Debug, Clone)]
pub struct ReflectionCalculator {
    base: Point,
    config: CalculatorConfig,
}

impl ReflectionCalculator {
    pub fn new(base: Point, config: CalculatorConfig) -> Self {
        Self { base, config }
    }

    /// Calculator over the base point `(1, 2, ..., degree)`.
    pub fn for_degree(degree: usize, config: CalculatorConfig) -> Result<Self, CalculationError> {
        check_degree(degree, &config)?;
        let arity = u32::try_from(degree).map_err(|_| unsupported(degree, &config))?;
        Ok(Self::new(Point::ascending(arity)?, config))
    }

    pub fn base(&self) -> &Point {
        &self.base
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Evaluate every composition of the base point's arity.
    pub fn calculate_all(&self) -> Result<Calculation, CalculationError> {
        let degree = self.base.arity();
        check_degree(degree, &self.config)?;
        let blocks = CompositionEnumerator::new(degree)?.blocks()?;
        self.run_blocks(blocks)
    }

    /// Evaluate the orderings of a single caller-supplied composition.
    ///
    /// The run total may exceed the arity; only the last run may carry the
    /// cursor past it.
    pub fn calculate_composition(&self, runs: &[usize]) -> Result<Calculation, CalculationError> {
        let block = CompositionBlock::new(runs.to_vec(), self.base.arity())?;
        self.run_blocks(vec![block])
    }

    /// Evaluate an explicit list of reflection sequences, as given.
    pub fn calculate_plan(
        &self,
        plan: &[ReflectionSequence],
    ) -> Result<Calculation, CalculationError> {
        self.run(plan, CalculationLog::new())
    }

    fn run_blocks(&self, blocks: Vec<CompositionBlock>) -> Result<Calculation, CalculationError> {
        let mut log = CalculationLog::new();
        for block in &blocks {
            let runs: Vec<String> = block.runs.iter().map(ToString::to_string).collect();
            log.record(
                Phase::Plan,
                format!(
                    "({}) \\mapsto {} \\quad ({} orderings)",
                    runs.join(", "),
                    block.sequence.to_tex(),
                    block.orderings.len()
                ),
            );
        }
        debug!(compositions = blocks.len(), "planned composition blocks");

        let sequences: Vec<ReflectionSequence> =
            blocks.into_iter().flat_map(|b| b.orderings).collect();
        self.run(&sequences, log)
    }

    fn run(
        &self,
        sequences: &[ReflectionSequence],
        mut log: CalculationLog,
    ) -> Result<Calculation, CalculationError> {
        let applied = AppliedPaths::apply(&self.base, sequences, &self.config, &mut log)?;
        let resolved = applied.resolve(&mut log)?;
        let distinct = resolved.points().to_vec();
        let maximal = resolved.maximal(&mut log)?;

        let stats = CalculationStats {
            paths: sequences.len(),
            distinct: distinct.len(),
            maximal: maximal.len(),
        };
        info!(
            base = %self.base,
            paths = stats.paths,
            distinct = stats.distinct,
            maximal = stats.maximal,
            "calculation complete"
        );

        Ok(Calculation {
            base: self.base.clone(),
            distinct,
            maximal,
            stats,
            log,
        })
    }
}

fn unsupported(degree: usize, config: &CalculatorConfig) -> CompositionError {
    CompositionError::UnsupportedDegree {
        degree,
        max: config.max_degree,
    }
}

fn check_degree(degree: usize, config: &CalculatorConfig) -> Result<(), CompositionError> {
    if degree == 0 || degree > config.max_degree {
        return Err(unsupported(degree, config));
    }
    Ok(())
}

/// Apply phase output: one point per path, duplicates and open slots included.
#[derive(Debug, Clone, Default)]
pub struct AppliedPaths {
    points: Vec<Point>,
}

impl AppliedPaths {
    /// Apply each sequence to its own copy of `base`. Results keep sequence order
    /// whether or not the rayon pool is used.
    pub fn apply(
        base: &Point,
        sequences: &[ReflectionSequence],
        config: &CalculatorConfig,
        log: &mut CalculationLog,
    ) -> Result<Self, ReflectionError> {
        let points: Vec<Point> = if config.parallel_apply {
            sequences
                .par_iter()
                .map(|seq| seq.applied_to(base))
                .collect::<Result<_, _>>()?
        } else {
            sequences
                .iter()
                .map(|seq| seq.applied_to(base))
                .collect::<Result<_, _>>()?
        };
        debug!(
            paths = points.len(),
            parallel = config.parallel_apply,
            "applied reflection sequences"
        );

        if config.trace_paths {
            let base_tex = base.to_tex();
            for (seq, point) in sequences.iter().zip(&points) {
                log.record(
                    Phase::Apply,
                    format!("{base_tex}{}{}", seq.to_tex(), point.to_tex()),
                );
            }
        }
        Ok(Self { points })
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Resolve every point and drop those equal to one already kept.
    pub fn resolve(self, log: &mut CalculationLog) -> Result<ResolvedPoints, PointError> {
        let mut kept = Vec::new();
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        for mut point in self.points {
            let before = (!point.is_determinate()).then(|| point.to_tex());
            point.resolve()?;
            if !seen.insert(point.clone()) {
                duplicates += 1;
                continue;
            }
            if let Some(before) = before {
                log.record(
                    Phase::Resolve,
                    format!(
                        "{before} \\mapsto {} \\quad {}",
                        point.to_tex(),
                        exclusion_tex(&point)
                    ),
                );
            }
            kept.push(point);
        }

        log.record(
            Phase::Resolve,
            format!("% {} distinct points, {duplicates} duplicates dropped", kept.len()),
        );
        debug!(kept = kept.len(), duplicates, "resolved applied points");
        Ok(ResolvedPoints { points: kept })
    }
}

/// Resolve phase output: determinate and pairwise distinct.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPoints {
    points: Vec<Point>,
}

impl ResolvedPoints {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn maximal(self, log: &mut CalculationLog) -> Result<Vec<Point>, PointError> {
        let maximal = maximal_points(&self.points)?;
        for point in &maximal {
            log.record(Phase::Maximal, point.to_tex());
        }
        debug!(
            candidates = self.points.len(),
            maximal = maximal.len(),
            "filtered maximal points"
        );
        Ok(maximal)
    }
}
