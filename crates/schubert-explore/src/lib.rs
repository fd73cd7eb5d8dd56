pub mod calculator;
pub mod census;
pub mod composition;
pub mod config;
pub mod maximal;
pub mod trace;

pub use calculator::{
    AppliedPaths, Calculation, CalculationError, CalculationStats, ReflectionCalculator,
    ResolvedPoints,
};
pub use composition::{CompositionBlock, CompositionEnumerator, CompositionError};
pub use config::{CalculatorConfig, ConfigError};
pub use maximal::{dedup_points, maximal_points};
pub use trace::{CalculationLog, LogEntry, Phase};
