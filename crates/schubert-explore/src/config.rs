//! Calculator configuration: degree ceiling, apply parallelism, trace verbosity.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a [`ReflectionCalculator`](crate::calculator::ReflectionCalculator).
///
/// Missing fields fall back to the defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Largest degree accepted for full enumeration. The path count grows
    /// roughly factorially: degree 8 yields 95,901 paths, degree 10 about 8.9 million.
    pub max_degree: usize,
    /// Apply reflection sequences on the rayon pool. Output order is unchanged.
    pub parallel_apply: bool,
    /// Record one trace line per applied path.
    pub trace_paths: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_degree: 8,
            parallel_apply: true,
            trace_paths: true,
        }
    }
}

impl CalculatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(CalculatorConfig::from_json("{}").unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = CalculatorConfig::from_json(r#"{ "max_degree": 5, "trace_paths": false }"#).unwrap();
        assert_eq!(config.max_degree, 5);
        assert!(!config.trace_paths);
        assert!(config.parallel_apply);
    }

    #[test]
    fn test_invalid_json() {
        assert!(CalculatorConfig::from_json("not json").is_err());
    }
}
