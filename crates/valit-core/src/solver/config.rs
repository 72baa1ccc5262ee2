use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Sweep count used when the caller does not pick a horizon.
pub const DEFAULT_HORIZON: usize = 1000;

/// When value iteration stops sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Stopping {
    /// Run exactly `horizon` sweeps.
    #[default]
    FixedHorizon,
    /// Stop after the first sweep whose largest value change is below
    /// `tolerance`, or after `horizon` sweeps, whichever comes first.
    Tolerance { tolerance: f64 },
}

/// Solver configuration for value iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub discount: f64,
    pub horizon: usize,
    pub stopping: Stopping,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            discount: 1.0,
            horizon: DEFAULT_HORIZON,
            stopping: Stopping::FixedHorizon,
        }
    }
}

impl SolverConfig {
    /// Fixed-horizon configuration with the given discount and sweep count.
    pub fn new(discount: f64, horizon: usize) -> Self {
        SolverConfig {
            discount,
            horizon,
            stopping: Stopping::FixedHorizon,
        }
    }

    /// Switch to tolerance-based stopping, keeping `horizon` as the sweep cap.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.stopping = Stopping::Tolerance { tolerance };
        self
    }

    /// Parse and validate a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Read, parse and validate a solver config file.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| SolverConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Bundled `config/solver.default.yaml`.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(DEFAULT_SOLVER_CONFIG_YAML)
    }

    fn check(&self) -> Result<(), SolverConfigError> {
        if self.horizon == 0 {
            return Err(SolverConfigError::ZeroHorizon);
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(SolverConfigError::Discount(self.discount));
        }
        match self.stopping {
            Stopping::Tolerance { tolerance } if !(tolerance.is_finite() && tolerance > 0.0) => {
                Err(SolverConfigError::Tolerance(tolerance))
            }
            _ => Ok(()),
        }
    }
}

/// Failure to load a [`SolverConfig`] from YAML.
#[derive(Debug)]
pub enum SolverConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Yaml(serde_yaml::Error),
    ZeroHorizon,
    /// Discount outside `[0, 1]` (NaN included).
    Discount(f64),
    /// Tolerance that is not a positive finite number.
    Tolerance(f64),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io { path, source } => {
                write!(f, "cannot read solver config {}: {source}", path.display())
            }
            SolverConfigError::Yaml(err) => write!(f, "malformed solver config: {err}"),
            SolverConfigError::ZeroHorizon => write!(f, "solver config: horizon must be at least 1"),
            SolverConfigError::Discount(value) => {
                write!(f, "solver config: discount {value} is outside [0, 1]")
            }
            SolverConfigError::Tolerance(value) => {
                write!(f, "solver config: tolerance {value} must be positive and finite")
            }
        }
    }
}

impl std::error::Error for SolverConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverConfigError::Io { source, .. } => Some(source),
            SolverConfigError::Yaml(err) => Some(err),
            _ => None,
        }
    }
}
