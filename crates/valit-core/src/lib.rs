mod solver;

pub use solver::config::{DEFAULT_HORIZON, SolverConfig, SolverConfigError, Stopping};
pub use solver::engine::{Solver, value_iteration};
pub use solver::error::{SolveError, SolverError};
pub use solver::ids::{ActionIndex, StateIndex};
pub use solver::metrics::{SolveMetrics, SweepMetrics};
pub use solver::model::{FnModel, MdpModel};
pub use solver::solution::Solution;
