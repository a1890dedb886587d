// Domain service interfaces for solving set cover instances
// Concrete solvers and ILP backends implement these contracts so they stay interchangeable

use super::formulation::{CoverProgram, ProgramSolution};
use super::models::{CoverSolution, ProblemInstance, SolverConfig};
use super::value_objects::{ItemId, SolutionStatus};

/// Error types for loading and solving
#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("Unsatisfiable instance: item {item} is not covered by any set")]
    Unsatisfiable { item: ItemId },

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("{backend} finished with status: {status}")]
    SolverFailed {
        backend: String,
        status: SolutionStatus,
    },

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CoverError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CoverError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoverError>;

/// Contract for anything that turns an instance into a verified cover
pub trait CoverSolver: Send + Sync {
    /// Solve one instance
    fn solve(&self, instance: &ProblemInstance) -> Result<CoverSolution>;

    /// Get the name of this solver
    fn name(&self) -> &str;

    /// Whether results are certified optimal
    fn is_exact(&self) -> bool;
}

/// Contract for 0/1 integer program backends
///
/// Backends receive a `CoverProgram` in `A·x <= b` form with every variable
/// binary, and report the assignment plus a status. They know nothing about
/// set cover.
pub trait IlpBackend: Send + Sync {
    /// Solve a 0/1 program
    fn solve_program(&self, program: &CoverProgram, config: &SolverConfig)
        -> Result<ProgramSolution>;

    /// Validate a program without solving it
    fn validate(&self, program: &CoverProgram) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = program.num_variables();

        if program.rhs.len() != program.rows.len() {
            errors.push(format!(
                "{} rows but {} right-hand sides",
                program.rows.len(),
                program.rhs.len()
            ));
        }

        if let Some(i) = program.costs.iter().position(|c| !c.is_finite()) {
            errors.push(format!("Objective coefficient {} is not finite", i));
        }

        for (r, row) in program.rows.iter().enumerate() {
            for &(col, coeff) in row {
                if col >= num_vars {
                    errors.push(format!(
                        "Row {} references column {} but program has {} variables",
                        r, col, num_vars
                    ));
                }
                if !coeff.is_finite() {
                    errors.push(format!("Row {} has non-finite coefficient", r));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this backend
    fn name(&self) -> &str;
}
