// Domain layer: set cover models, contracts and the ILP formulation
pub mod domain;

// Application layer: text mapping and solve orchestration
pub mod application;

// Infrastructure layer: command line and logging
pub mod infrastructure;

// Solvers: concrete implementations of CoverSolver and IlpBackend
pub mod solver;

// Re-export commonly used types
pub use domain::{
    harmonic, CandidateSet, CoverError, CoverProgram, CoverSolution, CoverSolver, IlpBackend,
    ItemId, Optimality, ProblemInstance, ProgramSolution, Result, SolutionStatus, SolutionVector,
    SolverBackend, SolverConfig, SolverStatistics, Strategy,
};

pub use application::{format_solution, parse_instance, CoverService};

pub use infrastructure::{cli, init_logging, run, CliConfig};

pub use solver::{
    BranchAndBoundSolver, ExactSolver, GreedyRun, GreedySolver, GreedyStep, SolverFactory,
    TrivialSolver,
};

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;

#[cfg(feature = "highs")]
pub use solver::HighsSolver;
