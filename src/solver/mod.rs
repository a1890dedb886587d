// Solvers: greedy and trivial selectors, the exact solver and its ILP backends

pub mod branch_and_bound;
#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
pub mod exact;
pub mod factory;
pub mod greedy;
#[cfg(feature = "highs")]
pub mod highs_solver;
pub mod trivial;

pub use branch_and_bound::BranchAndBoundSolver;
#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use exact::ExactSolver;
pub use factory::SolverFactory;
pub use greedy::{GreedyRun, GreedySolver, GreedyStep};
#[cfg(feature = "highs")]
pub use highs_solver::HighsSolver;
pub use trivial::TrivialSolver;
