// Domain value objects representing core set cover concepts

use std::fmt;
use std::str::FromStr;

/// Identifier of an item in the universe, always in `[0, item_count)`
pub type ItemId = usize;

/// Whether a selection is certified optimal or only heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimality {
    /// No optimality guarantee (greedy, trivial)
    Heuristic,
    /// Proven optimal by an exact backend
    Certified,
}

impl Optimality {
    /// Flag written on the first output line
    pub fn flag(self) -> u8 {
        match self {
            Optimality::Heuristic => 0,
            Optimality::Certified => 1,
        }
    }
}

/// Status reported by an ILP backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Found feasible solution (may not be optimal)
    Feasible,
    /// Problem has no feasible solution
    Infeasible,
    /// Objective can be improved infinitely
    Unbounded,
    /// Time limit reached
    TimeLimit,
    /// Iteration or node limit reached
    IterationLimit,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Feasible => write!(f, "Feasible"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::Unbounded => write!(f, "Unbounded"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
            SolutionStatus::IterationLimit => write!(f, "Iteration Limit Reached"),
        }
    }
}

/// Solving path used for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Ratio-greedy approximation
    #[default]
    Greedy,
    /// 0/1 integer program delegated to an ILP backend
    Exact,
    /// Index-order first fit
    Trivial,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Exact => write!(f, "exact"),
            Strategy::Trivial => write!(f, "trivial"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Strategy::Greedy),
            "exact" | "mip" => Ok(Strategy::Exact),
            "trivial" => Ok(Strategy::Trivial),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// ILP backend to use for the exact strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Best backend compiled into this build
    #[default]
    Auto,
    /// COIN-OR CBC solver
    CoinCbc,
    /// HiGHS solver
    Highs,
    /// Built-in depth-first branch and bound
    BranchAndBound,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::BranchAndBound => write!(f, "Branch and Bound"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverBackend::CoinCbc),
            "highs" => Ok(SolverBackend::Highs),
            "bnb" | "branch-and-bound" => Ok(SolverBackend::BranchAndBound),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}
