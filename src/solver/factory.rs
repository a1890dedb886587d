use crate::domain::{
    models::SolverConfig,
    solver_service::{CoverSolver, IlpBackend, Result},
    value_objects::{SolverBackend, Strategy},
};
#[cfg(not(all(feature = "coin_cbc", feature = "highs")))]
use crate::domain::solver_service::CoverError;
use crate::solver::{BranchAndBoundSolver, ExactSolver, GreedySolver, TrivialSolver};
#[cfg(feature = "coin_cbc")]
use crate::solver::CoinCbcSolver;
#[cfg(feature = "highs")]
use crate::solver::HighsSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create the cover solver selected by the configuration
    pub fn create_solver(config: &SolverConfig) -> Result<Box<dyn CoverSolver>> {
        match config.strategy {
            Strategy::Greedy => Ok(Box::new(GreedySolver::new())),
            Strategy::Trivial => Ok(Box::new(TrivialSolver::new())),
            Strategy::Exact => {
                let backend = Self::create_backend(config.backend)?;
                Ok(Box::new(ExactSolver::new(backend, config.clone())))
            }
        }
    }

    /// Create an ILP backend, failing if it is not compiled into this build
    pub fn create_backend(backend: SolverBackend) -> Result<Arc<dyn IlpBackend>> {
        match backend {
            SolverBackend::Auto => Ok(Self::default_backend()),
            SolverBackend::BranchAndBound => Ok(Arc::new(BranchAndBoundSolver::new())),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => Ok(Arc::new(CoinCbcSolver::new())),
            #[cfg(not(feature = "coin_cbc"))]
            SolverBackend::CoinCbc => Err(CoverError::SolverNotAvailable(
                "COIN-OR CBC (build with the `coin_cbc` feature)".to_string(),
            )),
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Arc::new(HighsSolver::new())),
            #[cfg(not(feature = "highs"))]
            SolverBackend::Highs => Err(CoverError::SolverNotAvailable(
                "HiGHS (build with the `highs` feature)".to_string(),
            )),
        }
    }

    /// Get the default backend: HiGHS, then CBC, then the built-in branch and bound
    pub fn default_backend() -> Arc<dyn IlpBackend> {
        #[cfg(feature = "highs")]
        {
            Arc::new(HighsSolver::new())
        }
        #[cfg(all(not(feature = "highs"), feature = "coin_cbc"))]
        {
            Arc::new(CoinCbcSolver::new())
        }
        #[cfg(not(any(feature = "highs", feature = "coin_cbc")))]
        {
            Arc::new(BranchAndBoundSolver::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_solver_per_strategy() {
        let greedy = SolverFactory::create_solver(&SolverConfig::default()).unwrap();
        assert_eq!(greedy.name(), "Greedy");
        assert!(!greedy.is_exact());

        let config = SolverConfig::default()
            .with_strategy(Strategy::Exact)
            .with_backend(SolverBackend::BranchAndBound);
        let exact = SolverFactory::create_solver(&config).unwrap();
        assert_eq!(exact.name(), "Exact (Branch and Bound)");
        assert!(exact.is_exact());
    }

    #[test]
    fn built_in_backend_always_available() {
        assert!(SolverFactory::create_backend(SolverBackend::BranchAndBound).is_ok());
        assert!(SolverFactory::create_backend(SolverBackend::Auto).is_ok());
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn missing_feature_is_reported() {
        assert!(matches!(
            SolverFactory::create_backend(SolverBackend::Highs),
            Err(CoverError::SolverNotAvailable(_))
        ));
    }
}
