// Cover service: load → solve → format for one instance

use super::mappers;
use crate::domain::{
    models::{CoverSolution, ProblemInstance, SolverConfig},
    solver_service::{CoverError, Result},
};
use crate::solver::SolverFactory;
use log::info;
use std::path::Path;

/// Runs one solve with the configured strategy
pub struct CoverService {
    config: SolverConfig,
}

impl CoverService {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve an already loaded instance
    pub fn solve_instance(&self, instance: &ProblemInstance) -> Result<CoverSolution> {
        let solver = SolverFactory::create_solver(&self.config)?;
        info!(
            "Solving {} items with {} sets using {}",
            instance.item_count(),
            instance.set_count(),
            solver.name()
        );

        let solution = solver.solve(instance)?;
        info!(
            "{} selected {} sets, total cost {}",
            solution.solver, solution.statistics.selected_sets, solution.total_cost
        );

        Ok(solution)
    }

    /// Parse instance text, solve it, and return the formatted output
    pub fn solve_text(&self, input: &str) -> Result<String> {
        let instance = mappers::parse_instance(input)?;
        let solution = self.solve_instance(&instance)?;
        Ok(mappers::format_solution(&solution))
    }

    /// Read an instance file and solve it
    pub fn solve_file(&self, path: &Path) -> Result<String> {
        let input = std::fs::read_to_string(path).map_err(|source| CoverError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.solve_text(&input)
    }
}

impl Default for CoverService {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
