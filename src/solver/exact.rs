// Exact set cover: formulate the 0/1 program, hand it to an ILP backend, read the assignment back

use crate::domain::{
    formulation::CoverProgram,
    models::{CoverSolution, ProblemInstance, SolutionVector, SolverConfig},
    solver_service::{CoverError, CoverSolver, IlpBackend, Result},
    value_objects::{Optimality, SolutionStatus},
};
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

pub struct ExactSolver {
    backend: Arc<dyn IlpBackend>,
    config: SolverConfig,
    name: String,
}

impl ExactSolver {
    pub fn new(backend: Arc<dyn IlpBackend>, config: SolverConfig) -> Self {
        let name = format!("Exact ({})", backend.name());
        Self {
            backend,
            config,
            name,
        }
    }
}

impl CoverSolver for ExactSolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<CoverSolution> {
        instance.ensure_satisfiable()?;

        let start_time = Instant::now();
        if instance.item_count() == 0 {
            let selection = SolutionVector::empty(instance.set_count());
            return CoverSolution::new(instance, selection, Optimality::Certified, self.name());
        }

        let program = CoverProgram::from_instance(instance);
        debug!(
            "Formulated {} variables, {} constraints, {} non-zeros for {}",
            program.num_variables(),
            program.num_constraints(),
            program.num_nonzeros(),
            self.backend.name()
        );

        let result = self.backend.solve_program(&program, &self.config)?;
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;

        if result.status != SolutionStatus::Optimal {
            return Err(CoverError::SolverFailed {
                backend: self.backend.name().to_string(),
                status: result.status,
            });
        }

        let solution = CoverSolution::new(
            instance,
            result.to_selection(),
            Optimality::Certified,
            self.name(),
        )?
        .with_statistics(result.nodes_explored, solve_time);
        info!(
            "{} proved optimum {} in {:.1} ms",
            self.backend.name(),
            solution.total_cost,
            solve_time
        );

        Ok(solution)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_exact(&self) -> bool {
        true
    }
}
