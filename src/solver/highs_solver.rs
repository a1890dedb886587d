// HiGHS backend
// Adds one binary column per set and one row per item, then reads the column values back

use crate::domain::{
    formulation::{CoverProgram, ProgramSolution},
    models::SolverConfig,
    solver_service::{CoverError, IlpBackend, Result},
    value_objects::SolutionStatus,
};
use highs::{HighsModelStatus, RowProblem, Sense};
use log::debug;
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IlpBackend for HighsSolver {
    fn solve_program(
        &self,
        program: &CoverProgram,
        config: &SolverConfig,
    ) -> Result<ProgramSolution> {
        // Validate first
        self.validate(program)?;

        let start_time = Instant::now();

        // Use HiGHS RowProblem (add columns first, then rows)
        let mut pb = RowProblem::default();
        let cols: Vec<_> = program
            .costs
            .iter()
            .map(|&cost| pb.add_integer_column(cost, 0.0..=1.0))
            .collect();

        for (row, &bound) in program.rows.iter().zip(&program.rhs) {
            let terms: Vec<_> = row.iter().map(|&(col, coeff)| (cols[col], coeff)).collect();
            pb.add_row(..=bound, &terms);
        }

        let mut model = pb.optimise(Sense::Minimise);
        model.set_option("output_flag", config.verbose);
        if let Some(seconds) = config.time_limit {
            model.set_option("time_limit", seconds);
        }
        if let Some(gap) = config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model.solve();
        debug!(
            "HiGHS finished in {:.1} ms",
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        let read_values = || -> (f64, Vec<f64>) {
            let values = solved.get_solution().columns().to_vec();
            let objective = program
                .costs
                .iter()
                .zip(&values)
                .map(|(c, v)| c * v)
                .sum();
            (objective, values)
        };

        match solved.status() {
            HighsModelStatus::Optimal => {
                let (objective, values) = read_values();
                Ok(ProgramSolution::optimal(objective, values))
            }
            HighsModelStatus::ReachedTimeLimit => {
                Ok(ProgramSolution::new(SolutionStatus::TimeLimit))
            }
            HighsModelStatus::ReachedIterationLimit => {
                Ok(ProgramSolution::new(SolutionStatus::IterationLimit))
            }
            HighsModelStatus::Infeasible => Ok(ProgramSolution::new(SolutionStatus::Infeasible)),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Ok(ProgramSolution::new(SolutionStatus::Unbounded))
            }
            status => Err(CoverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
