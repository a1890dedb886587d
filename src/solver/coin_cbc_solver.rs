// COIN-OR CBC backend
// Translates the sparse 0/1 program into good_lp expressions and runs CBC

use crate::domain::{
    formulation::{CoverProgram, ProgramSolution},
    models::SolverConfig,
    solver_service::{CoverError, IlpBackend, Result},
    value_objects::SolutionStatus,
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use log::debug;
use std::time::Instant;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IlpBackend for CoinCbcSolver {
    fn solve_program(
        &self,
        program: &CoverProgram,
        config: &SolverConfig,
    ) -> Result<ProgramSolution> {
        // Validate first
        self.validate(program)?;

        let start_time = Instant::now();

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = (0..program.num_variables())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut obj_expr: Expression = 0.into();
        for (&coeff, &var) in program.costs.iter().zip(&lp_variables) {
            if coeff != 0.0 {
                obj_expr += coeff * var;
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", if config.verbose { "1" } else { "0" });
        if let Some(seconds) = config.time_limit {
            lp_model.set_parameter("seconds", &seconds.to_string());
        }
        if let Some(gap) = config.gap_tolerance {
            lp_model.set_parameter("ratioGap", &gap.to_string());
        }

        for (row, &bound) in program.rows.iter().zip(&program.rhs) {
            let mut lhs: Expression = 0.into();
            for &(col, coeff) in row {
                lhs += coeff * lp_variables[col];
            }
            lp_model = lp_model.with(lhs.leq(bound));
        }

        let solution_result = lp_model.solve();
        debug!(
            "CBC finished in {:.1} ms",
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        match solution_result {
            Ok(sol) => {
                let values: Vec<f64> = lp_variables.iter().map(|&var| sol.value(var)).collect();
                let objective = program
                    .costs
                    .iter()
                    .zip(&values)
                    .map(|(c, v)| c * v)
                    .sum();

                let model = sol.model();
                let status =
                    cbc_status(model.is_proven_optimal(), model.is_seconds_limit_reached());
                if status == SolutionStatus::Optimal {
                    Ok(ProgramSolution::optimal(objective, values))
                } else {
                    let mut solution = ProgramSolution::new(status);
                    solution.objective = Some(objective);
                    solution.values = values;
                    Ok(solution)
                }
            }
            Err(ResolutionError::Infeasible) => {
                Ok(ProgramSolution::new(SolutionStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(ProgramSolution::new(SolutionStatus::Unbounded))
            }
            Err(e) => Err(CoverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}

/// Status of a run that returned an incumbent, as reported by CBC itself
fn cbc_status(proven_optimal: bool, seconds_limit_reached: bool) -> SolutionStatus {
    if proven_optimal {
        SolutionStatus::Optimal
    } else if seconds_limit_reached {
        SolutionStatus::TimeLimit
    } else {
        SolutionStatus::Feasible
    }
}
