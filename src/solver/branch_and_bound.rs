// Built-in 0/1 backend: depth-first branch and bound over the A·x <= b program
// Needs no native library, intended for small programs

use crate::domain::{
    formulation::{CoverProgram, ProgramSolution, FEASIBILITY_TOLERANCE},
    models::SolverConfig,
    solver_service::{CoverError, IlpBackend, Result},
    value_objects::SolutionStatus,
};
use log::debug;
use std::time::{Duration, Instant};

/// Column limit used by `BranchAndBoundSolver::new`
pub const DEFAULT_MAX_VARIABLES: usize = 32;

pub struct BranchAndBoundSolver {
    max_variables: usize,
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }

    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable search state shared by the recursion
struct Search<'a> {
    program: &'a CoverProgram,
    /// `(row, coefficient)` entries per column
    columns: Vec<Vec<(usize, f64)>>,
    /// Sum of the negative costs of columns `k..`, a lower bound on what is left to add
    negative_suffix: Vec<f64>,
    /// Contribution of the fixed columns per row
    fixed_lhs: Vec<f64>,
    /// Smallest contribution the free columns can still make per row
    free_min: Vec<f64>,
    assignment: Vec<bool>,
    best: Option<(f64, Vec<bool>)>,
    gap: f64,
    deadline: Option<Instant>,
    timed_out: bool,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(program: &'a CoverProgram, config: &SolverConfig) -> Self {
        let n = program.num_variables();
        let m = program.num_constraints();

        let mut columns = vec![Vec::new(); n];
        let mut free_min = vec![0.0; m];
        for (r, row) in program.rows.iter().enumerate() {
            for &(col, coeff) in row {
                columns[col].push((r, coeff));
                free_min[r] += coeff.min(0.0);
            }
        }

        let mut negative_suffix = vec![0.0; n + 1];
        for k in (0..n).rev() {
            negative_suffix[k] = negative_suffix[k + 1] + program.costs[k].min(0.0);
        }

        Self {
            program,
            columns,
            negative_suffix,
            fixed_lhs: vec![0.0; m],
            free_min,
            assignment: vec![false; n],
            best: None,
            gap: config.gap_tolerance.unwrap_or(0.0).max(0.0),
            deadline: config
                .time_limit
                .filter(|secs| secs.is_finite())
                .and_then(|secs| Duration::try_from_secs_f64(secs.max(0.0)).ok())
                .and_then(|limit| Instant::now().checked_add(limit)),
            timed_out: false,
            nodes: 0,
        }
    }

    fn row_feasible(&self, row: usize) -> bool {
        self.fixed_lhs[row] + self.free_min[row] <= self.program.rhs[row] + FEASIBILITY_TOLERANCE
    }

    fn all_rows_feasible(&self) -> bool {
        (0..self.program.num_constraints()).all(|r| self.row_feasible(r))
    }

    /// Fix column `col` to `value`, returning whether its rows stay satisfiable
    fn fix(&mut self, col: usize, value: bool) -> bool {
        self.assignment[col] = value;
        let mut feasible = true;
        for i in 0..self.columns[col].len() {
            let (r, coeff) = self.columns[col][i];
            self.free_min[r] -= coeff.min(0.0);
            if value {
                self.fixed_lhs[r] += coeff;
            }
            feasible &= self.row_feasible(r);
        }
        feasible
    }

    fn unfix(&mut self, col: usize) {
        let value = self.assignment[col];
        for &(r, coeff) in &self.columns[col] {
            self.free_min[r] += coeff.min(0.0);
            if value {
                self.fixed_lhs[r] -= coeff;
            }
        }
        self.assignment[col] = false;
    }

    fn pruned(&self, bound: f64) -> bool {
        match &self.best {
            Some((best, _)) => bound >= best - self.gap * best.abs() - FEASIBILITY_TOLERANCE,
            None => false,
        }
    }

    fn explore(&mut self, depth: usize, cost: f64) {
        self.nodes += 1;
        if self.timed_out {
            return;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return;
            }
        }
        if self.pruned(cost + self.negative_suffix[depth]) {
            return;
        }
        if depth == self.program.num_variables() {
            self.best = Some((cost, self.assignment.clone()));
            return;
        }

        let col_cost = self.program.costs[depth];
        for value in [true, false] {
            if self.fix(depth, value) {
                let next = if value { cost + col_cost } else { cost };
                self.explore(depth + 1, next);
            }
            self.unfix(depth);
        }
    }
}

impl IlpBackend for BranchAndBoundSolver {
    fn solve_program(
        &self,
        program: &CoverProgram,
        config: &SolverConfig,
    ) -> Result<ProgramSolution> {
        self.validate(program)?;

        let n = program.num_variables();
        if n > self.max_variables {
            return Err(CoverError::SolverNotAvailable(format!(
                "{} handles at most {} variables, program has {}",
                self.name(),
                self.max_variables,
                n
            )));
        }

        let mut search = Search::new(program, config);
        if search.all_rows_feasible() {
            search.explore(0, 0.0);
        }
        debug!("{} explored {} nodes", self.name(), search.nodes);

        let nodes = search.nodes;
        match (search.best, search.timed_out) {
            (Some((objective, assignment)), false) => {
                let values = assignment.iter().map(|&x| if x { 1.0 } else { 0.0 }).collect();
                Ok(ProgramSolution::optimal(objective, values).with_nodes(nodes))
            }
            (Some((objective, assignment)), true) => {
                let mut solution =
                    ProgramSolution::new(SolutionStatus::TimeLimit).with_nodes(nodes);
                solution.objective = Some(objective);
                solution.values = assignment.iter().map(|&x| if x { 1.0 } else { 0.0 }).collect();
                Ok(solution)
            }
            (None, true) => Ok(ProgramSolution::new(SolutionStatus::TimeLimit).with_nodes(nodes)),
            (None, false) => Ok(ProgramSolution::new(SolutionStatus::Infeasible).with_nodes(nodes)),
        }
    }

    fn name(&self) -> &str {
        "Branch and Bound"
    }
}
