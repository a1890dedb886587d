// First-fit baseline: walk the sets in index order, keeping each one that adds coverage

use crate::domain::{
    models::{CoverSolution, ProblemInstance, SolutionVector},
    solver_service::{CoverSolver, Result},
    value_objects::Optimality,
};
use log::info;
use std::time::Instant;

pub struct TrivialSolver;

impl TrivialSolver {
    pub fn new() -> Self {
        Self
    }

    pub fn select(&self, instance: &ProblemInstance) -> Result<SolutionVector> {
        instance.ensure_satisfiable()?;

        let mut covered = vec![false; instance.item_count()];
        let mut num_covered = 0;
        let mut selection = SolutionVector::empty(instance.set_count());

        for set in instance.sets() {
            if num_covered >= instance.item_count() {
                break;
            }
            let mut gain = 0;
            for &item in &set.items {
                if !covered[item] {
                    covered[item] = true;
                    gain += 1;
                }
            }
            if gain > 0 {
                selection.select(set.index);
                num_covered += gain;
            }
        }

        Ok(selection)
    }
}

impl Default for TrivialSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverSolver for TrivialSolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<CoverSolution> {
        let start_time = Instant::now();
        let selection = self.select(instance)?;
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let iterations = selection.num_selected() as u64;

        let solution = CoverSolution::new(instance, selection, Optimality::Heuristic, self.name())?
            .with_statistics(iterations, solve_time);
        info!("Trivial selected {} sets", solution.statistics.selected_sets);

        Ok(solution)
    }

    fn name(&self) -> &str {
        "Trivial"
    }

    fn is_exact(&self) -> bool {
        false
    }
}
