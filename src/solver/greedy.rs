// Ratio-greedy set cover
// Picks the set with the most newly covered items per unit cost until the universe is covered

use crate::domain::{
    models::{CoverSolution, ProblemInstance, SolutionVector},
    solver_service::{CoverError, CoverSolver, Result},
    value_objects::{ItemId, Optimality},
};
use log::{debug, info, warn};
use std::time::Instant;

/// One selection made by the greedy loop
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyStep {
    pub set: usize,
    /// Items this set newly covered
    pub gain: usize,
    pub density: f64,
}

/// Selection plus the sequence of steps that produced it
#[derive(Debug, Clone)]
pub struct GreedyRun {
    pub selection: SolutionVector,
    pub steps: Vec<GreedyStep>,
}

/// Greedy approximation with worst-case factor `H(max set size)`.
///
/// Instead of recomputing set differences each round, the solver keeps the
/// number of still-uncovered items per set and a reverse index from item to
/// covering sets. Covering an item decrements the gain of every set that
/// contains it, so each round only scans the gains.
///
/// Densities are compared with strict `>` in index order, so ties go to the
/// lowest index. A zero-cost set with positive gain has infinite density;
/// a set with zero gain has density zero and is never picked.
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }

    /// Run the greedy loop and keep its trace
    pub fn run(&self, instance: &ProblemInstance) -> Result<GreedyRun> {
        instance.ensure_satisfiable()?;

        let item_count = instance.item_count();
        let members: Vec<Vec<ItemId>> = instance
            .sets()
            .iter()
            .map(|s| s.distinct_items())
            .collect();
        let covering = instance.covering_sets();

        let mut gains: Vec<usize> = members.iter().map(Vec::len).collect();
        let mut covered = vec![false; item_count];
        let mut num_covered = 0;
        let mut selection = SolutionVector::empty(instance.set_count());
        let mut steps = Vec::new();

        for set in instance.sets().iter().filter(|s| s.cost == 0.0 && !s.items.is_empty()) {
            warn!("Set {} has zero cost and will be preferred while it adds coverage", set.index);
        }

        while num_covered < item_count {
            let (best, density) = best_density(instance, &gains).ok_or_else(|| {
                CoverError::ExecutionFailed(format!(
                    "No set adds coverage with {} of {} items covered",
                    num_covered, item_count
                ))
            })?;

            let mut gain = 0;
            for &item in &members[best] {
                if covered[item] {
                    continue;
                }
                covered[item] = true;
                gain += 1;
                for &s in &covering[item] {
                    gains[s] -= 1;
                }
            }

            debug_assert!(gain > 0);
            num_covered += gain;
            selection.select(best);
            debug!(
                "Selected set {} (gain {}, density {}), {}/{} items covered",
                best, gain, density, num_covered, item_count
            );
            steps.push(GreedyStep {
                set: best,
                gain,
                density,
            });
        }

        Ok(GreedyRun { selection, steps })
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Newly coverable items per unit cost
fn density(gain: usize, cost: f64) -> f64 {
    if gain == 0 {
        0.0
    } else if cost == 0.0 {
        f64::INFINITY
    } else {
        gain as f64 / cost
    }
}

/// First set with the strictly greatest positive density
fn best_density(instance: &ProblemInstance, gains: &[usize]) -> Option<(usize, f64)> {
    let mut best = None;
    let mut best_density = 0.0;

    for (set, &gain) in instance.sets().iter().zip(gains) {
        let d = density(gain, set.cost);
        if d > best_density {
            best_density = d;
            best = Some(set.index);
        }
    }

    best.map(|index| (index, best_density))
}

impl CoverSolver for GreedySolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<CoverSolution> {
        let start_time = Instant::now();
        let run = self.run(instance)?;
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;

        let solution =
            CoverSolution::new(instance, run.selection, Optimality::Heuristic, self.name())?
                .with_statistics(run.steps.len() as u64, solve_time);
        info!(
            "Greedy selected {} sets in {} iterations",
            solution.statistics.selected_sets, solution.statistics.iterations
        );

        Ok(solution)
    }

    fn name(&self) -> &str {
        "Greedy"
    }

    fn is_exact(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CandidateSet;

    fn instance(item_count: usize, sets: &[(f64, &[usize])]) -> ProblemInstance {
        let sets = sets
            .iter()
            .enumerate()
            .map(|(i, (cost, items))| CandidateSet::new(i, *cost, items.to_vec()))
            .collect();
        ProblemInstance::new(item_count, sets).unwrap()
    }

    fn bits(run: &GreedyRun) -> Vec<u8> {
        run.selection.bits().collect()
    }

    #[test]
    fn picks_best_density_then_recomputes() {
        let inst = instance(5, &[(2.0, &[0, 1, 2]), (3.0, &[2, 3, 4]), (4.0, &[0, 1, 2, 3, 4])]);
        let run = GreedySolver::new().run(&inst).unwrap();

        assert_eq!(bits(&run), vec![1, 1, 0]);
        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0], GreedyStep { set: 0, gain: 3, density: 1.5 });
        assert_eq!(run.steps[1].set, 1);
        assert_eq!(run.steps[1].gain, 2);
        assert!((run.steps[1].density - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let inst = instance(2, &[(2.0, &[0, 1]), (1.0, &[0]), (2.0, &[0, 1])]);
        let run = GreedySolver::new().run(&inst).unwrap();
        assert_eq!(bits(&run), vec![1, 0, 0]);
    }

    #[test]
    fn zero_cost_set_is_taken_first() {
        let inst = instance(3, &[(1.0, &[0, 1, 2]), (0.0, &[2]), (0.0, &[])]);
        let run = GreedySolver::new().run(&inst).unwrap();

        assert_eq!(run.steps[0].set, 1);
        assert!(run.steps[0].density.is_infinite());
        assert_eq!(bits(&run), vec![1, 1, 0]);
    }

    #[test]
    fn duplicate_items_count_once() {
        let inst = instance(2, &[(1.0, &[0, 0, 0]), (1.5, &[0, 1])]);
        let run = GreedySolver::new().run(&inst).unwrap();

        assert_eq!(run.steps[0].set, 1);
        assert_eq!(bits(&run), vec![0, 1]);
    }

    #[test]
    fn detects_unsatisfiable_instance() {
        let inst = instance(1, &[]);
        assert!(matches!(
            GreedySolver::new().run(&inst),
            Err(CoverError::Unsatisfiable { item: 0 })
        ));
    }

    #[test]
    fn empty_universe_selects_nothing() {
        let inst = instance(0, &[(1.0, &[])]);
        let solution = GreedySolver::new().solve(&inst).unwrap();
        assert_eq!(solution.selection.num_selected(), 0);
        assert_eq!(solution.total_cost, 0.0);
    }

    #[test]
    fn solve_reports_heuristic_cost() {
        let inst = instance(1, &[(1.0, &[0])]);
        let solution = GreedySolver::new().solve(&inst).unwrap();
        assert_eq!(solution.total_cost, 1.0);
        assert_eq!(solution.optimality, Optimality::Heuristic);
        assert_eq!(solution.statistics.iterations, 1);
    }
}
