use super::solver_service::{CoverError, Result};
use super::value_objects::{ItemId, Optimality, SolverBackend, Strategy};

/// One covering option: a cost and the items it covers
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    pub index: usize,
    pub cost: f64,
    pub items: Vec<ItemId>,
}

impl CandidateSet {
    pub fn new(index: usize, cost: f64, items: Vec<ItemId>) -> Self {
        Self { index, cost, items }
    }

    /// Items without repetitions, in first-seen order
    pub fn distinct_items(&self) -> Vec<ItemId> {
        let mut seen = std::collections::HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .copied()
            .filter(|item| seen.insert(*item))
            .collect()
    }

    pub fn has_duplicates(&self) -> bool {
        self.distinct_items().len() != self.items.len()
    }
}

/// Immutable set cover instance: the universe size and the candidate sets in input order
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    item_count: usize,
    sets: Vec<CandidateSet>,
}

impl ProblemInstance {
    /// Build an instance, checking the data-model invariants.
    ///
    /// Set indices must match their position, costs must be finite and
    /// non-negative and every item must lie in `[0, item_count)`.
    pub fn new(item_count: usize, sets: Vec<CandidateSet>) -> Result<Self> {
        for (position, set) in sets.iter().enumerate() {
            if set.index != position {
                return Err(CoverError::InvalidProblem(format!(
                    "Set at position {} carries index {}",
                    position, set.index
                )));
            }
            if !set.cost.is_finite() || set.cost < 0.0 {
                return Err(CoverError::InvalidProblem(format!(
                    "Set {} has invalid cost {}",
                    set.index, set.cost
                )));
            }
            if let Some(item) = set.items.iter().find(|&&item| item >= item_count) {
                return Err(CoverError::InvalidProblem(format!(
                    "Set {} covers item {} outside universe of {} items",
                    set.index, item, item_count
                )));
            }
        }

        Ok(Self { item_count, sets })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn sets(&self) -> &[CandidateSet] {
        &self.sets
    }

    pub fn set(&self, index: usize) -> Option<&CandidateSet> {
        self.sets.get(index)
    }

    /// Size of the largest candidate set, counting distinct items
    pub fn max_set_size(&self) -> usize {
        self.sets
            .iter()
            .map(|s| s.distinct_items().len())
            .max()
            .unwrap_or(0)
    }

    /// For every item, the indices of the sets covering it (ascending, no repeats)
    pub fn covering_sets(&self) -> Vec<Vec<usize>> {
        let mut index = vec![Vec::new(); self.item_count];
        for set in &self.sets {
            for item in set.distinct_items() {
                index[item].push(set.index);
            }
        }
        index
    }

    /// Lowest item that no candidate set covers, if any.
    ///
    /// Works from the listed items only, so a huge `item_count` costs nothing.
    pub fn uncovered_item(&self) -> Option<ItemId> {
        let mut listed: Vec<ItemId> = self
            .sets
            .iter()
            .flat_map(|s| s.items.iter().copied())
            .collect();
        listed.sort_unstable();
        listed.dedup();

        // Sorted distinct ids below item_count: the first gap is the lowest missing item
        listed
            .iter()
            .enumerate()
            .find(|&(position, &item)| position != item)
            .map(|(position, _)| position)
            .or_else(|| (listed.len() < self.item_count).then_some(listed.len()))
    }

    /// Fail with `Unsatisfiable` if some item appears in no candidate set
    pub fn ensure_satisfiable(&self) -> Result<()> {
        match self.uncovered_item() {
            Some(item) => Err(CoverError::Unsatisfiable { item }),
            None => Ok(()),
        }
    }
}

/// One binary flag per candidate set, `true` meaning selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionVector {
    flags: Vec<bool>,
}

impl SolutionVector {
    /// All-zero vector for `set_count` sets
    pub fn empty(set_count: usize) -> Self {
        Self {
            flags: vec![false; set_count],
        }
    }

    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn select(&mut self, index: usize) {
        self.flags[index] = true;
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Indices of the selected sets, ascending
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
    }

    pub fn num_selected(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Flags as `0`/`1` values in index order
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.flags.iter().map(|&f| u8::from(f))
    }

    /// Sum of the costs of the selected sets, accumulated in index order
    pub fn total_cost(&self, instance: &ProblemInstance) -> f64 {
        self.selected()
            .filter_map(|i| instance.set(i))
            .fold(0.0, |acc, s| acc + s.cost)
    }

    /// Whether the selected sets jointly cover the whole universe
    pub fn covers(&self, instance: &ProblemInstance) -> bool {
        let mut covered = vec![false; instance.item_count()];
        for set in self.selected().filter_map(|i| instance.set(i)) {
            for &item in &set.items {
                covered[item] = true;
            }
        }
        covered.into_iter().all(|c| c)
    }
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub strategy: Strategy,
    pub backend: SolverBackend,
    pub time_limit: Option<f64>,
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Greedy,
            backend: SolverBackend::Auto,
            time_limit: None,
            gap_tolerance: None,
            verbose: false,
        }
    }
}

impl SolverConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_gap_tolerance(mut self, gap: Option<f64>) -> Self {
        self.gap_tolerance = gap;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub iterations: u64,
    pub solve_time_ms: f64,
    pub selected_sets: u32,
}

/// A verified cover together with how it was obtained
#[derive(Debug, Clone)]
pub struct CoverSolution {
    pub selection: SolutionVector,
    pub total_cost: f64,
    pub optimality: Optimality,
    pub solver: String,
    pub statistics: SolverStatistics,
}

impl CoverSolution {
    /// Verify `selection` against `instance` and compute its cost
    pub fn new(
        instance: &ProblemInstance,
        selection: SolutionVector,
        optimality: Optimality,
        solver: impl Into<String>,
    ) -> Result<Self> {
        let solver = solver.into();
        if selection.len() != instance.set_count() {
            return Err(CoverError::ExecutionFailed(format!(
                "{} returned {} flags for {} sets",
                solver,
                selection.len(),
                instance.set_count()
            )));
        }
        if !selection.covers(instance) {
            return Err(CoverError::ExecutionFailed(format!(
                "{} returned a selection that does not cover every item",
                solver
            )));
        }

        let total_cost = selection.total_cost(instance);
        let statistics = SolverStatistics {
            selected_sets: selection.num_selected() as u32,
            ..SolverStatistics::default()
        };

        Ok(Self {
            selection,
            total_cost,
            optimality,
            solver,
            statistics,
        })
    }

    pub fn with_statistics(mut self, iterations: u64, solve_time_ms: f64) -> Self {
        self.statistics.iterations = iterations;
        self.statistics.solve_time_ms = solve_time_ms;
        self
    }

    pub fn is_certified(&self) -> bool {
        self.optimality == Optimality::Certified
    }
}

/// Harmonic number `H(d) = 1 + 1/2 + ... + 1/d`, the greedy approximation factor
pub fn harmonic(d: usize) -> f64 {
    (1..=d).map(|k| 1.0 / k as f64).sum()
}
