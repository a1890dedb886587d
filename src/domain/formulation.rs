//! Backend-independent 0/1 integer program for weighted set cover.
//!
//! The program is stated in `A·x <= b` form, which is what most ILP
//! libraries accept natively:
//!
//! ```text
//! minimise   Σ cost(s)·x(s)
//! subject to Σ_{s ∋ j} -x(s) <= -1    for every item j
//!            x(s) ∈ {0, 1}
//! ```
//!
//! Rows are stored sparsely, one per item, each entry a `(set, -1.0)` pair.

use super::models::{ProblemInstance, SolutionVector};
use super::value_objects::SolutionStatus;

/// A sparse row: `(column, coefficient)` pairs
pub type SparseRow = Vec<(usize, f64)>;

/// 0/1 integer program in `A·x <= b` form
#[derive(Debug, Clone, PartialEq)]
pub struct CoverProgram {
    /// Objective coefficient per column (minimised)
    pub costs: Vec<f64>,
    /// One sparse row per constraint
    pub rows: Vec<SparseRow>,
    /// Right-hand side per row
    pub rhs: Vec<f64>,
}

impl CoverProgram {
    /// Formulate `instance` as a 0/1 program
    pub fn from_instance(instance: &ProblemInstance) -> Self {
        let costs = instance.sets().iter().map(|s| s.cost).collect();
        let rows = instance
            .covering_sets()
            .into_iter()
            .map(|sets| sets.into_iter().map(|s| (s, -1.0)).collect())
            .collect();
        let rhs = vec![-1.0; instance.item_count()];

        Self { costs, rows, rhs }
    }

    pub fn num_variables(&self) -> usize {
        self.costs.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    pub fn num_nonzeros(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Objective value of a 0/1 assignment
    pub fn objective(&self, assignment: &[bool]) -> f64 {
        self.costs
            .iter()
            .zip(assignment)
            .filter(|(_, &x)| x)
            .map(|(c, _)| c)
            .sum()
    }

    /// Whether a 0/1 assignment satisfies every row
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.rows.iter().zip(&self.rhs).all(|(row, &b)| {
            let lhs: f64 = row
                .iter()
                .filter(|(col, _)| assignment.get(*col).copied().unwrap_or(false))
                .map(|(_, coeff)| coeff)
                .sum();
            lhs <= b + FEASIBILITY_TOLERANCE
        })
    }
}

/// Slack allowed when checking `A·x <= b` in floating point
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Assignment returned by a backend
#[derive(Debug, Clone)]
pub struct ProgramSolution {
    pub status: SolutionStatus,
    pub objective: Option<f64>,
    pub values: Vec<f64>,
    pub nodes_explored: u64,
}

impl ProgramSolution {
    pub fn new(status: SolutionStatus) -> Self {
        Self {
            status,
            objective: None,
            values: Vec::new(),
            nodes_explored: 0,
        }
    }

    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            objective: Some(objective),
            values,
            nodes_explored: 0,
        }
    }

    pub fn with_nodes(mut self, nodes: u64) -> Self {
        self.nodes_explored = nodes;
        self
    }

    /// Round the relaxed values to binary flags (`>= 0.5` is selected)
    pub fn to_selection(&self) -> SolutionVector {
        SolutionVector::from_flags(self.values.iter().map(|&v| v >= 0.5).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CandidateSet;

    #[test]
    fn builds_sign_flipped_rows() {
        let instance = ProblemInstance::new(
            3,
            vec![
                CandidateSet::new(0, 2.0, vec![0, 1, 1]),
                CandidateSet::new(1, 5.0, vec![1, 2]),
            ],
        )
        .unwrap();
        let program = CoverProgram::from_instance(&instance);

        assert_eq!(program.costs, vec![2.0, 5.0]);
        assert_eq!(
            program.rows,
            vec![
                vec![(0, -1.0)],
                vec![(0, -1.0), (1, -1.0)],
                vec![(1, -1.0)],
            ]
        );
        assert_eq!(program.rhs, vec![-1.0; 3]);
        assert_eq!(program.num_nonzeros(), 4);
    }

    #[test]
    fn checks_assignments() {
        let instance = ProblemInstance::new(
            2,
            vec![
                CandidateSet::new(0, 1.0, vec![0]),
                CandidateSet::new(1, 3.0, vec![0, 1]),
            ],
        )
        .unwrap();
        let program = CoverProgram::from_instance(&instance);

        assert!(!program.is_satisfied_by(&[true, false]));
        assert!(program.is_satisfied_by(&[false, true]));
        assert_eq!(program.objective(&[true, true]), 4.0);
    }

    #[test]
    fn rounds_values_to_selection() {
        let solution = ProgramSolution::optimal(1.0, vec![0.999_999, 1e-7, 1.0]);
        let selection = solution.to_selection();
        assert_eq!(selection.bits().collect::<Vec<_>>(), vec![1, 0, 1]);
    }
}
