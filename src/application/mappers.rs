// Mappers: convert between the text formats and domain models
// Keeps the textual layout out of the solvers

use crate::domain::{
    models::{CandidateSet, CoverSolution, ProblemInstance},
    solver_service::{CoverError, Result},
    value_objects::ItemId,
};
use log::warn;

/// Parse the instance text format.
///
/// ```text
/// <item_count> <set_count>
/// <cost> <item> <item> ...      (set_count lines)
/// ```
///
/// Lines after the last set are ignored, as are header tokens beyond the
/// first two. Duplicate items and zero-cost sets are kept as given. Item ids
/// outside `[0, item_count)` cover nothing in the universe and are dropped
/// with a warning.
pub fn parse_instance(input: &str) -> Result<ProblemInstance> {
    let mut lines = input.lines();

    let header: Vec<&str> = lines.next().unwrap_or("").split_whitespace().collect();
    if header.len() < 2 {
        return Err(CoverError::malformed(
            1,
            "header must contain item_count and set_count",
        ));
    }
    let item_count = parse_count(header[0], "item_count")?;
    let set_count = parse_count(header[1], "set_count")?;

    // set_count is untrusted, so grow with the lines actually present
    let mut sets = Vec::new();
    for index in 0..set_count {
        let line_no = index + 2;
        let line = lines.next().ok_or_else(|| {
            CoverError::malformed(line_no, format!("missing line for set {}", index))
        })?;
        let set = parse_set(line, index, item_count, line_no)?;
        if set.has_duplicates() {
            warn!("Set {} lists some items more than once", index);
        }
        sets.push(set);
    }

    ProblemInstance::new(item_count, sets)
}

fn parse_count(token: &str, what: &str) -> Result<usize> {
    token.parse().map_err(|_| {
        CoverError::malformed(
            1,
            format!("{} '{}' is not a non-negative integer", what, token),
        )
    })
}

fn parse_set(line: &str, index: usize, item_count: usize, line_no: usize) -> Result<CandidateSet> {
    let mut tokens = line.split_whitespace();

    let cost_token = tokens
        .next()
        .ok_or_else(|| CoverError::malformed(line_no, "missing cost"))?;
    let cost: f64 = cost_token.parse().map_err(|_| {
        CoverError::malformed(line_no, format!("cost '{}' is not a number", cost_token))
    })?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(CoverError::malformed(
            line_no,
            format!("cost {} must be finite and non-negative", cost_token),
        ));
    }

    let mut items = Vec::new();
    for token in tokens {
        let value: i64 = token.parse().map_err(|_| {
            CoverError::malformed(line_no, format!("item '{}' is not an integer", token))
        })?;
        match in_universe(value, item_count) {
            Some(item) => items.push(item),
            None => warn!(
                "Set {} lists item {} outside 0..{}, ignoring it",
                index, value, item_count
            ),
        }
    }

    Ok(CandidateSet::new(index, cost, items))
}

fn in_universe(value: i64, item_count: usize) -> Option<ItemId> {
    usize::try_from(value).ok().filter(|&item| item < item_count)
}

/// Render a solution as the two output lines (no trailing newline)
pub fn format_solution(solution: &CoverSolution) -> String {
    let flags = solution
        .selection
        .bits()
        .map(|bit| bit.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{} {}\n{}",
        solution.total_cost,
        solution.optimality.flag(),
        flags
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::SolutionVector,
        value_objects::Optimality,
    };

    #[test]
    fn parses_example_instance() {
        let instance = parse_instance("5 3\n2 0 1 2\n3 2 3 4\n4 0 1 2 3 4\n").unwrap();

        assert_eq!(instance.item_count(), 5);
        assert_eq!(instance.set_count(), 3);
        assert_eq!(instance.sets()[1], CandidateSet::new(1, 3.0, vec![2, 3, 4]));
    }

    #[test]
    fn accepts_fractional_costs_crlf_and_trailing_lines() {
        let instance = parse_instance("2 1\r\n0.5 1 0 0\r\n\r\nextra\n").unwrap();
        assert_eq!(instance.sets()[0].cost, 0.5);
        assert_eq!(instance.sets()[0].items, vec![1, 0, 0]);
    }

    #[test]
    fn set_with_no_items_is_kept() {
        let instance = parse_instance("1 2\n1 0\n0\n").unwrap();
        assert!(instance.sets()[1].items.is_empty());
    }

    fn malformed_line(input: &str) -> usize {
        match parse_instance(input) {
            Err(CoverError::MalformedInput { line, .. }) => line,
            other => panic!("expected malformed input, got {:?}", other),
        }
    }

    #[test]
    fn reports_malformed_lines() {
        assert_eq!(malformed_line(""), 1);
        assert_eq!(malformed_line("5"), 1);
        assert_eq!(malformed_line("five 1\n1 0"), 1);
        assert_eq!(malformed_line("2 2\n1 0 1\n"), 3);
        assert_eq!(malformed_line("2 1\n\n"), 2);
        assert_eq!(malformed_line("2 1\nabc 0\n"), 2);
        assert_eq!(malformed_line("2 1\n1 0 x\n"), 2);
        assert_eq!(malformed_line("2 1\n1 0 1.5\n"), 2);
        assert_eq!(malformed_line("2 1\n-1 0 1\n"), 2);
        assert_eq!(malformed_line("2 1\nnan 0 1\n"), 2);
    }

    #[test]
    fn huge_set_count_reports_missing_line() {
        assert_eq!(malformed_line("1 18446744073709551615\n1 0\n"), 3);
        assert_eq!(malformed_line("1 100000000000\n1 0\n"), 3);
    }

    #[test]
    fn huge_item_count_is_unsatisfiable() {
        let instance = parse_instance("18446744073709551615 1\n1 0 1\n").unwrap();
        assert!(matches!(
            instance.ensure_satisfiable(),
            Err(CoverError::Unsatisfiable { item: 2 })
        ));
    }

    #[test]
    fn drops_items_outside_universe() {
        let instance = parse_instance("2 1\n1 0 2 -1 1\n").unwrap();
        assert_eq!(instance.sets()[0].items, vec![0, 1]);
    }

    #[test]
    fn formats_cost_flag_and_vector() {
        let instance = parse_instance("5 3\n2 0 1 2\n3 2 3 4\n4 0 1 2 3 4\n").unwrap();
        let selection = SolutionVector::from_flags(vec![true, true, false]);
        let solution =
            CoverSolution::new(&instance, selection, Optimality::Heuristic, "test").unwrap();

        assert_eq!(format_solution(&solution), "5 0\n1 1 0");
    }

    #[test]
    fn formats_fractional_cost() {
        let instance = parse_instance("2 2\n0.5 0\n0.25 1\n").unwrap();
        let selection = SolutionVector::from_flags(vec![true, true]);
        let solution =
            CoverSolution::new(&instance, selection, Optimality::Certified, "test").unwrap();

        assert_eq!(format_solution(&solution), "0.75 1\n1 1");
    }
}
