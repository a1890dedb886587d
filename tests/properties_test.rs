use rand::{rngs::StdRng, Rng, SeedableRng};
use setcover::{
    harmonic, BranchAndBoundSolver, CandidateSet, CoverError, CoverSolver, ExactSolver,
    GreedySolver, ProblemInstance, SolverConfig, TrivialSolver,
};
use std::sync::Arc;

const TOLERANCE: f64 = 1e-9;

/// Random satisfiable instance; every item ends up in at least one set
fn random_instance(rng: &mut StdRng, item_count: usize, set_count: usize) -> ProblemInstance {
    let mut members: Vec<Vec<usize>> = (0..set_count)
        .map(|_| {
            let density = rng.gen_range(0.1..0.6);
            (0..item_count).filter(|_| rng.gen_bool(density)).collect()
        })
        .collect();

    for item in 0..item_count {
        if !members.iter().any(|m| m.contains(&item)) {
            let set = rng.gen_range(0..set_count);
            members[set].push(item);
        }
    }

    let sets = members
        .into_iter()
        .enumerate()
        .map(|(index, items)| {
            let cost = if rng.gen_bool(0.05) {
                0.0
            } else {
                rng.gen_range(1..=20) as f64
            };
            CandidateSet::new(index, cost, items)
        })
        .collect();

    ProblemInstance::new(item_count, sets).unwrap()
}

fn instances(seed: u64, count: usize) -> Vec<ProblemInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let item_count = rng.gen_range(1..=25);
            let set_count = rng.gen_range(1..=12);
            random_instance(&mut rng, item_count, set_count)
        })
        .collect()
}

fn union_of_selected(
    instance: &ProblemInstance,
    selected: impl Iterator<Item = usize>,
) -> Vec<bool> {
    let mut covered = vec![false; instance.item_count()];
    for index in selected {
        for &item in &instance.sets()[index].items {
            covered[item] = true;
        }
    }
    covered
}

#[test]
fn greedy_covers_every_item() {
    for instance in instances(7, 200) {
        let solution = GreedySolver::new().solve(&instance).unwrap();
        let covered = union_of_selected(&instance, solution.selection.selected());
        assert!(covered.iter().all(|&c| c));
    }
}

#[test]
fn coverage_grows_strictly_each_iteration() {
    for instance in instances(11, 200) {
        let run = GreedySolver::new().run(&instance).unwrap();

        let mut covered = 0;
        let mut seen = vec![false; instance.set_count()];
        for step in &run.steps {
            assert!(step.gain > 0);
            assert!(!seen[step.set], "set {} selected twice", step.set);
            seen[step.set] = true;
            covered += step.gain;
        }
        assert_eq!(covered, instance.item_count());
        assert!(run.steps.len() <= instance.set_count());
    }
}

#[test]
fn reported_cost_matches_selected_sets() {
    for instance in instances(13, 200) {
        let solution = GreedySolver::new().solve(&instance).unwrap();
        let expected: f64 = instance
            .sets()
            .iter()
            .filter(|s| solution.selection.is_selected(s.index))
            .map(|s| s.cost)
            .sum();
        assert!((solution.total_cost - expected).abs() < TOLERANCE);
    }
}

#[test]
fn greedy_stays_within_harmonic_bound_of_optimum() {
    let exact = ExactSolver::new(Arc::new(BranchAndBoundSolver::new()), SolverConfig::default());

    for instance in instances(17, 150) {
        let greedy = GreedySolver::new().solve(&instance).unwrap();
        let optimum = exact.solve(&instance).unwrap();
        let bound = harmonic(instance.max_set_size()) * optimum.total_cost;

        assert!(greedy.total_cost >= optimum.total_cost - TOLERANCE);
        assert!(
            greedy.total_cost <= bound + TOLERANCE,
            "greedy {} exceeds H(d)*OPT = {}",
            greedy.total_cost,
            bound
        );
    }
}

#[test]
fn trivial_never_beats_optimum() {
    let exact = ExactSolver::new(Arc::new(BranchAndBoundSolver::new()), SolverConfig::default());

    for instance in instances(19, 100) {
        let trivial = TrivialSolver::new().solve(&instance).unwrap();
        let optimum = exact.solve(&instance).unwrap();
        assert!(trivial.total_cost >= optimum.total_cost - TOLERANCE);
    }
}

#[test]
fn item_missing_from_every_set_is_reported() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..50 {
        let item_count = rng.gen_range(1..=20);
        let set_count = rng.gen_range(1..=10);
        let covered = random_instance(&mut rng, item_count, set_count);

        // Widen the universe by one item nobody covers
        let instance = ProblemInstance::new(item_count + 1, covered.sets().to_vec()).unwrap();

        for solver in [
            Box::new(GreedySolver::new()) as Box<dyn CoverSolver>,
            Box::new(TrivialSolver::new()),
        ] {
            match solver.solve(&instance) {
                Err(CoverError::Unsatisfiable { item }) => assert_eq!(item, item_count),
                other => panic!("expected unsatisfiable, got {:?}", other.map(|s| s.total_cost)),
            }
        }
    }
}
