//! Property-based tests for pref-elicit
//!
//! Uses proptest to verify invariants of the filters, dominance and model
//! construction.

use pref_elicit::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Points on a coarse grid so duplicates and dominance occur often
fn grid_points(dim: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        prop::collection::vec((0u8..5).prop_map(f64::from), dim),
        0..30,
    )
}

fn context(points: Vec<Vec<f64>>, gains: &[bool]) -> DecisionContext {
    DecisionContext::builder()
        .criteria(Criteria::from_directions(gains).unwrap())
        .alternatives(AlternativesSuperset::from_vectors(points))
        .build()
        .unwrap()
}

fn vectors(superset: &AlternativesSuperset) -> Vec<Vec<f64>> {
    superset
        .iter()
        .map(|a| a.performance_vector().to_vec())
        .collect()
}

proptest! {
    // ==================== Dominance Properties ====================

    #[test]
    fn dominance_is_irreflexive_and_asymmetric(
        a in prop::collection::vec(0.0..10.0f64, 3),
        b in prop::collection::vec(0.0..10.0f64, 3),
        gains in prop::collection::vec(any::<bool>(), 3)
    ) {
        let criteria = Criteria::from_directions(&gains).unwrap();
        prop_assert!(!dominates(&a, &a, &criteria));
        prop_assert!(!(dominates(&a, &b, &criteria) && dominates(&b, &a, &criteria)));
    }

    // ==================== Reduction Filter Properties ====================

    #[test]
    fn duplicate_removal_is_idempotent(points in grid_points(2)) {
        let ctx = context(points, &[false, false]);
        let filter = RemoveDuplicatesInOS::new();
        let once = filter.reduce(&ctx, ctx.alternatives_superset()).unwrap();
        let twice = filter.reduce(&ctx, &once).unwrap();
        prop_assert_eq!(vectors(&once), vectors(&twice));
    }

    #[test]
    fn dominated_removal_after_duplicates_keeps_exact_front(points in grid_points(3)) {
        let ctx = context(points, &[false, true, false]);
        let deduped = RemoveDuplicatesInOS::new()
            .reduce(&ctx, ctx.alternatives_superset())
            .unwrap();
        let front = RemoveDominated::new().reduce(&ctx, &deduped).unwrap();

        // pairwise distinct and mutually non-dominated
        for (i, a) in front.iter().enumerate() {
            for b in front.iter().skip(i + 1) {
                prop_assert!(!values_equal(
                    a.performance_vector(),
                    b.performance_vector(),
                    3,
                    DEFAULT_EPSILON
                ));
                prop_assert!(!dominates(a.performance_vector(), b.performance_vector(), ctx.criteria()));
                prop_assert!(!dominates(b.performance_vector(), a.performance_vector(), ctx.criteria()));
            }
        }

        // every non-dominated point of the deduplicated set survives
        let expected = deduped
            .iter()
            .filter(|c| {
                !deduped
                    .iter()
                    .any(|o| dominates(o.performance_vector(), c.performance_vector(), ctx.criteria()))
            })
            .count();
        prop_assert_eq!(front.size(), expected);
    }

    #[test]
    fn reduction_chain_is_monotone(points in grid_points(2)) {
        let input_size = points.len();
        let ctx = context(points, &[false, false]);
        let refiner = Refiner::new(
            vec![],
            vec![Box::new(RemoveDuplicatesInOS::new()), Box::new(RemoveDominated::new())],
        );
        let report = refiner.refine(&ctx).unwrap();
        prop_assert_eq!(report.status, RefinerStatus::ProcessEndedSuccessfully);

        let mut previous = input_size;
        for outcome in &report.reduction_outcomes {
            prop_assert!(outcome.output_size <= previous);
            previous = outcome.output_size;
        }
        prop_assert_eq!(report.refined_alternatives.size(), previous);
    }

    #[test]
    fn empty_reduction_chain_returns_input(points in grid_points(2)) {
        let ctx = context(points.clone(), &[false, false]);
        let report = Refiner::new(vec![], vec![]).refine(&ctx).unwrap();
        prop_assert_eq!(vectors(&report.refined_alternatives), points);
    }

    #[test]
    fn spread_check_rejects_only_concentrated_sets(
        points in grid_points(2),
        threshold in 0.0..6.0f64
    ) {
        let ctx = context(points.clone(), &[false, false]);
        let result = RequiredSpread::new(threshold)
            .unwrap()
            .should_terminate(&ctx, ctx.alternatives_superset())
            .unwrap();

        let all_concentrated = !points.is_empty() && (0..2).all(|c| {
            let min = points.iter().map(|p| p[c]).fold(f64::INFINITY, f64::min);
            let max = points.iter().map(|p| p[c]).fold(f64::NEG_INFINITY, f64::max);
            max - min < threshold
        });
        prop_assert_eq!(result.should_terminate, all_concentrated);
    }

    // ==================== Normalization Properties ====================

    #[test]
    fn superset_normalization_maps_into_unit_interval(points in grid_points(3)) {
        let ctx = context(points, &[false, false, true]);
        let normalizations = Normalization::from_superset(ctx.criteria(), ctx.alternatives_superset()).unwrap();
        prop_assert_eq!(normalizations.len(), 3);
        for alternative in ctx.alternatives_superset() {
            for (c, n) in normalizations.iter().enumerate() {
                let v = n.normalize(alternative.performance(c));
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    // ==================== Model Construction Properties ====================

    #[test]
    fn sampled_weights_lie_on_simplex(dim in 1usize..8, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = LNormGenerator::sample_weights(dim, &mut rng);
        prop_assert_eq!(weights.len(), dim);
        prop_assert!(weights.iter().all(|w| *w >= 0.0));
        prop_assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constructed_models_are_compatible(
        seed in any::<u64>(),
        statements in prop::collection::vec(
            (0.0..1.0f64, 0.0..1.0f64),
            1..4
        )
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let ctx = context(vec![], &[false, false]);
        let mut history = PreferenceHistory::new();
        // consistent statements: a point close to the ideal preferred over its mirror farther out
        for (x, y) in statements {
            history.push(
                PreferenceInformation::pairwise(
                    Alternative::new("p", vec![x, y]),
                    Alternative::new("o", vec![x + 1.0, y + 1.0]),
                ),
                0,
            );
        }
        let mut frs = FrsBuilder::new()
            .feasible_samples_to_generate(10)
            .sampling_limit(1_000)
            .generator(LNormGenerator::linear(vec![0.0, 0.0]).unwrap())
            .build()
            .unwrap();
        let report = frs.construct(&ctx, &history, &mut rng).unwrap();
        prop_assert!(!report.inconsistency_detected);

        let analyzer = CompatibilityAnalyzer::default();
        for model in frs.models() {
            let compatibility = analyzer.most_discriminative_compatibility(history.statements(), model);
            prop_assert!(is_compatible(compatibility));
        }
    }
}
