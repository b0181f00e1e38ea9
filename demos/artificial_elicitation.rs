//! Artificial Elicitation Example
//!
//! Drives the decision support system with a synthetic optimizer whose
//! Pareto front approaches the true front over the generations. An
//! artificial decision maker with hidden weights answers the queries, and
//! the sampled preference models narrow down towards those weights.
//!
//! Run with `RUST_LOG=pref_elicit=debug` to see the filter and sampling logs.

use pref_elicit::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Noisy approximation of a convex front, closer to the true front as
/// `generation` grows
fn front<R: Rng>(generation: usize, size: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let offset = 1.0 / (1.0 + generation as f64);
    (0..size)
        .map(|_| {
            let x: f64 = rng.gen_range(0.0..1.0);
            let noise: f64 = rng.gen_range(0.0..offset);
            vec![x + noise, (1.0 - x.sqrt()) + offset + noise]
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pref_elicit=info")),
        )
        .with_target(false)
        .init();

    println!("=== Artificial Preference Elicitation Demo ===\n");

    let mut rng = StdRng::seed_from_u64(42);

    let config = ElicitationConfig::new()
        .rule(RuleConfig::IterationInterval {
            start_iteration: 5,
            interval: 5,
            max_triggers: Some(4),
        })
        .refiner(RefinerConfig::default().spread_threshold(0.01))
        .frs(FrsConfig {
            feasible_samples_to_generate: 50,
            sampling_limit: 50_000,
            ..FrsConfig::default()
        });
    println!("Configuration:\n{}\n", config.to_json()?);

    let (trigger, _flags) = config.build_trigger()?;
    let mut dss = DecisionSupportSystem::new(
        trigger,
        config.build_refiner()?,
        config.build_constructor(LNormGenerator::linear(vec![0.0, 0.0])?)?,
    );

    let criteria = Criteria::new(vec![
        Criterion::new(0, "cost", false),
        Criterion::new(1, "risk", false),
    ])?;
    let hidden = LNormModel::new(vec![0.25, 0.75], vec![0.0, 0.0], 1.0)?;
    let mut decision_maker = ArtificialDecisionMaker::pairwise(hidden, 4);

    let mut normalizations: Option<Vec<Normalization>> = None;
    for generation in 0..25 {
        let superset = AlternativesSuperset::from_vectors(front(generation, 30, &mut rng));

        // rescale the objective space every ten generations
        let rescale = generation % 10 == 0;
        if rescale {
            normalizations = Some(Normalization::from_superset(&criteria, &superset)?);
        }

        let mut builder = DecisionContext::builder()
            .iteration(generation)
            .criteria(criteria.clone())
            .alternatives(superset)
            .objective_space_changed(rescale);
        if let Some(n) = &normalizations {
            builder = builder.normalizations(n.clone());
        }
        let context = builder.build()?;

        let report = dss.run_iteration(&context, &mut decision_maker, &mut rng)?;
        match &report.elicitation {
            ElicitationOutcome::NotTriggered => {}
            outcome => println!("Generation {generation:>2}: {outcome:?}"),
        }
        if let Some(construction) = &report.construction {
            println!(
                "              models = {}, preserved = {}, accepted = {}, {:.2} ms",
                construction.population_size,
                construction.preserved(),
                construction.accepted(),
                construction.timing.total_ms
            );
        }
    }

    let models = dss.models();
    let mean_w0 = models.iter().map(|m| m.weights()[0]).sum::<f64>() / models.len().max(1) as f64;
    println!("\n=== Results ===");
    println!("Statements collected: {}", dss.history().len());
    println!("Compatible models:    {}", models.len());
    println!("Mean weight on cost:  {mean_w0:.3} (hidden: 0.250)");

    Ok(())
}
