use neat_mutation::genomics::{ActivationType, Genome, MutationConfig};
use neat_mutation::mutation::{CompoundOperator, MutationOperator};
use neat_mutation::populations::Population;

use std::error::Error;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::{env, fs};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const POPULATION_SIZE: usize = 150;
const GENERATIONS: usize = 200;
const SEED: u64 = 0x5EED;

fn default_config() -> MutationConfig {
    MutationConfig {
        input_count: NonZeroUsize::new(3).unwrap(),
        output_count: NonZeroUsize::new(1).unwrap(),
        activation_cycles: NonZeroUsize::new(1).unwrap(),
        activation_types: vec![ActivationType::Sigmoid, ActivationType::ReLU],
        initial_expression_chance: 1.0,
        weight_bound: 5.0,
        weight_mutation_power: 2.5,
        max_add_link_attempts: 20,
        max_links: Some(200),
        min_links: 1,
    }
}

fn load_config(path: &str) -> Result<MutationConfig, Box<dyn Error>> {
    let config: MutationConfig = ron::from_str(&fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("could not load configuration from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => default_config(),
    };

    if let Err(e) = stress_test(config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn stress_test(config: MutationConfig) -> Result<(), Box<dyn Error>> {
    let population = Arc::new(Population::new(config)?);
    let operator = CompoundOperator::standard(Arc::clone(&population));

    let mut seed_rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut parents = (0..POPULATION_SIZE)
        .map(|_| Genome::new(&population, &mut seed_rng))
        .collect::<Result<Vec<_>, _>>()?;

    for generation in 0..GENERATIONS {
        let mut offspring: Vec<Option<Genome>> = vec![None; POPULATION_SIZE];
        offspring
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, slot)| {
                let seed = SEED ^ ((generation * POPULATION_SIZE + i) as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                operator
                    .perform_operation(&mut rng, &parents, i, std::slice::from_mut(slot), 0)
                    .map(|_| ())
            })?;

        let mut children = Vec::with_capacity(POPULATION_SIZE);
        for child in offspring.into_iter().flatten() {
            if let Err(e) = child.validate() {
                warn!(generation, error = %e, "offspring failed validation");
                return Err(e.into());
            }
            children.push(child);
        }
        parents = children;

        if generation % 20 == 0 || generation + 1 == GENERATIONS {
            report(generation, &parents, &population);
        }
    }

    Ok(())
}

fn report(generation: usize, genomes: &[Genome], population: &Population) {
    let count = genomes.len().max(1) as f32;
    let neurons = genomes.iter().map(|g| g.neurons().len()).sum::<usize>() as f32 / count;
    let links = genomes.iter().map(|g| g.links().len()).sum::<usize>() as f32 / count;
    let enabled = genomes
        .iter()
        .map(|g| g.links().iter().filter(|l| l.enabled()).count())
        .sum::<usize>() as f32
        / count;
    let largest = genomes.iter().map(|g| g.links().len()).max().unwrap_or(0);

    info!(
        generation,
        mean_neurons = neurons,
        mean_links = links,
        mean_enabled_links = enabled,
        largest,
        innovations = population.innovations().len(),
        "generation complete"
    );
}
