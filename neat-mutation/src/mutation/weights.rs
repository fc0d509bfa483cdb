use super::utils::random_weight;
use super::{MutationError, MutationOperator, Outcome};
use crate::genomics::{ConfigError, Genome};
use crate::populations::Population;

use rand::seq::index;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use std::sync::Arc;

/// Which links a weight mutation touches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LinkSelection {
    /// A fixed number of distinct links, or all of them
    /// if the genome has fewer.
    Fixed(usize),
    /// Each link independently, with the given probability.
    Proportion(f32),
}

/// How a selected link's weight changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WeightMutation {
    /// Nudges the weight by a uniform random amount in
    /// ±`power`, clamped to the configured weight bound.
    Perturb { power: f32 },
    /// Replaces the weight with a uniform random value
    /// within the configured weight bound.
    Reset,
}

/// Changes the weights of a selection of links.
#[derive(Debug, Clone)]
pub struct MutateWeights {
    population: Arc<Population>,
    selection: LinkSelection,
    mutation: WeightMutation,
}

impl MutateWeights {
    /// Returns an operator acting for `population`.
    ///
    /// # Errors
    /// Returns an error if the selection proportion is
    /// not a probability or the perturbation power is negative.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::MutationConfig;
    /// use neat_mutation::mutation::{LinkSelection, MutateWeights, WeightMutation};
    /// use neat_mutation::populations::Population;
    /// use std::sync::Arc;
    ///
    /// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
    ///
    /// let nudge = MutateWeights::new(
    ///     Arc::clone(&population),
    ///     LinkSelection::Proportion(0.8),
    ///     WeightMutation::Perturb { power: 0.5 },
    /// );
    /// assert!(nudge.is_ok());
    ///
    /// let invalid = MutateWeights::new(population, LinkSelection::Proportion(2.0), WeightMutation::Reset);
    /// assert!(invalid.is_err());
    /// ```
    pub fn new(
        population: Arc<Population>,
        selection: LinkSelection,
        mutation: WeightMutation,
    ) -> Result<MutateWeights, ConfigError> {
        if let LinkSelection::Proportion(p) = selection {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Probability("link selection proportion", p));
            }
        }
        if let WeightMutation::Perturb { power } = mutation {
            if !power.is_finite() || power < 0.0 {
                return Err(ConfigError::NegativeMagnitude("perturbation power", power));
            }
        }
        Ok(MutateWeights {
            population,
            selection,
            mutation,
        })
    }

    /// Returns an operator perturbing each link with the population's
    /// configured [`weight_mutation_power`].
    ///
    /// [`weight_mutation_power`]: crate::genomics::MutationConfig::weight_mutation_power
    pub fn perturb_all(population: Arc<Population>) -> MutateWeights {
        let power = population.config().weight_mutation_power;
        MutateWeights {
            population,
            selection: LinkSelection::Proportion(1.0),
            mutation: WeightMutation::Perturb { power },
        }
    }

    fn select_links(&self, rng: &mut dyn RngCore, link_count: usize) -> Vec<usize> {
        match self.selection {
            LinkSelection::Fixed(n) => index::sample(rng, link_count, n.min(link_count)).into_vec(),
            LinkSelection::Proportion(p) => (0..link_count).filter(|_| rng.gen::<f32>() < p).collect(),
        }
    }
}

impl MutationOperator for MutateWeights {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let selected = self.select_links(rng, genome.links().len());
        if selected.is_empty() {
            return Ok(Outcome::NotApplicable);
        }

        let bound = self.population.config().weight_bound;
        for &i in &selected {
            let link = &mut genome.links_mut()[i];
            let weight = match self.mutation {
                WeightMutation::Perturb { power } => {
                    (link.weight() + random_weight(rng, power)).clamp(-bound, bound)
                }
                WeightMutation::Reset => random_weight(rng, bound),
            };
            link.set_weight(weight);
        }

        debug!(links = selected.len(), mutation = ?self.mutation, "mutated link weights");
        Ok(Outcome::Mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::MutationConfig;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use std::num::NonZeroUsize;

    fn connected() -> (Arc<Population>, Genome) {
        let population = Arc::new(Population::new(MutationConfig {
            input_count: NonZeroUsize::new(3).unwrap(),
            output_count: NonZeroUsize::new(2).unwrap(),
            initial_expression_chance: 1.0,
            weight_bound: 5.0,
            weight_mutation_power: 0.5,
            ..MutationConfig::zero()
        }).unwrap());
        let genome = Genome::new(&population, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        (population, genome)
    }

    fn weights(genome: &Genome) -> Vec<f32> {
        genome.links().iter().map(|l| l.weight()).collect()
    }

    #[test]
    fn perturbation_is_bounded() {
        let (population, mut genome) = connected();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let before = weights(&genome);

        MutateWeights::perturb_all(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        for (old, new) in before.iter().zip(weights(&genome)) {
            assert!((new - old).abs() <= 0.5 + f32::EPSILON);
            assert!(new.abs() <= 5.0);
        }
    }

    #[test]
    fn perturbation_clamps_to_bound() {
        let (population, mut genome) = connected();
        for link in genome.links_mut() {
            link.set_weight(5.0);
        }
        let operator = MutateWeights::new(
            Arc::clone(&population),
            LinkSelection::Proportion(1.0),
            WeightMutation::Perturb { power: 100.0 },
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        for _ in 0..10 {
            operator.mutate(&mut rng, &mut genome).unwrap();
            assert!(weights(&genome).iter().all(|w| w.abs() <= 5.0));
        }
    }

    #[test]
    fn fixed_selection_touches_exact_count() {
        let (population, mut genome) = connected();
        for link in genome.links_mut() {
            link.set_weight(10.0);
        }
        let operator = MutateWeights::new(
            Arc::clone(&population),
            LinkSelection::Fixed(3),
            WeightMutation::Reset,
        )
        .unwrap();

        operator
            .mutate(&mut ChaCha8Rng::seed_from_u64(3), &mut genome)
            .unwrap();

        // Reset weights fall within the bound, untouched ones keep the marker.
        let reset = weights(&genome).iter().filter(|w| **w != 10.0).count();
        assert_eq!(reset, 3);
    }

    #[test]
    fn fixed_selection_larger_than_genome() {
        let (population, mut genome) = connected();
        let operator = MutateWeights::new(
            Arc::clone(&population),
            LinkSelection::Fixed(100),
            WeightMutation::Reset,
        )
        .unwrap();

        let outcome = operator
            .mutate(&mut ChaCha8Rng::seed_from_u64(4), &mut genome)
            .unwrap();
        assert_eq!(outcome, Outcome::Mutated);
    }

    #[test]
    fn empty_selection_is_not_applicable() {
        let (population, mut genome) = connected();
        let before = weights(&genome);
        let operator = MutateWeights::new(
            Arc::clone(&population),
            LinkSelection::Proportion(0.0),
            WeightMutation::Reset,
        )
        .unwrap();

        let outcome = operator
            .mutate(&mut ChaCha8Rng::seed_from_u64(5), &mut genome)
            .unwrap();
        assert_eq!(outcome, Outcome::NotApplicable);
        assert_eq!(before, weights(&genome));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let (population, _) = connected();
        assert!(MutateWeights::new(
            Arc::clone(&population),
            LinkSelection::Fixed(1),
            WeightMutation::Perturb { power: -1.0 },
        )
        .is_err());
        assert!(MutateWeights::new(
            population,
            LinkSelection::Proportion(-0.1),
            WeightMutation::Reset,
        )
        .is_err());
    }
}
