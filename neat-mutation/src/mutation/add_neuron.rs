use super::utils::create_link;
use super::{MutationError, MutationOperator, Outcome};
use crate::genomics::{ActivationType, Genome};
use crate::populations::Population;

use rand::seq::{IteratorRandom, SliceRandom};
use rand::RngCore;
use tracing::debug;

use std::sync::Arc;

/// Splits a random enabled link `a -> b` into `a -> n -> b`.
///
/// The split link is disabled. The link into the new neuron
/// has weight 1.0 and the link out of it inherits the split
/// link's weight, so the network's behaviour is initially
/// close to unchanged.
#[derive(Debug, Clone)]
pub struct AddNeuron {
    population: Arc<Population>,
}

impl AddNeuron {
    /// Returns an operator acting for `population`.
    pub fn new(population: Arc<Population>) -> AddNeuron {
        AddNeuron { population }
    }
}

impl MutationOperator for AddNeuron {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let split = genome
            .links()
            .iter()
            .filter(|l| l.enabled())
            .choose(rng)
            .map(|l| (l.from(), l.to(), l.weight()));
        let (from, to, weight) = match split {
            Some(split) => split,
            None => {
                debug!("no enabled link to split");
                return Ok(Outcome::NotApplicable);
            }
        };

        // The same link may be split again after being re-enabled,
        // in which case the recorded neuron is already present.
        let innovations = self.population.innovations();
        let mut neuron = innovations.split_neuron(from, to)?;
        if genome.contains_neuron(neuron) {
            neuron = innovations.fresh_neuron()?;
        }

        let activation = *self
            .population
            .config()
            .activation_types
            .choose(rng)
            .unwrap_or(&ActivationType::Sigmoid);

        if let Some(link) = genome.link_mut(from, to) {
            link.set_enabled(false);
        }
        genome.add_hidden_neuron(neuron, activation)?;
        create_link(genome, from, neuron, 1.0)?;
        create_link(genome, neuron, to, weight)?;

        debug!(from, to, neuron, "split link with new neuron");
        Ok(Outcome::Mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{MutationConfig, NeuronType};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(activation_types: Vec<ActivationType>) -> Arc<Population> {
        Arc::new(Population::new(MutationConfig {
            initial_expression_chance: 1.0,
            weight_bound: 3.0,
            activation_types,
            ..MutationConfig::zero()
        }).unwrap())
    }

    #[test]
    fn splits_enabled_link() {
        let population = population(vec![ActivationType::Gaussian]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        genome.link_mut(0, 2).unwrap().set_enabled(false);
        let old_weight = genome.link(1, 2).unwrap().weight();

        let outcome = AddNeuron::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        assert_eq!(outcome, Outcome::Mutated);
        // Neurons 0..=2 are reserved, so the first split neuron is 3.
        let neuron = genome.neuron(3).unwrap();
        assert_eq!(neuron.neuron_type(), NeuronType::Hidden);
        assert_eq!(neuron.activation(), ActivationType::Gaussian);

        assert!(!genome.link(1, 2).unwrap().enabled());
        assert_eq!(genome.link(1, 3).unwrap().weight(), 1.0);
        assert_eq!(genome.link(3, 2).unwrap().weight(), old_weight);
        assert!(genome.link(1, 3).unwrap().enabled());
        assert!(genome.link(3, 2).unwrap().enabled());
        assert_eq!(genome.links().len(), 4);
        genome.validate().unwrap();
    }

    #[test]
    fn identical_splits_share_innovations() {
        let population = population(vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut first = Genome::new(&population, &mut rng).unwrap();
        first.link_mut(0, 2).unwrap().set_enabled(false);
        let mut second = first.clone();

        let operator = AddNeuron::new(Arc::clone(&population));
        operator.mutate(&mut rng, &mut first).unwrap();
        operator.mutate(&mut rng, &mut second).unwrap();

        assert_eq!(first.neurons(), second.neurons());
        assert_eq!(
            first.link(1, 3).unwrap().innovation(),
            second.link(1, 3).unwrap().innovation()
        );
        assert_eq!(
            first.link(3, 2).unwrap().innovation(),
            second.link(3, 2).unwrap().innovation()
        );
        assert_eq!(first.neuron(3).unwrap().activation(), ActivationType::Sigmoid);
    }

    #[test]
    fn resplitting_allocates_fresh_neuron() {
        let population = population(vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        genome.link_mut(0, 2).unwrap().set_enabled(false);
        let operator = AddNeuron::new(Arc::clone(&population));

        operator.mutate(&mut rng, &mut genome).unwrap();
        // Re-enable the split link and leave it as the only candidate.
        genome.link_mut(1, 2).unwrap().set_enabled(true);
        genome.link_mut(1, 3).unwrap().set_enabled(false);
        genome.link_mut(3, 2).unwrap().set_enabled(false);
        operator.mutate(&mut rng, &mut genome).unwrap();

        let hidden: Vec<_> = genome
            .neurons()
            .iter()
            .filter(|n| n.neuron_type() == NeuronType::Hidden)
            .map(|n| n.id())
            .collect();
        assert_eq!(hidden, vec![3, 4]);
        assert!(genome.link(1, 4).is_some());
        assert!(genome.link(4, 2).is_some());
        genome.validate().unwrap();
    }

    #[test]
    fn not_applicable_without_enabled_links() {
        let population = population(vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        for link in genome.links_mut() {
            link.set_enabled(false);
        }

        let outcome = AddNeuron::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        assert_eq!(outcome, Outcome::NotApplicable);
        assert_eq!(genome.neurons().len(), 3);
    }
}
