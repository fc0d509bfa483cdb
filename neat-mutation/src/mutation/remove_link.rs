use super::utils::{is_neuron_needed, remove_neuron};
use super::{MutationError, MutationOperator, Outcome};
use crate::genomics::Genome;
use crate::populations::Population;

use rand::{Rng, RngCore};
use tracing::debug;

use std::sync::Arc;

/// Deletes a random link gene, then prunes whichever of its
/// endpoints is a hidden neuron left without any link.
#[derive(Debug, Clone)]
pub struct RemoveLink {
    population: Arc<Population>,
}

impl RemoveLink {
    /// Returns an operator acting for `population`.
    pub fn new(population: Arc<Population>) -> RemoveLink {
        RemoveLink { population }
    }
}

impl MutationOperator for RemoveLink {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let link_count = genome.links().len();
        if link_count == 0 || link_count <= self.population.config().min_links {
            debug!(links = link_count, "link removal skipped, genome at minimum size");
            return Ok(Outcome::NotApplicable);
        }

        let removed = genome.links_vec_mut().remove(rng.gen_range(0..link_count));
        let (from, to) = removed.endpoints();
        debug!(from, to, innovation = removed.innovation(), "removed link");

        for neuron in [from, to] {
            if genome.contains_neuron(neuron) && !is_neuron_needed(genome, neuron) {
                remove_neuron(genome, neuron);
                debug!(neuron, "pruned unlinked neuron");
            }
        }

        Ok(Outcome::Mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{ActivationType, MutationConfig, NeuronType};
    use crate::mutation::utils::create_link;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(min_links: usize) -> Arc<Population> {
        Arc::new(Population::new(MutationConfig {
            min_links,
            ..MutationConfig::zero()
        }).unwrap())
    }

    #[test]
    fn prunes_orphaned_hidden_neuron() {
        let population = population(0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        genome.add_hidden_neuron(3, ActivationType::Sigmoid).unwrap();
        create_link(&mut genome, 1, 3, 1.0).unwrap();

        let outcome = RemoveLink::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        assert_eq!(outcome, Outcome::Mutated);
        assert!(genome.links().is_empty());
        assert!(genome.neuron(3).is_none());
        assert_eq!(genome.neurons().len(), 3);
    }

    #[test]
    fn keeps_linked_hidden_neuron() {
        let population = population(1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        genome.add_hidden_neuron(3, ActivationType::Sigmoid).unwrap();
        create_link(&mut genome, 1, 3, 1.0).unwrap();
        create_link(&mut genome, 3, 2, 1.0).unwrap();

        RemoveLink::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        assert_eq!(genome.links().len(), 1);
        assert!(genome.neuron(3).is_some());
        genome.validate().unwrap();
    }

    #[test]
    fn never_prunes_sensors_or_outputs() {
        let population = population(0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        create_link(&mut genome, 0, 2, 1.0).unwrap();
        create_link(&mut genome, 1, 2, 1.0).unwrap();
        let operator = RemoveLink::new(Arc::clone(&population));

        assert!(operator.mutate(&mut rng, &mut genome).unwrap().is_mutated());
        assert!(operator.mutate(&mut rng, &mut genome).unwrap().is_mutated());

        assert!(genome.links().is_empty());
        let types: Vec<NeuronType> = genome.neurons().iter().map(|n| n.neuron_type()).collect();
        assert_eq!(types, vec![NeuronType::Bias, NeuronType::Input, NeuronType::Output]);
    }

    #[test]
    fn respects_minimum_size() {
        let population = population(1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        create_link(&mut genome, 1, 2, 1.0).unwrap();

        let outcome = RemoveLink::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();

        assert_eq!(outcome, Outcome::NotApplicable);
        assert_eq!(genome.links().len(), 1);
    }
}
