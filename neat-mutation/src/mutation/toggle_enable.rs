use super::{MutationError, MutationOperator, Outcome};
use crate::genomics::Genome;
use crate::populations::Population;

use rand::seq::IteratorRandom;
use rand::RngCore;
use tracing::debug;

use std::sync::Arc;

/// Picks a random neuron with outgoing links and flips
/// the expression of one of those links.
#[derive(Debug, Clone)]
pub struct ToggleEnable {
    population: Arc<Population>,
}

impl ToggleEnable {
    /// Returns an operator acting for `population`.
    pub fn new(population: Arc<Population>) -> ToggleEnable {
        ToggleEnable { population }
    }
}

impl MutationOperator for ToggleEnable {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let source = genome
            .neurons()
            .iter()
            .map(|n| n.id())
            .filter(|&id| genome.links().iter().any(|l| l.from() == id))
            .choose(rng);
        let source = match source {
            Some(source) => source,
            None => return Ok(Outcome::NotApplicable),
        };

        let link = genome
            .links_mut()
            .iter_mut()
            .filter(|l| l.from() == source)
            .choose(rng);
        if let Some(link) = link {
            let enabled = !link.enabled();
            link.set_enabled(enabled);
            debug!(from = link.from(), to = link.to(), enabled, "toggled link");
        }

        Ok(Outcome::Mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::MutationConfig;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(expression: f32) -> Arc<Population> {
        Arc::new(Population::new(MutationConfig {
            initial_expression_chance: expression,
            ..MutationConfig::zero()
        }).unwrap())
    }

    #[test]
    fn toggles_exactly_one_link() {
        let population = population(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        let operator = ToggleEnable::new(Arc::clone(&population));

        assert!(operator.mutate(&mut rng, &mut genome).unwrap().is_mutated());
        assert_eq!(genome.links().iter().filter(|l| !l.enabled()).count(), 1);
        assert_eq!(genome.links().len(), 2);
    }

    #[test]
    fn toggling_twice_on_single_link_restores_it() {
        let population = population(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut genome = Genome::new(&population, &mut rng).unwrap();
        crate::mutation::utils::create_link(&mut genome, 1, 2, 0.5).unwrap();
        let operator = ToggleEnable::new(Arc::clone(&population));

        operator.mutate(&mut rng, &mut genome).unwrap();
        assert!(!genome.link(1, 2).unwrap().enabled());
        operator.mutate(&mut rng, &mut genome).unwrap();
        assert!(genome.link(1, 2).unwrap().enabled());
        assert_eq!(genome.link(1, 2).unwrap().weight(), 0.5);
    }

    #[test]
    fn not_applicable_without_links() {
        let population = population(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut genome = Genome::new(&population, &mut rng).unwrap();

        let outcome = ToggleEnable::new(Arc::clone(&population))
            .mutate(&mut rng, &mut genome)
            .unwrap();
        assert_eq!(outcome, Outcome::NotApplicable);
    }
}
