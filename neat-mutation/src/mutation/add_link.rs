use super::utils::{
    create_link, creates_cycle, is_duplicate_link, random_weight, select_random_neuron,
};
use super::{MutationError, MutationOperator, Outcome};
use crate::genomics::{Genome, NeuronType};
use crate::populations::Population;
use crate::Innovation;

use rand::RngCore;
use tracing::debug;

use std::sync::Arc;

/// Connects two previously unconnected neurons with a new link,
/// or re-enables the disabled link between them.
///
/// The source is drawn from every neuron and the target from the
/// non-sensor neurons. In feed-forward populations links leaving
/// an output neuron, self-links, and links closing a cycle are
/// rejected.
#[derive(Debug, Clone)]
pub struct AddLink {
    population: Arc<Population>,
}

impl AddLink {
    /// Returns an operator acting for `population`.
    pub fn new(population: Arc<Population>) -> AddLink {
        AddLink { population }
    }

    fn choose_endpoints(
        &self,
        rng: &mut dyn RngCore,
        genome: &Genome,
    ) -> Option<(Innovation, Innovation)> {
        let feed_forward = !self.population.allows_recurrence();

        for _ in 0..self.population.config().max_add_link_attempts {
            let (from, to) = match (
                select_random_neuron(rng, genome, true),
                select_random_neuron(rng, genome, false),
            ) {
                (Some(from), Some(to)) => (from, to),
                _ => continue,
            };

            if is_duplicate_link(genome, from, to) {
                continue;
            }
            if feed_forward {
                let from_output = genome
                    .neuron(from)
                    .map_or(false, |n| n.neuron_type() == NeuronType::Output);
                if from_output || creates_cycle(genome, from, to) {
                    continue;
                }
            }

            return Some((from, to));
        }

        None
    }
}

impl MutationOperator for AddLink {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let config = self.population.config();
        if let Some(max_links) = config.max_links {
            if genome.links().len() >= max_links {
                debug!(links = genome.links().len(), "link addition skipped, genome at size cap");
                return Ok(Outcome::NotApplicable);
            }
        }

        match self.choose_endpoints(rng, genome) {
            Some((from, to)) => {
                let weight = random_weight(rng, config.weight_bound);
                create_link(genome, from, to, weight)?;
                debug!(from, to, weight, "added link");
                Ok(Outcome::Mutated)
            }
            None => {
                debug!("no viable endpoint pair found for link addition");
                Ok(Outcome::NotApplicable)
            }
        }
    }
}
