//! Operations shared by every mutation operator.

use super::MutationError;
use crate::genomics::{Genome, GenomeError, LinkGene, NeuronType};
use crate::Innovation;

use ahash::RandomState;
use rand::{Rng, RngCore};
use tracing::trace;

use std::collections::HashSet;

/// Picks a uniformly random neuron id from the eligible
/// range of the neuron chromosome.
///
/// With `include_all` every neuron is eligible. Otherwise the
/// bias and input neurons are excluded, and in feed-forward
/// populations (one activation cycle) so are the output neurons.
///
/// Returns `None` if no neuron is eligible, in which
/// case the mutation doesn't apply this attempt.
///
/// # Examples
/// ```
/// use neat_mutation::genomics::{Genome, MutationConfig};
/// use neat_mutation::mutation::utils::select_random_neuron;
/// use neat_mutation::populations::Population;
/// use std::sync::Arc;
///
/// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
/// let mut rng = rand::thread_rng();
/// let genome = Genome::new(&population, &mut rng).unwrap();
///
/// // Bias, input and output neurons only: nothing left in a feed-forward population.
/// assert_eq!(select_random_neuron(&mut rng, &genome, false), None);
/// assert!(select_random_neuron(&mut rng, &genome, true).is_some());
/// ```
pub fn select_random_neuron(
    rng: &mut dyn RngCore,
    genome: &Genome,
    include_all: bool,
) -> Option<Innovation> {
    let start = if include_all {
        0
    } else if genome.population().activation_cycles() == 1 {
        1 + genome.input_count() + genome.output_count()
    } else {
        1 + genome.input_count()
    };
    let end = genome.neurons().len().checked_sub(1)?;

    if start > end {
        return None;
    }

    Some(genome.neurons()[rng.gen_range(start..=end)].id())
}

/// Creates an enabled link `from -> to` with the specified weight.
///
/// If the genome already holds a link gene with the same
/// endpoints, enabled or not, it is re-enabled and reweighted
/// instead. Otherwise the population's ledger supplies the
/// innovation number of the new gene.
///
/// # Errors
/// Returns an error if the ledger is exhausted or either
/// endpoint is absent from the genome.
///
/// # Examples
/// ```
/// use neat_mutation::genomics::{Genome, MutationConfig};
/// use neat_mutation::mutation::utils::create_link;
/// use neat_mutation::populations::Population;
/// use std::sync::Arc;
///
/// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
/// let mut genome = Genome::new(&population, &mut rand::thread_rng()).unwrap();
///
/// create_link(&mut genome, 1, 2, 0.5).unwrap();
/// create_link(&mut genome, 1, 2, -1.5).unwrap();
///
/// assert_eq!(genome.links().len(), 1);
/// assert_eq!(genome.links()[0].weight(), -1.5);
/// assert_eq!(genome.links()[0].innovation(), 1);
/// ```
pub fn create_link(
    genome: &mut Genome,
    from: Innovation,
    to: Innovation,
    weight: f32,
) -> Result<(), MutationError> {
    if let Some(link) = genome.link_mut(from, to) {
        link.set_enabled(true);
        link.set_weight(weight);
        trace!(from, to, "reactivated link");
        return Ok(());
    }
    if !(genome.contains_neuron(from) && genome.contains_neuron(to)) {
        return Err(GenomeError::NonexistentEndpoints(from, to).into());
    }

    let innovation = genome.population().innovations().find_or_create(from, to)?;
    genome.push_link(LinkGene::new(innovation, from, to, weight))?;
    trace!(from, to, innovation, "created link");
    Ok(())
}

/// Returns `true` if an _enabled_ link `from -> to` exists.
/// Disabled links are candidates for reactivation, not duplicates.
pub fn is_duplicate_link(genome: &Genome, from: Innovation, to: Innovation) -> bool {
    genome.link(from, to).map_or(false, LinkGene::enabled)
}

/// Returns `true` if the neuron must be kept in the genome.
///
/// Bias, input and output neurons are always needed. A hidden
/// neuron is needed while any link gene, enabled or not, starts
/// or ends at it. Absent neurons are not needed.
pub fn is_neuron_needed(genome: &Genome, neuron: Innovation) -> bool {
    match genome.neuron(neuron).map(|n| n.neuron_type()) {
        Some(NeuronType::Bias | NeuronType::Input | NeuronType::Output) => true,
        Some(NeuronType::Hidden) => genome.links().iter().any(|l| l.touches(neuron)),
        None => false,
    }
}

/// Removes the first neuron with the specified id from the genome.
/// Does nothing if there is none.
///
/// No links are removed: callers should check [`is_neuron_needed`]
/// first, so that no link is left dangling.
pub fn remove_neuron(genome: &mut Genome, neuron: Innovation) {
    let neurons = genome.neurons_mut();
    if let Some(position) = neurons.iter().position(|n| n.id() == neuron) {
        neurons.remove(position);
        trace!(neuron, "removed neuron");
    }
}

/// Returns `true` if a link `from -> to` would close a
/// directed cycle, considering every link gene whether
/// enabled or not. Self-links always do.
pub fn creates_cycle(genome: &Genome, from: Innovation, to: Innovation) -> bool {
    if from == to {
        return true;
    }

    let mut visited = HashSet::with_hasher(RandomState::new());
    let mut pending = vec![to];
    while let Some(current) = pending.pop() {
        if current == from {
            return true;
        }
        if visited.insert(current) {
            pending.extend(
                genome
                    .links()
                    .iter()
                    .filter(|l| l.from() == current)
                    .map(LinkGene::to),
            );
        }
    }

    false
}

/// Returns a random weight. Uses a uniform distribution
/// over the range ±`bound`.
pub fn random_weight(rng: &mut dyn RngCore, bound: f32) -> f32 {
    rng.gen_range(-bound..=bound)
}
