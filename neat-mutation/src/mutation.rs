//! Mutation operators produce one offspring from one parent,
//! editing a copy of the parent in place.
//!
//! Every operator implements [`MutationOperator`] and is built from
//! the shared operations in [`utils`], which keep link genes unique
//! and consult the population's innovation ledger when a new link
//! is introduced.

mod add_link;
mod add_neuron;
mod compound;
mod errors;
mod remove_link;
mod toggle_enable;
pub mod utils;
mod weights;

pub use add_link::AddLink;
pub use add_neuron::AddNeuron;
pub use compound::CompoundOperator;
pub use errors::MutationError;
pub use remove_link::RemoveLink;
pub use toggle_enable::ToggleEnable;
pub use weights::{LinkSelection, MutateWeights, WeightMutation};

use crate::genomics::Genome;
use crate::populations::Population;

use rand::RngCore;

use std::sync::Arc;

/// Result of a mutation attempt that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The genome was edited.
    Mutated,
    /// The mutation has nothing to act on in this genome,
    /// which is left unchanged.
    NotApplicable,
}

impl Outcome {
    /// Returns `true` if the genome was edited.
    pub fn is_mutated(self) -> bool {
        self == Outcome::Mutated
    }
}

/// An asexual NEAT operator: one parent in, one offspring out.
///
/// Operators receive the population they act for on construction
/// and hold no other mutable state, so one instance can be shared
/// by any number of worker threads. All randomness comes from the
/// `rng` passed to each call.
pub trait MutationOperator: Send + Sync {
    /// Returns the population the operator acts for.
    fn population(&self) -> &Arc<Population>;

    /// Applies the operator's edit to `genome` in place.
    ///
    /// # Errors
    /// Returns an error if the edit could not be carried out
    /// without breaking the genome's or the ledger's invariants.
    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError>;

    /// Number of parents consumed per operation.
    fn parents_needed(&self) -> usize {
        1
    }

    /// Number of offspring produced per operation.
    fn offspring_produced(&self) -> usize {
        1
    }

    /// Copies `parents[parent_index]` into `offspring[offspring_index]`
    /// and mutates the copy held in that slot.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    ///
    /// # Errors
    /// See [`mutate`](MutationOperator::mutate).
    fn perform_operation(
        &self,
        rng: &mut dyn RngCore,
        parents: &[Genome],
        parent_index: usize,
        offspring: &mut [Option<Genome>],
        offspring_index: usize,
    ) -> Result<Outcome, MutationError> {
        let target = obtain_mutation_target(
            self.population(),
            parents,
            parent_index,
            offspring,
            offspring_index,
        );
        self.mutate(rng, target)
    }
}

/// Copies `parents[parent_index]` through the population's genome
/// factory, moves the copy into `offspring[offspring_index]`, and
/// returns the copy now held by that slot.
///
/// # Panics
/// Panics if either index is out of bounds. In debug builds, also
/// panics if the factory returned a genome belonging to a different
/// population.
///
/// # Examples
/// ```
/// use neat_mutation::genomics::{Genome, MutationConfig};
/// use neat_mutation::mutation::obtain_mutation_target;
/// use neat_mutation::populations::Population;
/// use std::sync::Arc;
///
/// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
/// let parents = vec![Genome::new(&population, &mut rand::thread_rng()).unwrap()];
/// let mut offspring: Vec<Option<Genome>> = vec![None, None];
///
/// let target = obtain_mutation_target(&population, &parents, 0, &mut offspring, 1);
/// assert_eq!(target.neurons().len(), 3);
///
/// assert!(offspring[0].is_none());
/// assert!(offspring[1].is_some());
/// ```
pub fn obtain_mutation_target<'a>(
    population: &Population,
    parents: &[Genome],
    parent_index: usize,
    offspring: &'a mut [Option<Genome>],
    offspring_index: usize,
) -> &'a mut Genome {
    let parent = &parents[parent_index];
    let child = population.factory().factor(parent);
    debug_assert!(
        Arc::ptr_eq(parent.population(), child.population()),
        "genome factory changed the offspring's population"
    );
    offspring[offspring_index].insert(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{MutationConfig, NeuronType};
    use crate::populations::GenomeFactory;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Sets every link weight to a marker value.
    struct MarkWeights(Arc<Population>);

    impl MutationOperator for MarkWeights {
        fn population(&self) -> &Arc<Population> {
            &self.0
        }

        fn mutate(&self, _: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
            for link in genome.links_mut() {
                link.set_weight(42.0);
            }
            Ok(Outcome::Mutated)
        }
    }

    struct CountingFactory(Arc<AtomicUsize>);

    impl GenomeFactory for CountingFactory {
        fn factor(&self, parent: &Genome) -> Genome {
            self.0.fetch_add(1, Ordering::SeqCst);
            parent.clone()
        }
    }

    fn connected_population() -> Arc<Population> {
        Arc::new(Population::new(MutationConfig {
            initial_expression_chance: 1.0,
            weight_bound: 1.0,
            ..MutationConfig::zero()
        }).unwrap())
    }

    #[test]
    fn operators_are_single_parent_single_child() {
        let operator = MarkWeights(connected_population());
        assert_eq!(operator.parents_needed(), 1);
        assert_eq!(operator.offspring_produced(), 1);
    }

    #[test]
    fn offspring_slot_holds_mutated_copy() {
        let population = connected_population();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let parents = vec![
            Genome::new(&population, &mut rng).unwrap(),
            Genome::new(&population, &mut rng).unwrap(),
        ];
        let mut offspring: Vec<Option<Genome>> = vec![None, None, None];

        let outcome = MarkWeights(Arc::clone(&population))
            .perform_operation(&mut rng, &parents, 1, &mut offspring, 2)
            .unwrap();

        assert_eq!(outcome, Outcome::Mutated);
        assert!(offspring[0].is_none() && offspring[1].is_none());
        let child = offspring[2].as_ref().unwrap();
        assert!(child.links().iter().all(|l| l.weight() == 42.0));
        assert!(parents[1].links().iter().all(|l| l.weight() != 42.0));
        assert_eq!(child.neurons(), parents[1].neurons());
    }

    #[test]
    fn offspring_slot_is_replaced() {
        let population = connected_population();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let parents = vec![Genome::new(&population, &mut rng).unwrap()];
        let mut stale = parents[0].clone();
        stale
            .add_hidden_neuron(99, crate::genomics::ActivationType::Sigmoid)
            .unwrap();
        let mut offspring = vec![Some(stale)];

        let target = obtain_mutation_target(&population, &parents, 0, &mut offspring, 0);
        assert!(target.neuron(99).is_none());
        target.links_mut()[0].set_weight(7.0);

        let child = offspring[0].as_ref().unwrap();
        assert_eq!(child.links()[0].weight(), 7.0);
        assert!(child
            .neurons()
            .iter()
            .all(|n| n.neuron_type() != NeuronType::Hidden));
    }

    #[test]
    fn clones_through_population_factory() {
        let copies = Arc::new(AtomicUsize::new(0));
        let population = Arc::new(Population::with_factory(
            MutationConfig::zero(),
            Box::new(CountingFactory(Arc::clone(&copies))),
        ).unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let parents = vec![Genome::new(&population, &mut rng).unwrap()];
        let mut offspring: Vec<Option<Genome>> = vec![None];

        let operator = MarkWeights(Arc::clone(&population));
        for _ in 0..3 {
            operator
                .perform_operation(&mut rng, &parents, 0, &mut offspring, 0)
                .unwrap();
        }

        assert_eq!(copies.load(Ordering::SeqCst), 3);
        assert!(offspring[0].is_some());
    }

    #[test]
    #[should_panic]
    fn out_of_range_parent_panics() {
        let population = connected_population();
        let parents: Vec<Genome> = vec![];
        let mut offspring: Vec<Option<Genome>> = vec![None];
        obtain_mutation_target(&population, &parents, 0, &mut offspring, 0);
    }
}
