//! # NEAT-Mutation
//! The topology mutation engine of a NeuroEvolution of Augmenting Topologies
//! implementation, following the 2002 paper: <http://nn.cs.utexas.edu/keyword?stanley:ec02>
//!
//! Provides:
//! - [`Genome`]: an ordered neuron chromosome and link chromosome,
//!   bound to the [`Population`] it belongs to.
//! - [`InnovationLedger`]: the population-wide record that hands out the
//!   same innovation number to the same structural innovation, whichever
//!   lineage it appears in.
//! - [`mutation`]: the shared mutation utilities, the [`MutationOperator`]
//!   trait and a set of concrete operators built on them.
//!
//! Selection, speciation, crossover and phenotype decoding are left to
//! the surrounding evolutionary loop.
//!
//! [`Genome`]: crate::genomics::Genome
//! [`InnovationLedger`]: crate::genomics::InnovationLedger
//! [`Population`]: crate::populations::Population
//! [`MutationOperator`]: crate::mutation::MutationOperator
//!
//! # Example usage: mutating an offspring
//! ```
//! use neat_mutation::genomics::{Genome, MutationConfig};
//! use neat_mutation::mutation::{AddLink, MutationOperator};
//! use neat_mutation::populations::Population;
//! use rand::SeedableRng;
//! use std::num::NonZeroUsize;
//! use std::sync::Arc;
//!
//! let config = MutationConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     // Recurrent topologies allowed, so outputs are valid link targets.
//!     activation_cycles: NonZeroUsize::new(2).unwrap(),
//!     weight_bound: 5.0,
//!     max_add_link_attempts: 20,
//!     ..MutationConfig::zero()
//! };
//! let population = Arc::new(Population::new(config).unwrap());
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let parents = vec![Genome::new(&population, &mut rng).unwrap()];
//! let mut offspring: Vec<Option<Genome>> = vec![None];
//!
//! let add_link = AddLink::new(Arc::clone(&population));
//! add_link
//!     .perform_operation(&mut rng, &parents, 0, &mut offspring, 0)
//!     .unwrap();
//!
//! let child = offspring[0].as_ref().unwrap();
//! assert_eq!(child.links().len(), 1);
//! assert!(parents[0].links().is_empty());
//! ```

pub mod genomics;
pub mod mutation;
pub mod populations;

/// Identifier type used both for neuron ids and for
/// the innovation numbers that designate historically
/// identical link mutations.
pub type Innovation = usize;
