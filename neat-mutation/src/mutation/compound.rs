use super::{
    AddLink, AddNeuron, MutateWeights, MutationError, MutationOperator, Outcome, RemoveLink,
    ToggleEnable,
};
use crate::genomics::{ConfigError, Genome};
use crate::populations::Population;

use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use tracing::trace;

use std::fmt;
use std::sync::Arc;

/// Applies one of several operators, chosen at random
/// in proportion to their weights.
///
/// If the chosen operator does not apply to the genome,
/// the following ones are tried in turn, so the genome
/// is left unchanged only when none of them apply.
pub struct CompoundOperator {
    population: Arc<Population>,
    operators: Vec<Box<dyn MutationOperator>>,
    distribution: WeightedIndex<f32>,
}

impl CompoundOperator {
    /// Returns an operator choosing between `operators`.
    ///
    /// # Errors
    /// Returns an error if there are no operators, or the weights
    /// are negative or sum to zero.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::MutationConfig;
    /// use neat_mutation::mutation::{AddLink, AddNeuron, CompoundOperator, MutationOperator};
    /// use neat_mutation::populations::Population;
    /// use std::sync::Arc;
    ///
    /// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
    ///
    /// let operator = CompoundOperator::new(
    ///     Arc::clone(&population),
    ///     vec![
    ///         (0.9, Box::new(AddLink::new(Arc::clone(&population))) as Box<dyn MutationOperator>),
    ///         (0.1, Box::new(AddNeuron::new(Arc::clone(&population)))),
    ///     ],
    /// );
    /// assert!(operator.is_ok());
    ///
    /// assert!(CompoundOperator::new(population, vec![]).is_err());
    /// ```
    pub fn new(
        population: Arc<Population>,
        operators: Vec<(f32, Box<dyn MutationOperator>)>,
    ) -> Result<CompoundOperator, ConfigError> {
        let (weights, operators): (Vec<f32>, Vec<_>) = operators.into_iter().unzip();
        let distribution = WeightedIndex::new(&weights)
            .map_err(|e| ConfigError::OperatorWeights(e.to_string()))?;
        Ok(CompoundOperator {
            population,
            operators,
            distribution,
        })
    }

    /// Returns the usual mix of NEAT mutations: mostly weight
    /// perturbation, with occasional structural changes.
    pub fn standard(population: Arc<Population>) -> CompoundOperator {
        let operators: Vec<(f32, Box<dyn MutationOperator>)> = vec![
            (0.80, Box::new(MutateWeights::perturb_all(Arc::clone(&population)))),
            (0.10, Box::new(AddLink::new(Arc::clone(&population)))),
            (0.03, Box::new(AddNeuron::new(Arc::clone(&population)))),
            (0.02, Box::new(RemoveLink::new(Arc::clone(&population)))),
            (0.05, Box::new(ToggleEnable::new(Arc::clone(&population)))),
        ];
        let (weights, operators): (Vec<f32>, Vec<_>) = operators.into_iter().unzip();
        CompoundOperator {
            distribution: WeightedIndex::new(&weights)
                .unwrap_or_else(|e| unreachable!("constant operator weights: {}", e)),
            population,
            operators,
        }
    }

    /// Returns the number of operators to choose from.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns `true` if there are no operators. Never
    /// the case for a successfully constructed instance.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl MutationOperator for CompoundOperator {
    fn population(&self) -> &Arc<Population> {
        &self.population
    }

    fn mutate(&self, rng: &mut dyn RngCore, genome: &mut Genome) -> Result<Outcome, MutationError> {
        let first = self.distribution.sample(rng);
        let count = self.operators.len();

        for offset in 0..count {
            let index = (first + offset) % count;
            let outcome = self.operators[index].mutate(rng, genome)?;
            if outcome.is_mutated() {
                debug_assert_eq!(genome.validate(), Ok(()), "mutation broke genome invariants");
                return Ok(outcome);
            }
            trace!(index, "operator not applicable, trying next");
        }

        Ok(Outcome::NotApplicable)
    }
}

impl fmt::Debug for CompoundOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundOperator")
            .field("operators", &self.operators.len())
            .field("distribution", &self.distribution)
            .finish_non_exhaustive()
    }
}
