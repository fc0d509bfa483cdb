use super::{ActivationType, ConfigError};

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation
/// and mutation.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Use
/// [`validate`] to check a configuration
/// loaded from an external source.
///
/// [`validate`]: MutationConfig::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Number of inputs in a genome, not counting the bias neuron.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Number of activation cycles the decoded network runs.
    /// A value of 1 means the topology must stay strictly
    /// feed-forward; anything greater allows recurrent links.
    pub activation_cycles: NonZeroUsize,
    /// Possible activation types for hidden neurons.
    /// If an empty vector is given, neurons will default
    /// to [`Sigmoid`].
    ///
    /// [`Sigmoid`]: crate::genomics::ActivationType
    pub activation_types: Vec<ActivationType>,
    /// Chance that a link between an input (or the bias)
    /// and an output is created during initial genome generation.
    pub initial_expression_chance: f32,
    /// Maximum magnitude of a link's weight.
    pub weight_bound: f32,
    /// Magnitude of bound on the weight perturbation uniform distribution.
    /// Perturbed weights are clamped to [`weight_bound`], so larger
    /// values are accepted.
    ///
    /// [`weight_bound`]: MutationConfig::weight_bound
    pub weight_mutation_power: f32,
    /// Maximum number of endpoint pairs tried by a link
    /// addition mutation before giving up.
    pub max_add_link_attempts: usize,
    /// Maximum number of link genes a genome may hold
    /// before link addition stops applying. `None` is unbounded.
    pub max_links: Option<usize>,
    /// Number of link genes below which link removal
    /// stops applying.
    pub min_links: usize,
}

impl MutationConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, empty, `None`, or in the case of
    /// `NonZeroUsize`s, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::MutationConfig;
    ///
    /// let cfg1 = MutationConfig::zero();
    ///
    /// let cfg2 = MutationConfig {
    ///     // Specify some values here...
    ///     weight_bound: 5.0,
    ///     max_add_link_attempts: 20,
    ///     // Default the rest...
    ///     ..MutationConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> MutationConfig {
        MutationConfig {
            // SAFETY: 1 is a valid NonZeroUsize. Replace this with
            // NonZeroUsize::new(1).unwrap() once const Option::unwrap
            // becomes stable.
            input_count: unsafe { NonZeroUsize::new_unchecked(1) },
            output_count: unsafe { NonZeroUsize::new_unchecked(1) },
            activation_cycles: unsafe { NonZeroUsize::new_unchecked(1) },
            activation_types: vec![],
            initial_expression_chance: 0.0,
            weight_bound: 0.0,
            weight_mutation_power: 0.0,
            max_add_link_attempts: 0,
            max_links: None,
            min_links: 0,
        }
    }

    /// Returns `true` if genomes may contain recurrent links.
    pub fn allows_recurrence(&self) -> bool {
        self.activation_cycles.get() > 1
    }

    /// Checks that the configured values are usable.
    ///
    /// # Errors
    /// Returns an error naming the first offending field.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::MutationConfig;
    ///
    /// assert!(MutationConfig::zero().validate().is_ok());
    ///
    /// let bad = MutationConfig {
    ///     weight_bound: -1.0,
    ///     ..MutationConfig::zero()
    /// };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.initial_expression_chance) {
            return Err(ConfigError::Probability(
                "initial_expression_chance",
                self.initial_expression_chance,
            ));
        }
        if !self.weight_bound.is_finite() || self.weight_bound < 0.0 {
            return Err(ConfigError::NegativeMagnitude(
                "weight_bound",
                self.weight_bound,
            ));
        }
        if !self.weight_mutation_power.is_finite() || self.weight_mutation_power < 0.0 {
            return Err(ConfigError::NegativeMagnitude(
                "weight_mutation_power",
                self.weight_mutation_power,
            ));
        }
        if let Some(max_links) = self.max_links {
            if max_links < self.min_links {
                return Err(ConfigError::LinkBounds {
                    min: self.min_links,
                    max: max_links,
                });
            }
        }
        Ok(())
    }
}
