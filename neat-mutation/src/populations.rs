//! A Population owns what the genomes of one evolutionary run
//! share: the mutation configuration, the innovation ledger,
//! and the factory used to copy parents into offspring slots.

use crate::genomics::{ConfigError, Genome, InnovationLedger, MutationConfig};

use std::fmt;

/// Produces offspring genomes from parent genomes.
///
/// Implementations must return a structurally independent
/// copy that still belongs to the parent's population.
pub trait GenomeFactory: Send + Sync {
    /// Returns a copy of `parent`, ready to be mutated.
    fn factor(&self, parent: &Genome) -> Genome;
}

/// The default [`GenomeFactory`], a plain deep copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct CloneFactory;

impl GenomeFactory for CloneFactory {
    fn factor(&self, parent: &Genome) -> Genome {
        parent.clone()
    }
}

/// The shared context of a set of genomes.
pub struct Population {
    config: MutationConfig,
    innovations: InnovationLedger,
    factory: Box<dyn GenomeFactory>,
}

impl Population {
    /// Creates a new population using the passed configuration
    /// and the [`CloneFactory`].
    ///
    /// Genomes refer back to their population, so it is
    /// usually placed in an `Arc` right away.
    ///
    /// # Errors
    /// Returns an error if `config` fails [`MutationConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::MutationConfig;
    /// use neat_mutation::populations::Population;
    /// use std::sync::Arc;
    ///
    /// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
    ///
    /// assert_eq!(population.activation_cycles(), 1);
    /// assert!(population.innovations().is_empty());
    ///
    /// let negative_bound = MutationConfig {
    ///     weight_bound: -1.0,
    ///     ..MutationConfig::zero()
    /// };
    /// assert!(Population::new(negative_bound).is_err());
    /// ```
    pub fn new(config: MutationConfig) -> Result<Population, ConfigError> {
        Self::with_factory(config, Box::new(CloneFactory))
    }

    /// Creates a new population using the passed configuration
    /// and genome factory.
    ///
    /// # Errors
    /// Returns an error if `config` fails [`MutationConfig::validate`].
    pub fn with_factory(
        config: MutationConfig,
        factory: Box<dyn GenomeFactory>,
    ) -> Result<Population, ConfigError> {
        config.validate()?;
        // Bias, inputs and outputs hold the lowest neuron ids.
        let reserved_neurons = 1 + config.input_count.get() + config.output_count.get();
        Ok(Population {
            innovations: InnovationLedger::new(reserved_neurons),
            config,
            factory,
        })
    }

    /// Returns the population's configuration.
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Returns the number of activation cycles decoded
    /// networks run. 1 means strictly feed-forward.
    pub fn activation_cycles(&self) -> usize {
        self.config.activation_cycles.get()
    }

    /// Returns `true` if genomes may contain recurrent links.
    pub fn allows_recurrence(&self) -> bool {
        self.config.allows_recurrence()
    }

    /// Returns the population's innovation ledger.
    pub fn innovations(&self) -> &InnovationLedger {
        &self.innovations
    }

    /// Returns the population's genome factory.
    pub fn factory(&self) -> &dyn GenomeFactory {
        self.factory.as_ref()
    }
}

impl fmt::Debug for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Population")
            .field("config", &self.config)
            .field("innovations", &self.innovations)
            .finish_non_exhaustive()
    }
}
