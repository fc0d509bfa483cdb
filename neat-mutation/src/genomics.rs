//! Genomes are the focus of evolution in NEAT.
//! They are an ordered collection of neurons and the links between
//! them, which can be progressively mutated, thus adding complexity
//! and functionality.

mod config;
mod errors;
mod ledger;
mod links;
mod neurons;

pub use config::MutationConfig;
pub use errors::{ConfigError, GenomeError, LedgerError};
pub use ledger::InnovationLedger;
pub use links::LinkGene;
pub use neurons::{ActivationType, NeuronGene, NeuronType};

use crate::populations::Population;
use crate::Innovation;

use ahash::RandomState;
use rand::{Rng, RngCore};

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A mutable collection of neurons and links.
///
/// The neuron chromosome is ordered as the bias neuron,
/// followed by the input neurons, the output neurons,
/// and finally any hidden neurons. Cloning a genome yields
/// a structurally independent copy belonging to the same
/// population.
#[derive(Clone)]
pub struct Genome {
    neurons: Vec<NeuronGene>,
    links: Vec<LinkGene>,
    input_count: usize,
    output_count: usize,
    population: Arc<Population>,
}

impl Genome {
    /// Create a new genome for the specified population.
    ///
    /// Neuron 0 is the bias, neurons `1..=input_count` are the inputs
    /// and the following `output_count` ids are the outputs. Each pair
    /// of input (or bias) and output neurons is linked with probability
    /// [`initial_expression_chance`], with the link's innovation number
    /// taken from the population's ledger.
    ///
    /// [`initial_expression_chance`]: MutationConfig::initial_expression_chance
    ///
    /// # Errors
    /// Returns an error if the population's ledger is exhausted.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::{Genome, MutationConfig, NeuronType};
    /// use neat_mutation::populations::Population;
    /// use std::num::NonZeroUsize;
    /// use std::sync::Arc;
    ///
    /// let config = MutationConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     initial_expression_chance: 1.0,
    ///     weight_bound: 5.0,
    ///     ..MutationConfig::zero()
    /// };
    /// let population = Arc::new(Population::new(config).unwrap());
    ///
    /// let genome = Genome::new(&population, &mut rand::thread_rng()).unwrap();
    ///
    /// // As configured, the genome should have 1 bias + 3 inputs + 2 outputs.
    /// assert_eq!(genome.neurons().len(), 1 + 3 + 2);
    /// assert_eq!(genome.neurons()[0].neuron_type(), NeuronType::Bias);
    ///
    /// // And with an initial_expression_chance of 1, every sensor reaches every output.
    /// assert_eq!(genome.links().len(), (1 + 3) * 2);
    /// assert!(genome.links().iter().all(|l| l.weight().abs() <= 5.0));
    /// ```
    pub fn new<R>(population: &Arc<Population>, rng: &mut R) -> Result<Genome, LedgerError>
    where
        R: RngCore + ?Sized,
    {
        let config = population.config();
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();

        let mut genome = Genome {
            neurons: Self::generate_neurons(input_count, output_count),
            links: Vec::new(),
            input_count,
            output_count,
            population: Arc::clone(population),
        };

        if config.initial_expression_chance != 0.0 {
            for from in 0..=input_count {
                for to in (input_count + 1)..=(input_count + output_count) {
                    if rng.gen::<f32>() < config.initial_expression_chance {
                        let weight = rng.gen_range(-config.weight_bound..=config.weight_bound);
                        let innovation = population.innovations().find_or_create(from, to)?;
                        genome.links.push(LinkGene::new(innovation, from, to, weight));
                    }
                }
            }
        }

        Ok(genome)
    }

    fn generate_neurons(input_count: usize, output_count: usize) -> Vec<NeuronGene> {
        let mut neurons = Vec::with_capacity(1 + input_count + output_count);

        neurons.push(NeuronGene::new(0, NeuronType::Bias, ActivationType::Identity));
        for i in 1..=input_count {
            neurons.push(NeuronGene::new(i, NeuronType::Input, ActivationType::Identity));
        }
        for o in 0..output_count {
            neurons.push(NeuronGene::new(
                1 + input_count + o,
                NeuronType::Output,
                ActivationType::Sigmoid,
            ));
        }

        neurons
    }

    /// Add a new hidden neuron to the end of the neuron chromosome.
    /// Returns a reference to the newly created neuron.
    ///
    /// # Errors
    /// Returns an error if a neuron with the same id
    /// already exists in the genome.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::{ActivationType, Genome, MutationConfig, NeuronType};
    /// use neat_mutation::populations::Population;
    /// use std::sync::Arc;
    ///
    /// let population = Arc::new(Population::new(MutationConfig::zero()).unwrap());
    /// let mut genome = Genome::new(&population, &mut rand::thread_rng()).unwrap();
    ///
    /// let neuron = genome.add_hidden_neuron(42, ActivationType::ReLU).unwrap();
    /// assert_eq!(neuron.neuron_type(), NeuronType::Hidden);
    ///
    /// // Ids are unique within a genome.
    /// assert!(genome.add_hidden_neuron(42, ActivationType::ReLU).is_err());
    /// assert!(genome.add_hidden_neuron(0, ActivationType::ReLU).is_err());
    /// ```
    pub fn add_hidden_neuron(
        &mut self,
        id: Innovation,
        activation: ActivationType,
    ) -> Result<&mut NeuronGene, GenomeError> {
        if self.contains_neuron(id) {
            return Err(GenomeError::DuplicateNeuronId(id));
        }
        self.neurons
            .push(NeuronGene::new(id, NeuronType::Hidden, activation));
        let last = self.neurons.len() - 1;
        Ok(&mut self.neurons[last])
    }

    /// Appends a link gene, checking that its endpoints
    /// exist and that it doesn't shadow an existing link.
    pub(crate) fn push_link(&mut self, link: LinkGene) -> Result<(), GenomeError> {
        let (from, to) = link.endpoints();
        let target_is_sensor = match (self.neuron(from), self.neuron(to)) {
            (Some(_), Some(target)) => target.neuron_type().is_sensor(),
            _ => return Err(GenomeError::NonexistentEndpoints(from, to)),
        };
        if target_is_sensor {
            Err(GenomeError::SensorTarget(to))
        } else if self.link(from, to).is_some() {
            Err(GenomeError::DuplicateLink(from, to))
        } else {
            self.links.push(link);
            Ok(())
        }
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut Vec<NeuronGene> {
        &mut self.neurons
    }

    pub(crate) fn links_vec_mut(&mut self) -> &mut Vec<LinkGene> {
        &mut self.links
    }

    /// Returns the neuron chromosome.
    pub fn neurons(&self) -> &[NeuronGene] {
        &self.neurons
    }

    /// Returns the link chromosome.
    pub fn links(&self) -> &[LinkGene] {
        &self.links
    }

    /// Returns the link chromosome for in-place edits of
    /// weights and expression. Links cannot be added or
    /// removed through this slice.
    pub fn links_mut(&mut self) -> &mut [LinkGene] {
        &mut self.links
    }

    /// Returns the neuron with the specified id, if present.
    pub fn neuron(&self, id: Innovation) -> Option<&NeuronGene> {
        self.neurons.iter().find(|n| n.id() == id)
    }

    /// Returns `true` if a neuron with the specified id is present.
    pub fn contains_neuron(&self, id: Innovation) -> bool {
        self.neuron(id).is_some()
    }

    /// Returns the link between the specified neurons, if present,
    /// whether enabled or not.
    pub fn link(&self, from: Innovation, to: Innovation) -> Option<&LinkGene> {
        self.links.iter().find(|l| l.endpoints() == (from, to))
    }

    /// Returns the link between the specified neurons mutably, if present.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::{Genome, MutationConfig};
    /// use neat_mutation::populations::Population;
    /// use std::sync::Arc;
    ///
    /// let config = MutationConfig {
    ///     initial_expression_chance: 1.0,
    ///     ..MutationConfig::zero()
    /// };
    /// let population = Arc::new(Population::new(config).unwrap());
    /// let mut genome = Genome::new(&population, &mut rand::thread_rng()).unwrap();
    ///
    /// genome.link_mut(1, 2).unwrap().set_enabled(false);
    /// assert!(!genome.link(1, 2).unwrap().enabled());
    /// ```
    pub fn link_mut(&mut self, from: Innovation, to: Innovation) -> Option<&mut LinkGene> {
        self.links.iter_mut().find(|l| l.endpoints() == (from, to))
    }

    /// Returns the number of input neurons, not counting the bias.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Returns the number of output neurons.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the population the genome belongs to.
    pub fn population(&self) -> &Arc<Population> {
        &self.population
    }

    /// Checks the structural invariants of the genome: unique
    /// neuron ids, links only between present neurons, at most
    /// one link per ordered pair of neurons, and no links into
    /// sensor neurons.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), GenomeError> {
        let mut ids = HashSet::with_capacity_and_hasher(self.neurons.len(), RandomState::new());
        for neuron in &self.neurons {
            if !ids.insert(neuron.id()) {
                return Err(GenomeError::DuplicateNeuronId(neuron.id()));
            }
        }

        let mut pairs = HashSet::with_capacity_and_hasher(self.links.len(), RandomState::new());
        for link in &self.links {
            let (from, to) = link.endpoints();
            if !(ids.contains(&from) && ids.contains(&to)) {
                return Err(GenomeError::NonexistentEndpoints(from, to));
            }
            if !pairs.insert((from, to)) {
                return Err(GenomeError::DuplicateLink(from, to));
            }
            if self.neuron(to).map_or(false, |n| n.neuron_type().is_sensor()) {
                return Err(GenomeError::SensorTarget(to));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome")
            .field("neurons", &self.neurons)
            .field("links", &self.links)
            .field("input_count", &self.input_count)
            .field("output_count", &self.output_count)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neurons: Vec<String> = self.neurons.iter().map(|n| n.to_string()).collect();
        let links: Vec<String> = self.links.iter().map(|l| l.to_string()).collect();
        write!(
            f,
            "Genome {{\n\tneurons: [{}]\n\tlinks: [{}]\n}}",
            neurons.join(", "),
            links.join(", "),
        )
    }
}
