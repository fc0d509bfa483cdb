use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// An ActivationType represents the type
/// of activation function the neuron's network
/// equivalent will use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActivationType {
    // 1 / (1 + exp(-4.9x))
    Sigmoid,
    // x
    Identity,
    // 0   if x < 0
    // x   if x ≥ 0
    ReLU,
    // exp(-x²)
    Gaussian,
    // sin(πx)
    Sinusoidal,
}

/// A NeuronType indicates the function of
/// the neuron's network equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeuronType {
    /// Constant-output neuron.
    Bias,
    /// Input neurons.
    Input,
    /// Output neurons.
    Output,
    /// Hidden neurons.
    Hidden,
}

impl NeuronType {
    /// Returns `true` for neuron types that can never
    /// be the target of a link.
    pub fn is_sensor(self) -> bool {
        matches!(self, NeuronType::Bias | NeuronType::Input)
    }
}

/// Neurons are the structural elements of genomes
/// between which links are created.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NeuronGene {
    id: Innovation,
    neuron_type: NeuronType,
    activation: ActivationType,
}

impl NeuronGene {
    /// Generate a new neuron with the passed parameters.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::{ActivationType, NeuronGene, NeuronType};
    ///
    /// let neuron = NeuronGene::new(5, NeuronType::Hidden, ActivationType::Sigmoid);
    ///
    /// assert_eq!(neuron.id(), 5);
    /// assert_eq!(neuron.neuron_type(), NeuronType::Hidden);
    /// assert_eq!(neuron.activation(), ActivationType::Sigmoid);
    /// ```
    pub fn new(id: Innovation, neuron_type: NeuronType, activation: ActivationType) -> NeuronGene {
        NeuronGene {
            id,
            neuron_type,
            activation,
        }
    }

    /// Returns the neuron's id.
    pub fn id(&self) -> Innovation {
        self.id
    }

    /// Returns the neuron's type.
    pub fn neuron_type(&self) -> NeuronType {
        self.neuron_type
    }

    /// Returns the neuron's activation type.
    pub fn activation(&self) -> ActivationType {
        self.activation
    }

    /// Sets the neuron's activation type.
    pub fn set_activation(&mut self, activation: ActivationType) {
        self.activation = activation;
    }
}

impl fmt::Display for NeuronGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{:?}, {:?}]",
            self.id, self.neuron_type, self.activation
        )
    }
}
