use crate::Innovation;

use thiserror::Error;

/// An error type indicating the neuron or link being
/// added to a genome, or the genome as a whole, is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// The neuron's ID is a duplicate.
    #[error("duplicate neuron insertion with id {0}")]
    DuplicateNeuronId(Innovation),
    /// The link's endpoints do not exist.
    #[error("link between nonexistant endpoint(s) {0} -> {1}")]
    NonexistentEndpoints(Innovation, Innovation),
    /// Two links share the same endpoints.
    #[error("link with endpoints {0} -> {1} shadows link with same endpoints")]
    DuplicateLink(Innovation, Innovation),
    /// The link targets an input or bias neuron.
    #[error("link with sensor neuron {0} as target")]
    SensorTarget(Innovation),
}

/// An error type indicating the innovation ledger
/// could not hand out an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The identifier counter overflowed. The last representable
    /// value, `usize::MAX`, is never handed out.
    #[error("innovation ledger exhausted its {0} identifiers")]
    Exhausted(&'static str),
}

/// An error type indicating an unusable configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A probability outside [0.0, 1.0].
    #[error("{0} must be a probability in [0, 1], got {1}")]
    Probability(&'static str, f32),
    /// A magnitude that is negative or not finite.
    #[error("{0} must be a finite non-negative magnitude, got {1}")]
    NegativeMagnitude(&'static str, f32),
    /// A lower link bound above the upper one.
    #[error("min_links ({min}) exceeds max_links ({max})")]
    LinkBounds { min: usize, max: usize },
    /// Operator weights that cannot form a distribution.
    #[error("invalid operator weights: {0}")]
    OperatorWeights(String),
}
