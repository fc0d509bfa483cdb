use crate::Innovation;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Links are the connective components of genomes.
/// They are created between two neurons, and become
/// network connections in the genome's phenotype.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LinkGene {
    innovation: Innovation,
    from: Innovation,
    to: Innovation,
    weight: f32,
    enabled: bool,
}

impl LinkGene {
    /// Returns a new _enabled_ link with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::LinkGene;
    ///
    /// let link = LinkGene::new(42, 3, 9, 2.0);
    ///
    /// assert_eq!(link.innovation(), 42);
    /// assert_eq!(link.endpoints(), (3, 9));
    /// assert_eq!(link.weight(), 2.0);
    /// assert!(link.enabled());
    /// ```
    pub fn new(innovation: Innovation, from: Innovation, to: Innovation, weight: f32) -> LinkGene {
        LinkGene {
            innovation,
            from,
            to,
            weight,
            enabled: true,
        }
    }

    /// Returns the link's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    /// Returns the id of the link's source neuron.
    pub fn from(&self) -> Innovation {
        self.from
    }

    /// Returns the id of the link's target neuron.
    pub fn to(&self) -> Innovation {
        self.to
    }

    /// Returns the link's source and target neuron ids.
    pub fn endpoints(&self) -> (Innovation, Innovation) {
        (self.from, self.to)
    }

    /// Returns `true` if the link connects `neuron`
    /// on either end.
    pub fn touches(&self, neuron: Innovation) -> bool {
        self.from == neuron || self.to == neuron
    }

    /// Returns the link's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the link's weight
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::LinkGene;
    ///
    /// let mut link = LinkGene::new(42, 3, 9, 2.0);
    ///
    /// link.set_weight(-5.0);
    ///
    /// assert_eq!(link.weight(), -5.0);
    /// ```
    pub fn set_weight(&mut self, w: f32) {
        self.weight = w;
    }

    /// Returns whether the link is expressed.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the link's expression status.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::LinkGene;
    ///
    /// let mut link = LinkGene::new(42, 3, 9, 2.0);
    ///
    /// link.set_enabled(false);
    ///
    /// assert!(!link.enabled());
    /// ```
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Display for LinkGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:?}[{:?}->{:?}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.innovation,
            self.from,
            self.to,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}
