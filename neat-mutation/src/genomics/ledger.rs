use super::LedgerError;
use crate::Innovation;

use ahash::RandomState;
use parking_lot::Mutex;
use tracing::trace;

use std::collections::HashMap;

/// An `InnovationLedger` keeps track of link and neuron innovations
/// in a population, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// For link innovations the source and target neurons identify
/// identical mutations, and the corresponding innovation number
/// is recorded. Link innovation numbers start at 1.
///
/// For neuron innovations the endpoints of the split link identify
/// identical mutations, and the id of the neuron inserted in between
/// is recorded.
///
/// Records are never removed. Every public operation runs as a
/// single critical section, so the ledger can be shared between
/// worker threads through the owning population.
#[derive(Debug)]
pub struct InnovationLedger {
    state: Mutex<LedgerState>,
}

#[derive(Debug, Clone)]
struct LedgerState {
    next_link_innovation: Innovation,
    next_neuron_id: Innovation,
    link_innovations: HashMap<(Innovation, Innovation), Innovation, RandomState>,
    link_endpoints: Vec<(Innovation, Innovation)>,
    neuron_splits: HashMap<(Innovation, Innovation), Innovation, RandomState>,
}

impl LedgerState {
    fn allocate_link(&mut self, from: Innovation, to: Innovation) -> Result<Innovation, LedgerError> {
        let innovation = self.next_link_innovation;
        self.next_link_innovation = innovation
            .checked_add(1)
            .ok_or(LedgerError::Exhausted("link innovation"))?;
        self.link_endpoints.push((from, to));
        Ok(innovation)
    }

    fn allocate_neuron(&mut self) -> Result<Innovation, LedgerError> {
        let id = self.next_neuron_id;
        self.next_neuron_id = id
            .checked_add(1)
            .ok_or(LedgerError::Exhausted("neuron id"))?;
        Ok(id)
    }
}

impl InnovationLedger {
    /// Creates an empty ledger. Neuron ids below `reserved_neurons`
    /// are considered taken by the initial bias, input and output
    /// neurons of every genome.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::InnovationLedger;
    ///
    /// let ledger = InnovationLedger::new(3);
    ///
    /// assert!(ledger.is_empty());
    /// assert_eq!(ledger.fresh_neuron().unwrap(), 3);
    /// ```
    pub fn new(reserved_neurons: usize) -> InnovationLedger {
        InnovationLedger {
            state: Mutex::new(LedgerState {
                next_link_innovation: 1,
                next_neuron_id: reserved_neurons,
                link_innovations: HashMap::default(),
                link_endpoints: Vec::new(),
                neuron_splits: HashMap::default(),
            }),
        }
    }

    /// Returns the innovation number previously assigned to a link
    /// `from -> to`, or records the link and returns a new number.
    ///
    /// # Errors
    /// Returns an error if the innovation counter is exhausted.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::InnovationLedger;
    ///
    /// let ledger = InnovationLedger::new(3);
    ///
    /// assert_eq!(ledger.find_or_create(1, 2).unwrap(), 1);
    /// assert_eq!(ledger.find_or_create(0, 2).unwrap(), 2);
    /// assert_eq!(ledger.find_or_create(1, 2).unwrap(), 1);
    /// ```
    pub fn find_or_create(&self, from: Innovation, to: Innovation) -> Result<Innovation, LedgerError> {
        let mut state = self.state.lock();
        if let Some(&innovation) = state.link_innovations.get(&(from, to)) {
            return Ok(innovation);
        }
        let innovation = state.allocate_link(from, to)?;
        state.link_innovations.insert((from, to), innovation);
        trace!(from, to, innovation, "recorded link innovation");
        Ok(innovation)
    }

    /// Returns the innovation number assigned to a link `from -> to`,
    /// if it was ever recorded.
    pub fn find(&self, from: Innovation, to: Innovation) -> Option<Innovation> {
        self.state.lock().link_innovations.get(&(from, to)).copied()
    }

    /// Returns the id of the neuron that splits the link `from -> to`,
    /// recording a new neuron id if the link was never split before.
    ///
    /// # Errors
    /// Returns an error if the neuron id counter is exhausted.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::InnovationLedger;
    ///
    /// let ledger = InnovationLedger::new(3);
    ///
    /// let neuron = ledger.split_neuron(1, 2).unwrap();
    /// assert_eq!(neuron, 3);
    /// assert_eq!(ledger.split_neuron(1, 2).unwrap(), neuron);
    /// assert_ne!(ledger.split_neuron(0, 2).unwrap(), neuron);
    /// ```
    pub fn split_neuron(&self, from: Innovation, to: Innovation) -> Result<Innovation, LedgerError> {
        let mut state = self.state.lock();
        if let Some(&id) = state.neuron_splits.get(&(from, to)) {
            return Ok(id);
        }
        let id = state.allocate_neuron()?;
        state.neuron_splits.insert((from, to), id);
        trace!(from, to, neuron = id, "recorded neuron innovation");
        Ok(id)
    }

    /// Allocates a neuron id that no other mutation has used.
    ///
    /// Used when a genome already contains the neuron recorded
    /// for a split, which happens when the same link is split
    /// twice within one lineage.
    ///
    /// # Errors
    /// Returns an error if the neuron id counter is exhausted.
    pub fn fresh_neuron(&self) -> Result<Innovation, LedgerError> {
        self.state.lock().allocate_neuron()
    }

    /// Returns the number of recorded link innovations.
    pub fn len(&self) -> usize {
        self.state.lock().link_endpoints.len()
    }

    /// Returns `true` if no link innovation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the highest link innovation number generated,
    /// or 0 if none were.
    ///
    /// # Examples
    /// ```
    /// use neat_mutation::genomics::InnovationLedger;
    ///
    /// let ledger = InnovationLedger::new(0);
    /// assert_eq!(ledger.max_link_innovation(), 0);
    ///
    /// ledger.find_or_create(4, 5).unwrap();
    /// assert_eq!(ledger.max_link_innovation(), 1);
    /// ```
    pub fn max_link_innovation(&self) -> Innovation {
        self.state.lock().next_link_innovation - 1
    }

    /// Returns the highest neuron id handed out, counting
    /// the reserved ones.
    pub fn max_neuron_id(&self) -> Option<Innovation> {
        self.state.lock().next_neuron_id.checked_sub(1)
    }

    /// Returns a snapshot of the complete record of link
    /// innovations, in the format `((from, to), innovation)`,
    /// ordered by innovation number.
    pub fn link_history(&self) -> Vec<((Innovation, Innovation), Innovation)> {
        let state = self.state.lock();
        state
            .link_endpoints
            .iter()
            .copied()
            .zip(1..)
            .collect()
    }

    /// Returns a snapshot of the complete record of neuron
    /// innovations, in the format `((from, to), neuron)`.
    /// No ordering is guaranteed.
    pub fn neuron_history(&self) -> Vec<((Innovation, Innovation), Innovation)> {
        let state = self.state.lock();
        state
            .neuron_splits
            .iter()
            .map(|(endpoints, id)| (*endpoints, *id))
            .collect()
    }
}

impl Clone for InnovationLedger {
    fn clone(&self) -> Self {
        InnovationLedger {
            state: Mutex::new(self.state.lock().clone()),
        }
    }
}
