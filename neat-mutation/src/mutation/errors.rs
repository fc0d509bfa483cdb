use crate::genomics::{GenomeError, LedgerError};

use thiserror::Error;

/// An error type indicating a mutation could not
/// be carried out consistently.
///
/// A mutation that simply does not apply to a genome
/// is not an error; see [`Outcome::NotApplicable`].
///
/// [`Outcome::NotApplicable`]: crate::mutation::Outcome::NotApplicable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The innovation ledger failed to hand out an identifier.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// The edit would break a genome invariant.
    #[error(transparent)]
    Genome(#[from] GenomeError),
}
