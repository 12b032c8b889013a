//! Concrete sequence type alias and strand operations.
//!
//! - [`DnaSequence`] — reverse complement, GC content

use orfscan_core::ReverseComplement;

use crate::alphabet::DnaAlphabet;
use crate::seq::ValidatedSeq;

/// A validated DNA sequence over `ACGT`.
pub type DnaSequence = ValidatedSeq<DnaAlphabet>;

/// Watson-Crick complement of an uppercase base.
pub(crate) fn dna_complement(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

impl DnaSequence {
    /// Return the reverse complement.
    pub fn reverse_complement(&self) -> DnaSequence {
        let rc: Vec<u8> = self.iter().rev().map(|&b| dna_complement(b)).collect();
        DnaSequence::from_validated(rc)
    }

    /// GC content as a fraction in [0.0, 1.0].
    ///
    /// Returns 0.0 for empty sequences.
    pub fn gc_content(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let gc = self.iter().filter(|&&b| b == b'G' || b == b'C').count();
        gc as f64 / self.len() as f64
    }
}

impl ReverseComplement for DnaSequence {
    type Output = DnaSequence;

    fn reverse_complement(&self) -> DnaSequence {
        DnaSequence::reverse_complement(self)
    }
}
