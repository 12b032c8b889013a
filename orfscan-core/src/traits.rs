//! Core trait definitions for orfscan.
//!
//! These traits define the contracts that sequence types implement so the
//! scanner can stay agnostic of the underlying storage.

/// A biological sequence backed by raw bytes.
pub trait Sequence {
    /// The raw byte representation of the sequence.
    fn as_bytes(&self) -> &[u8];

    /// Length in bases.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// A nucleotide sequence that can produce its reverse complement.
pub trait ReverseComplement {
    /// The type of the reverse-complemented sequence.
    type Output;

    /// Reverse the base order and complement every base (A<->T, C<->G).
    fn reverse_complement(&self) -> Self::Output;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
