//! DNA sequence types and open reading frame scanning.
//!
//! Provides validated and 2-bit packed DNA sequences, packed codon
//! vocabularies, and a six-frame ORF scanner:
//!
//! - **Alphabet** — [`DnaAlphabet`] (unambiguous `ACGT`)
//! - **Sequences** — [`DnaSequence`], [`TwoBitSequence`]
//! - **Codons** — [`Codon`], [`CodonSet`], [`CodonSource`]
//! - **ORFs** — [`find_all_orfs`], [`find_forward_orfs`], [`OrfFinder`]
//!
//! # Example
//!
//! ```
//! use orfscan_seq::{find_all_orfs, CodonSet, DnaSequence};
//!
//! let seq = DnaSequence::new(b"aatcatttcattttcataa").unwrap();
//! let starts: CodonSet = "TAT".parse().unwrap();
//! let stops: CodonSet = "GAA".parse().unwrap();
//!
//! // Found on the reverse strand, reported in forward coordinates.
//! let orfs = find_all_orfs(&seq, &starts, &stops);
//! assert_eq!(orfs[0].as_tuple(), (-1, 12, 18));
//! ```

pub mod alphabet;
pub mod codon;
pub mod orf;
pub mod seq;
pub mod twobit;
pub mod types;

// Re-export alphabet types
pub use alphabet::{Alphabet, DnaAlphabet};

// Re-export the generic sequence type
pub use seq::ValidatedSeq;

// Re-export concrete type alias
pub use types::DnaSequence;

// Re-export compact encoding
pub use twobit::TwoBitSequence;

// Re-export codon vocabularies
pub use codon::{Codon, CodonSet, CodonSource};

// Re-export the ORF scanner
pub use orf::{find_all_orfs, find_forward_orfs, Orf, OrfFinder, Strand, StrandSelection};
