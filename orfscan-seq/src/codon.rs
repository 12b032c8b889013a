//! Packed codons, codon vocabularies, and codon access over sequences.
//!
//! A [`Codon`] packs three bases into a value in `[0, 64)` using the same
//! 2-bit layout as [`TwoBitSequence`](crate::twobit::TwoBitSequence): the
//! first base in the most significant position, A=0, C=1, G=2, T=3. A
//! [`CodonSet`] is then a single `u64` bit mask, so membership tests are one
//! shift and one AND.

use std::fmt;
use std::str::FromStr;

use orfscan_core::{OrfscanError, Result};

use crate::twobit::{decode_base, encode_base, TwoBitSequence};
use crate::types::DnaSequence;

/// Three nucleotides packed into 6 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Codon(u8);

impl Codon {
    /// Number of distinct codons over `ACGT`.
    pub const COUNT: usize = 64;

    /// Build a codon from its packed index. Returns `None` for `idx >= 64`.
    pub const fn from_index(idx: u8) -> Option<Codon> {
        if (idx as usize) < Self::COUNT {
            Some(Codon(idx))
        } else {
            None
        }
    }

    /// The packed index in `[0, 64)`.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Pack three bases without allocating an error.
    ///
    /// Returns `None` unless `bases` is exactly three A/C/G/T bytes
    /// (either case).
    #[inline]
    pub(crate) fn from_bases(bases: &[u8]) -> Option<Codon> {
        match bases {
            [b1, b2, b3] => {
                let packed =
                    (encode_base(*b1)? << 4) | (encode_base(*b2)? << 2) | encode_base(*b3)?;
                Some(Codon(packed))
            }
            _ => None,
        }
    }

    /// Parse a codon from three bases. Case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `OrfscanError::InvalidInput` if `bases` is not exactly three
    /// bytes long or contains anything other than A, C, G, T.
    ///
    /// # Example
    ///
    /// ```
    /// use orfscan_seq::Codon;
    ///
    /// let atg = Codon::from_bytes(b"atg").unwrap();
    /// assert_eq!(atg.to_string(), "ATG");
    /// assert!(Codon::from_bytes(b"AT").is_err());
    /// ```
    pub fn from_bytes(bases: &[u8]) -> Result<Codon> {
        if bases.len() != 3 {
            return Err(OrfscanError::InvalidInput(format!(
                "codon '{}' must be exactly 3 bases, got {}",
                String::from_utf8_lossy(bases),
                bases.len()
            )));
        }
        Self::from_bases(bases).ok_or_else(|| {
            OrfscanError::InvalidInput(format!(
                "codon '{}' contains a base other than A, C, G, T",
                String::from_utf8_lossy(bases)
            ))
        })
    }

    /// The three bases as uppercase ASCII.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            decode_base(self.0 >> 4),
            decode_base(self.0 >> 2),
            decode_base(self.0),
        ]
    }

    /// The codon read from the opposite strand.
    pub fn reverse_complement(self) -> Codon {
        let c = self.0 ^ 0b11_1111;
        Codon(((c & 0b11) << 4) | (c & 0b1100) | (c >> 4))
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        f.write_str(std::str::from_utf8(&bytes).unwrap_or("???"))
    }
}

impl fmt::Debug for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codon({})", self)
    }
}

impl FromStr for Codon {
    type Err = OrfscanError;

    fn from_str(s: &str) -> Result<Codon> {
        Codon::from_bytes(s.as_bytes())
    }
}

impl TryFrom<String> for Codon {
    type Error = OrfscanError;

    fn try_from(s: String) -> Result<Codon> {
        s.parse()
    }
}

impl From<Codon> for String {
    fn from(codon: Codon) -> String {
        codon.to_string()
    }
}

// ---------------------------------------------------------------------------
// Codon vocabularies
// ---------------------------------------------------------------------------

/// A set of codons stored as a 64-bit membership mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CodonSet(u64);

impl CodonSet {
    /// An empty set.
    pub const fn new() -> Self {
        CodonSet(0)
    }

    /// Start codon of the standard genetic code: `ATG`.
    pub fn standard_starts() -> Self {
        [b"ATG"].into_iter().filter_map(|c| Codon::from_bases(c)).collect()
    }

    /// Stop codons of the standard genetic code: `TAA`, `TAG`, `TGA`.
    pub fn standard_stops() -> Self {
        [b"TAA", b"TAG", b"TGA"]
            .into_iter()
            .filter_map(|c| Codon::from_bases(c))
            .collect()
    }

    /// Build a set from codon strings such as `["ATG", "GTG"]`.
    ///
    /// Duplicates collapse. An empty input yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns the first malformed codon as `OrfscanError::InvalidInput`.
    pub fn from_codons<I, C>(codons: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        codons
            .into_iter()
            .map(|c| Codon::from_bytes(c.as_ref()))
            .collect()
    }

    /// Add a codon. Returns `true` if it was not already present.
    pub fn insert(&mut self, codon: Codon) -> bool {
        let bit = 1u64 << codon.0;
        let fresh = (self.0 & bit) == 0;
        self.0 |= bit;
        fresh
    }

    /// Whether `codon` is in the set.
    #[inline]
    pub fn contains(&self, codon: Codon) -> bool {
        (self.0 >> codon.0) & 1 == 1
    }

    /// Number of codons in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Codons in index order (AAA first, TTT last).
    pub fn iter(&self) -> impl Iterator<Item = Codon> + '_ {
        (0..Codon::COUNT as u8)
            .map(Codon)
            .filter(move |&c| self.contains(c))
    }
}

impl FromIterator<Codon> for CodonSet {
    fn from_iter<T: IntoIterator<Item = Codon>>(iter: T) -> Self {
        let mut set = CodonSet::new();
        for codon in iter {
            set.insert(codon);
        }
        set
    }
}

impl fmt::Display for CodonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, codon) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", codon)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CodonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Parses a comma- or whitespace-separated codon list, e.g. `"TAA, TAG,TGA"`.
impl FromStr for CodonSet {
    type Err = OrfscanError;

    fn from_str(s: &str) -> Result<CodonSet> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                Codon::from_bytes(tok.as_bytes())
                    .map_err(|e| OrfscanError::Parse(format!("in codon list '{}': {}", s, e)))
            })
            .collect()
    }
}

impl TryFrom<String> for CodonSet {
    type Error = OrfscanError;

    fn try_from(s: String) -> Result<CodonSet> {
        s.parse()
    }
}

impl From<CodonSet> for String {
    fn from(set: CodonSet) -> String {
        set.to_string()
    }
}

// ---------------------------------------------------------------------------
// Codon access
// ---------------------------------------------------------------------------

/// A sequence the ORF scanner can read codons from.
pub trait CodonSource {
    /// Number of bases.
    fn num_bases(&self) -> usize;

    /// The codon starting at `pos`, or `None` when fewer than three bases
    /// remain.
    fn codon_at(&self, pos: usize) -> Option<Codon>;
}

impl CodonSource for DnaSequence {
    fn num_bases(&self) -> usize {
        self.len()
    }

    #[inline]
    fn codon_at(&self, pos: usize) -> Option<Codon> {
        self.get(pos..pos.checked_add(3)?).and_then(Codon::from_bases)
    }
}

impl CodonSource for TwoBitSequence {
    fn num_bases(&self) -> usize {
        self.len()
    }

    #[inline]
    fn codon_at(&self, pos: usize) -> Option<Codon> {
        self.kmer(pos, 3).map(|packed| Codon(packed as u8))
    }
}
