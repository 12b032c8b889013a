//! 2-bit DNA encoding for compact storage.
//!
//! Packs DNA sequences (A, C, G, T only) into 2 bits per base,
//! achieving 4x compression over ASCII representation.
//!
//! Encoding: A=00, C=01, G=10, T=11

use orfscan_core::{OrfscanError, ReverseComplement, Result};

use crate::types::DnaSequence;

/// A DNA sequence stored in 2-bit packed representation.
///
/// Each byte holds 4 bases. Bases are packed from the most significant
/// bits: the first base occupies bits 7..6, the second bits 5..4, and so on.
/// Padding bits in the last byte are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwoBitSequence {
    data: Vec<u8>,
    len: usize,
}

/// Encode a single ASCII base to its 2-bit representation.
#[inline]
pub(crate) fn encode_base(b: u8) -> Option<u8> {
    match b {
        b'A' | b'a' => Some(0b00),
        b'C' | b'c' => Some(0b01),
        b'G' | b'g' => Some(0b10),
        b'T' | b't' => Some(0b11),
        _ => None,
    }
}

/// Decode a 2-bit value back to ASCII.
#[inline]
pub(crate) fn decode_base(bits: u8) -> u8 {
    match bits & 0b11 {
        0b00 => b'A',
        0b01 => b'C',
        0b10 => b'G',
        _ => b'T',
    }
}

#[inline]
fn slot(index: usize) -> (usize, usize) {
    (index / 4, 6 - (index % 4) * 2)
}

impl TwoBitSequence {
    /// Encode an ASCII DNA sequence into 2-bit packed representation.
    ///
    /// Only unambiguous bases (A, C, G, T) are supported. Case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `OrfscanError::InvalidInput` if any base is not A, C, G, or T.
    ///
    /// # Example
    ///
    /// ```
    /// use orfscan_seq::twobit::TwoBitSequence;
    ///
    /// let seq = TwoBitSequence::encode(b"ACGT").unwrap();
    /// assert_eq!(seq.len(), 4);
    /// assert_eq!(seq.decode(), b"ACGT");
    /// ```
    pub fn encode(seq: &[u8]) -> Result<Self> {
        let mut data = vec![0u8; seq.len().div_ceil(4)];

        for (i, &base) in seq.iter().enumerate() {
            let bits = encode_base(base).ok_or_else(|| {
                OrfscanError::InvalidInput(format!(
                    "invalid DNA base for 2-bit encoding: '{}' (0x{:02X}) at position {}",
                    base as char, base, i
                ))
            })?;
            let (byte_idx, bit_offset) = slot(i);
            data[byte_idx] |= bits << bit_offset;
        }

        Ok(Self {
            data,
            len: seq.len(),
        })
    }

    /// Decode back to ASCII DNA bytes.
    ///
    /// Always produces uppercase A, C, G, T.
    pub fn decode(&self) -> Vec<u8> {
        (0..self.len).map(|i| decode_base(self.bits(i))).collect()
    }

    #[inline]
    fn bits(&self, index: usize) -> u8 {
        let (byte_idx, bit_offset) = slot(index);
        (self.data[byte_idx] >> bit_offset) & 0b11
    }

    /// Get the base at a specific position.
    ///
    /// Returns `None` if `index >= len`.
    pub fn get(&self, index: usize) -> Option<u8> {
        (index < self.len).then(|| decode_base(self.bits(index)))
    }

    /// Number of bases in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extract a k-mer starting at `pos` as an integer encoding.
    ///
    /// Each base occupies 2 bits in the returned `u64`, with the first base
    /// in the most significant position. Maximum k is 32 (64 bits / 2 bits per base).
    ///
    /// Returns `None` if `pos + k > len` or `k > 32` or `k == 0`.
    pub fn kmer(&self, pos: usize, k: usize) -> Option<u64> {
        if k == 0 || k > 32 || pos.checked_add(k)? > self.len {
            return None;
        }
        Some((pos..pos + k).fold(0u64, |value, idx| (value << 2) | self.bits(idx) as u64))
    }

    /// Compute the bitwise complement (A<->T, C<->G).
    ///
    /// In 2-bit encoding, complement is a simple XOR with 0b11:
    /// - A (00) -> T (11)
    /// - C (01) -> G (10)
    /// - G (10) -> C (01)
    /// - T (11) -> A (00)
    pub fn complement(&self) -> Self {
        let mut data: Vec<u8> = self.data.iter().map(|byte| byte ^ 0xFF).collect();

        // Clear padding bits in the last byte.
        let remainder = self.len % 4;
        if remainder != 0 {
            if let Some(last) = data.last_mut() {
                *last &= !0u8 << (8 - remainder * 2);
            }
        }

        Self {
            data,
            len: self.len,
        }
    }

    /// Compute the reverse complement without going through ASCII.
    pub fn reverse_complement(&self) -> Self {
        let mut data = vec![0u8; self.data.len()];
        for i in 0..self.len {
            let bits = self.bits(self.len - 1 - i) ^ 0b11;
            let (byte_idx, bit_offset) = slot(i);
            data[byte_idx] |= bits << bit_offset;
        }
        Self {
            data,
            len: self.len,
        }
    }
}

impl ReverseComplement for TwoBitSequence {
    type Output = TwoBitSequence;

    fn reverse_complement(&self) -> TwoBitSequence {
        TwoBitSequence::reverse_complement(self)
    }
}

impl From<&DnaSequence> for TwoBitSequence {
    fn from(seq: &DnaSequence) -> Self {
        let mut data = vec![0u8; seq.len().div_ceil(4)];
        for (i, &base) in seq.iter().enumerate() {
            // DnaSequence only holds ACGT.
            let bits = encode_base(base).unwrap_or(0);
            let (byte_idx, bit_offset) = slot(i);
            data[byte_idx] |= bits << bit_offset;
        }
        Self {
            data,
            len: seq.len(),
        }
    }
}

impl From<&TwoBitSequence> for DnaSequence {
    fn from(seq: &TwoBitSequence) -> Self {
        DnaSequence::from_validated(seq.decode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_non_multiple_of_four() {
        for original in [&b"A"[..], b"CG", b"ACT", b"ACGTA"] {
            let seq = TwoBitSequence::encode(original).unwrap();
            assert_eq!(seq.len(), original.len());
            assert_eq!(seq.decode(), original);
        }
    }

    #[test]
    fn encode_case_insensitive() {
        let upper = TwoBitSequence::encode(b"ACGT").unwrap();
        let lower = TwoBitSequence::encode(b"acgt").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.decode(), b"ACGT");
    }

    #[test]
    fn encode_non_dna_error() {
        assert!(TwoBitSequence::encode(b"ACGN").is_err());
        assert!(TwoBitSequence::encode(b"ACGU").is_err());
        let err = TwoBitSequence::encode(b"ACXT").unwrap_err();
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn empty_sequence() {
        let seq = TwoBitSequence::encode(b"").unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.decode(), Vec::<u8>::new());
        assert_eq!(seq.get(0), None);
        assert!(seq.reverse_complement().is_empty());
    }

    #[test]
    fn get_bases_non_aligned() {
        let seq = TwoBitSequence::encode(b"TAGCAA").unwrap();
        let got: Vec<u8> = (0..6).filter_map(|i| seq.get(i)).collect();
        assert_eq!(got, b"TAGCAA");
        assert_eq!(seq.get(6), None);
    }

    #[test]
    fn kmer_extraction() {
        // ACGT: A=00, C=01, G=10, T=11
        let seq = TwoBitSequence::encode(b"ACGT").unwrap();
        assert_eq!(seq.kmer(0, 2), Some(0b0001));
        assert_eq!(seq.kmer(1, 2), Some(0b0110));
        assert_eq!(seq.kmer(1, 3), Some(0b011011));
        assert_eq!(seq.kmer(0, 4), Some(0b00011011));
    }

    #[test]
    fn kmer_edge_cases() {
        let seq = TwoBitSequence::encode(b"ACGT").unwrap();
        assert_eq!(seq.kmer(0, 0), None);
        assert_eq!(seq.kmer(0, 33), None);
        assert_eq!(seq.kmer(3, 2), None);
        assert_eq!(seq.kmer(usize::MAX, 3), None);
        assert_eq!(seq.kmer(3, 1), Some(0b11));
    }

    #[test]
    fn complement_non_aligned() {
        let seq = TwoBitSequence::encode(b"ACG").unwrap();
        let comp = seq.complement();
        assert_eq!(comp.decode(), b"TGC");
        // Padding stays zeroed so equality with a fresh encoding holds.
        assert_eq!(comp, TwoBitSequence::encode(b"TGC").unwrap());
    }

    #[test]
    fn reverse_complement_matches_ascii() {
        for original in [&b"A"[..], b"ACG", b"ATGC", b"TTATGAAAATGAAATGATT"] {
            let packed = TwoBitSequence::encode(original).unwrap();
            let ascii = DnaSequence::new(original).unwrap().reverse_complement();
            assert_eq!(packed.reverse_complement().decode(), ascii.clone().into_bytes());
            assert_eq!(
                packed.reverse_complement(),
                TwoBitSequence::from(&ascii),
                "padding must stay clear for {:?}",
                std::str::from_utf8(original)
            );
        }
    }

    #[test]
    fn converts_to_and_from_dna_sequence() {
        let dna = DnaSequence::new(b"ttatgaaa").unwrap();
        let packed = TwoBitSequence::from(&dna);
        assert_eq!(packed, TwoBitSequence::encode(b"TTATGAAA").unwrap());
        assert_eq!(DnaSequence::from(&packed), dna);
    }

    #[test]
    fn compact_storage() {
        assert_eq!(TwoBitSequence::encode(b"ACGTACGT").unwrap().data.len(), 2);
        assert_eq!(TwoBitSequence::encode(b"ACGTACGTA").unwrap().data.len(), 3);
    }
}
