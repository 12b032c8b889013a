//! Open Reading Frame (ORF) finder.
//!
//! Scans nucleotide sequences for ORFs across all six reading frames
//! (three forward, three reverse complement). An ORF begins at a codon from
//! the start vocabulary and ends with the first in-frame codon from the stop
//! vocabulary, stop codon included. Reading frames that run off the end of
//! the sequence without a stop are discarded.
//!
//! Coordinates are 0-based and half-open (`[start, end)`) on the forward
//! strand for both strands, so `seq[start..end]` is always the ORF's
//! footprint on the input.

use std::fmt;

use log::{debug, trace};
use orfscan_core::{OrfscanError, ReverseComplement, Result, Summarizable};

use crate::codon::{CodonSet, CodonSource};
use crate::types::DnaSequence;

/// Strand orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// `1` for forward, `-1` for reverse complement.
    pub fn sign(self) -> i8 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("+"),
            Strand::Reverse => f.write_str("-"),
        }
    }
}

/// Which strands a scan covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrandSelection {
    Forward,
    Reverse,
    #[default]
    Both,
}

impl StrandSelection {
    fn includes(self, strand: Strand) -> bool {
        matches!(
            (self, strand),
            (StrandSelection::Both, _)
                | (StrandSelection::Forward, Strand::Forward)
                | (StrandSelection::Reverse, Strand::Reverse)
        )
    }
}

/// An open reading frame located on the input sequence.
///
/// Ordering is by strand (forward first), then `start`, then `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orf {
    /// Strand the ORF was read from.
    pub strand: Strand,
    /// Start position on the forward strand (0-indexed, inclusive).
    pub start: usize,
    /// End position on the forward strand (exclusive).
    pub end: usize,
}

impl Orf {
    /// Length in nucleotides, start and stop codons included.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the ORF spans no bases. Never true for scanner output.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Number of codons, start and stop codons included.
    pub fn codon_count(&self) -> usize {
        self.len() / 3
    }

    /// Reading frame (0, 1, or 2) on the strand the ORF was read from.
    ///
    /// For reverse-strand ORFs the frame is the offset on the reverse
    /// complement, which depends on the total sequence length.
    pub fn frame(&self, seq_len: usize) -> usize {
        match self.strand {
            Strand::Forward => self.start % 3,
            Strand::Reverse => (seq_len - self.end) % 3,
        }
    }

    /// The ORF as a `(strand, start, end)` tuple with strand `1` or `-1`.
    pub fn as_tuple(&self) -> (i8, usize, usize) {
        (self.strand.sign(), self.start, self.end)
    }

    /// The ORF's nucleotides in reading orientation.
    ///
    /// Reverse-strand ORFs are reverse complemented, so the result always
    /// begins with the start codon and ends with the stop codon. Returns
    /// `None` if the ORF does not fit inside `seq`.
    pub fn extract(&self, seq: &DnaSequence) -> Option<DnaSequence> {
        let footprint = seq.slice(self.start, self.end)?;
        Some(match self.strand {
            Strand::Forward => footprint,
            Strand::Reverse => footprint.reverse_complement(),
        })
    }
}

impl fmt::Display for Orf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (strand, start, end) = self.as_tuple();
        write!(f, "({}, {}, {})", strand, start, end)
    }
}

impl Summarizable for Orf {
    fn summary(&self) -> String {
        format!(
            "ORF {}..{} on {} strand ({} nt, {} codons)",
            self.start,
            self.end,
            self.strand,
            self.len(),
            self.codon_count()
        )
    }
}

/// Walk the three frames of `seq`, reporting each closed ORF as `[start, end)`
/// in the coordinates of `seq` itself.
fn scan_frames<S, F>(seq: &S, starts: &CodonSet, stops: &CodonSet, mut emit: F)
where
    S: CodonSource + ?Sized,
    F: FnMut(usize, usize),
{
    for frame in 0..3 {
        let mut open: Option<usize> = None;
        let mut pos = frame;

        while let Some(codon) = seq.codon_at(pos) {
            match open {
                None if starts.contains(codon) => open = Some(pos),
                Some(start) if stops.contains(codon) => {
                    emit(start, pos + 3);
                    open = None;
                }
                _ => {}
            }
            pos += 3;
        }

        if let Some(start) = open {
            trace!("frame {}: start at {} has no in-frame stop, discarded", frame, start);
        }
    }
}

fn finish(mut orfs: Vec<Orf>) -> Vec<Orf> {
    orfs.sort_unstable();
    orfs.dedup();
    orfs
}

/// Find ORFs on the given strand only, in that strand's coordinates.
///
/// Every result is tagged [`Strand::Forward`]. Calling this on a reverse
/// complement and mapping `[s, e)` to `[n - e, n - s)` reproduces the
/// reverse-strand half of [`find_all_orfs`].
pub fn find_forward_orfs<S>(seq: &S, start_codons: &CodonSet, stop_codons: &CodonSet) -> Vec<Orf>
where
    S: CodonSource + ?Sized,
{
    let mut orfs = Vec::new();
    scan_frames(seq, start_codons, stop_codons, |start, end| {
        orfs.push(Orf {
            strand: Strand::Forward,
            start,
            end,
        })
    });
    finish(orfs)
}

/// Find ORFs in all six reading frames (forward + reverse complement).
///
/// Results are sorted and free of duplicates. Reverse-strand coordinates
/// refer to the input sequence.
///
/// # Example
///
/// ```
/// use orfscan_seq::{find_all_orfs, CodonSet, DnaSequence};
///
/// let seq = DnaSequence::new(b"TTATGAAAATGAAATGATT").unwrap();
/// let starts = CodonSet::from_codons(["ATG"]).unwrap();
/// let stops = CodonSet::from_codons(["TGA", "TAA", "TAG"]).unwrap();
///
/// let orfs = find_all_orfs(&seq, &starts, &stops);
/// assert_eq!(orfs.len(), 1);
/// assert_eq!(orfs[0].as_tuple(), (1, 2, 17));
/// ```
pub fn find_all_orfs<S>(seq: &S, start_codons: &CodonSet, stop_codons: &CodonSet) -> Vec<Orf>
where
    S: CodonSource + ReverseComplement + ?Sized,
    S::Output: CodonSource,
{
    scan(seq, start_codons, stop_codons, StrandSelection::Both, 0)
}

fn scan<S>(
    seq: &S,
    starts: &CodonSet,
    stops: &CodonSet,
    strands: StrandSelection,
    min_length: usize,
) -> Vec<Orf>
where
    S: CodonSource + ReverseComplement + ?Sized,
    S::Output: CodonSource,
{
    let n = seq.num_bases();
    debug!(
        "scanning {} bp for ORFs (starts [{}], stops [{}], strands {:?})",
        n, starts, stops, strands
    );

    let mut orfs = Vec::new();
    let mut keep = |orf: Orf| {
        if orf.len() >= min_length {
            trace!("ORF {}", orf);
            orfs.push(orf);
        }
    };

    if strands.includes(Strand::Forward) {
        scan_frames(seq, starts, stops, |start, end| {
            keep(Orf {
                strand: Strand::Forward,
                start,
                end,
            })
        });
    }

    if strands.includes(Strand::Reverse) {
        let rc = seq.reverse_complement();
        // Position `p` on the RC corresponds to `n - p` on the original.
        scan_frames(&rc, starts, stops, |start, end| {
            keep(Orf {
                strand: Strand::Reverse,
                start: n - end,
                end: n - start,
            })
        });
    }

    let orfs = finish(orfs);
    debug!("found {} ORFs in {} bp", orfs.len(), n);
    orfs
}

/// Reusable ORF search configuration.
///
/// Defaults to the standard genetic code (start `ATG`, stops `TAA`, `TAG`,
/// `TGA`), both strands, and no length filter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrfFinder {
    starts: CodonSet,
    stops: CodonSet,
    min_length: usize,
    strands: StrandSelection,
}

impl Default for OrfFinder {
    fn default() -> Self {
        Self {
            starts: CodonSet::standard_starts(),
            stops: CodonSet::standard_stops(),
            min_length: 0,
            strands: StrandSelection::Both,
        }
    }
}

impl OrfFinder {
    /// Build a finder from start and stop codon strings.
    ///
    /// # Errors
    ///
    /// Returns `OrfscanError::InvalidInput` if either vocabulary is empty or
    /// contains a codon that is not three A/C/G/T bases.
    pub fn new<I, J, C, D>(start_codons: I, stop_codons: J) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        J: IntoIterator<Item = D>,
        C: AsRef<[u8]>,
        D: AsRef<[u8]>,
    {
        Self::from_sets(
            CodonSet::from_codons(start_codons)?,
            CodonSet::from_codons(stop_codons)?,
        )
    }

    /// Build a finder from prepared codon sets.
    ///
    /// # Errors
    ///
    /// Returns `OrfscanError::InvalidInput` if either set is empty.
    pub fn from_sets(starts: CodonSet, stops: CodonSet) -> Result<Self> {
        if starts.is_empty() {
            return Err(OrfscanError::InvalidInput(
                "start codon set must not be empty".into(),
            ));
        }
        if stops.is_empty() {
            return Err(OrfscanError::InvalidInput(
                "stop codon set must not be empty".into(),
            ));
        }
        Ok(Self {
            starts,
            stops,
            ..Self::default()
        })
    }

    /// Drop ORFs shorter than `min_length` nucleotides.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Restrict the scan to one strand, or both.
    pub fn with_strands(mut self, strands: StrandSelection) -> Self {
        self.strands = strands;
        self
    }

    pub fn starts(&self) -> &CodonSet {
        &self.starts
    }

    pub fn stops(&self) -> &CodonSet {
        &self.stops
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn strands(&self) -> StrandSelection {
        self.strands
    }

    /// Scan `seq` with this configuration.
    pub fn find<S>(&self, seq: &S) -> Vec<Orf>
    where
        S: CodonSource + ReverseComplement + ?Sized,
        S::Output: CodonSource,
    {
        scan(seq, &self.starts, &self.stops, self.strands, self.min_length)
    }

    /// Validate `seq` as DNA, then scan it.
    ///
    /// # Errors
    ///
    /// Returns `OrfscanError::InvalidInput` if `seq` contains anything
    /// other than A, C, G, T (either case).
    pub fn find_str(&self, seq: &str) -> Result<Vec<Orf>> {
        let seq = DnaSequence::new(seq)?;
        Ok(self.find(&seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twobit::TwoBitSequence;

    fn dna(s: &str) -> DnaSequence {
        DnaSequence::new(s).unwrap()
    }

    fn codons(list: &str) -> CodonSet {
        list.parse().unwrap()
    }

    fn tuples(orfs: &[Orf]) -> Vec<(i8, usize, usize)> {
        orfs.iter().map(Orf::as_tuple).collect()
    }

    fn standard(seq: &str) -> Vec<(i8, usize, usize)> {
        tuples(&OrfFinder::default().find(&dna(seq)))
    }

    #[test]
    fn notebook_example_forward_strand() {
        let orfs = find_all_orfs(
            &dna("TTATGAAAATGAAATGATT"),
            &codons("ATG"),
            &codons("TGA,TAA,TAG"),
        );
        assert_eq!(tuples(&orfs), vec![(1, 2, 17)]);
    }

    #[test]
    fn notebook_example_reverse_strand() {
        let orfs = find_all_orfs(&dna("AATCATTTCATTTTCATAA"), &codons("TAT"), &codons("GAA"));
        assert_eq!(tuples(&orfs), vec![(-1, 12, 18)]);
    }

    #[test]
    fn known_orf() {
        // ATGAAATAA: ATG (start) + AAA + TAA (stop) = 9 nt
        let orfs = OrfFinder::default().find(&dna("ATGAAATAA"));
        assert_eq!(orfs.len(), 1);
        assert_eq!(orfs[0].start, 0);
        assert_eq!(orfs[0].end, 9);
        assert_eq!(orfs[0].strand, Strand::Forward);
        assert_eq!(orfs[0].codon_count(), 3);
    }

    #[test]
    fn multiple_orfs_different_frames() {
        // Frame 2: ATG TGA at 2..8. Frame 1: ATG TAA at 7..13.
        assert_eq!(standard("GGATGTGATGTAATA"), vec![(1, 2, 8), (1, 7, 13)]);
    }

    #[test]
    fn consecutive_orfs_same_frame() {
        // ATG AAA TAA | ATG CCC TAG
        assert_eq!(standard("ATGAAATAAATGCCCTAG"), vec![(1, 0, 9), (1, 9, 18)]);
    }

    #[test]
    fn in_frame_start_inside_open_orf_is_absorbed() {
        // ATG ATG AAA TAA: the second ATG belongs to the first ORF.
        assert_eq!(standard("ATGATGAAATAA"), vec![(1, 0, 12)]);
    }

    #[test]
    fn overlapping_starts_in_different_frames() {
        // TAT at 0 (frame 0) and TAT at 2 (frame 2) share a base.
        let orfs = find_all_orfs(&dna("TATATGAACGAA"), &codons("TAT"), &codons("GAA"));
        assert_eq!(tuples(&orfs), vec![(1, 0, 12), (1, 2, 8)]);
    }

    #[test]
    fn open_ended_orf_discarded() {
        assert!(standard("ATGAAACCC").is_empty());
        // Frame 1 opens at 7 and never closes; frame 2 closes normally.
        assert_eq!(standard("GGATGAAATGATAAAC"), vec![(1, 2, 11)]);
    }

    #[test]
    fn codon_in_both_vocabularies() {
        let orfs = find_all_orfs(&dna("ATGTAATAA"), &codons("ATG,TAA"), &codons("TAA"));
        assert_eq!(tuples(&orfs), vec![(1, 0, 6)]);
    }

    #[test]
    fn no_orfs_without_start() {
        assert!(standard("CCCGGGTTTAAA").is_empty());
    }

    #[test]
    fn both_strands() {
        // Forward: ATG CCC TAA; the trailing TTA GGG CAT reads ATG CCC TAA on the RC.
        assert_eq!(standard("ATGCCCTAATTAGGGCAT"), vec![(1, 0, 9), (-1, 9, 18)]);
    }

    #[test]
    fn reverse_strand_coordinates() {
        // RC of TTAGGGCAT is ATGCCCTAA, an ORF at RC 0..9 -> original 0..9.
        let seq = dna("TTAGGGCAT");
        let orfs = OrfFinder::default().find(&seq);
        assert_eq!(tuples(&orfs), vec![(-1, 0, 9)]);
        assert_eq!(orfs[0].extract(&seq).unwrap().to_string(), "ATGCCCTAA");
    }

    #[test]
    fn configurable_start_codons() {
        let seq = dna("GTGAAATAA");
        assert!(OrfFinder::default().find(&seq).is_empty());

        let finder = OrfFinder::new(["ATG", "GTG"], ["TAA", "TAG", "TGA"]).unwrap();
        assert_eq!(tuples(&finder.find(&seq)), vec![(1, 0, 9)]);
    }

    #[test]
    fn min_length_filtering() {
        let seq = dna("ATGAAATAA");
        assert!(OrfFinder::default().with_min_length(10).find(&seq).is_empty());
        assert_eq!(OrfFinder::default().with_min_length(9).find(&seq).len(), 1);
    }

    #[test]
    fn strand_selection() {
        let seq = dna("ATGCCCTAATTAGGGCAT");
        let fwd = OrfFinder::default().with_strands(StrandSelection::Forward);
        let rev = OrfFinder::default().with_strands(StrandSelection::Reverse);
        assert_eq!(tuples(&fwd.find(&seq)), vec![(1, 0, 9)]);
        assert_eq!(tuples(&rev.find(&seq)), vec![(-1, 9, 18)]);
    }

    #[test]
    fn empty_and_short_sequences() {
        assert!(standard("").is_empty());
        assert!(standard("AT").is_empty());
        // ATG + 2 bases: too short for a start and a stop.
        assert!(standard("ATGTA").is_empty());
        assert_eq!(standard("ATGTAA"), vec![(1, 0, 6)]);
    }

    #[test]
    fn twobit_input_matches_dna_input() {
        let seq = dna("ATGCCCTAATTAGGGCATGGATGTGATGTAATA");
        let packed = TwoBitSequence::from(&seq);
        let finder = OrfFinder::default();
        assert_eq!(finder.find(&seq), finder.find(&packed));
    }

    #[test]
    fn forward_scan_of_rc_mirrors_reverse_strand() {
        let seq = dna("AATCATTTCATTTTCATAA");
        let rc = seq.reverse_complement();
        let (starts, stops) = (codons("TAT"), codons("GAA"));
        let n = seq.len();

        let mirrored: Vec<(usize, usize)> = find_forward_orfs(&rc, &starts, &stops)
            .iter()
            .map(|o| (n - o.end, n - o.start))
            .collect();
        let reverse: Vec<(usize, usize)> = find_all_orfs(&seq, &starts, &stops)
            .iter()
            .filter(|o| o.strand == Strand::Reverse)
            .map(|o| (o.start, o.end))
            .collect();
        assert_eq!(mirrored, reverse);
        assert_eq!(reverse, vec![(12, 18)]);
    }

    #[test]
    fn frame_reporting() {
        let seq = dna("AATCATTTCATTTTCATAA");
        let orf = find_all_orfs(&seq, &codons("TAT"), &codons("GAA"))[0];
        assert_eq!(orf.frame(seq.len()), 1);

        let fwd = Orf {
            strand: Strand::Forward,
            start: 2,
            end: 17,
        };
        assert_eq!(fwd.frame(19), 2);
    }

    #[test]
    fn extract_reading_orientation() {
        let seq = dna("AATCATTTCATTTTCATAA");
        let orf = find_all_orfs(&seq, &codons("TAT"), &codons("GAA"))[0];
        assert_eq!(orf.extract(&seq).unwrap().to_string(), "TATGAA");

        let out_of_range = Orf {
            strand: Strand::Forward,
            start: 15,
            end: 21,
        };
        assert!(out_of_range.extract(&seq).is_none());
    }

    #[test]
    fn finder_rejects_empty_vocabularies() {
        let err = OrfFinder::new(Vec::<&str>::new(), ["TAA"]).unwrap_err();
        assert_eq!(
            err,
            OrfscanError::InvalidInput("start codon set must not be empty".into())
        );
        assert!(OrfFinder::from_sets(codons("ATG"), CodonSet::new()).is_err());
        assert!(OrfFinder::new(["ATGA"], ["TAA"]).is_err());
    }

    #[test]
    fn find_str_validates_input() {
        let finder = OrfFinder::default();
        assert_eq!(tuples(&finder.find_str("ttatgaaaatgaaatgatt").unwrap()), vec![(1, 2, 17)]);
        assert!(finder.find_str("ATGNNNTAA").is_err());
    }

    #[test]
    fn display_and_summary() {
        let orf = Orf {
            strand: Strand::Reverse,
            start: 12,
            end: 18,
        };
        assert_eq!(orf.to_string(), "(-1, 12, 18)");
        assert_eq!(orf.summary(), "ORF 12..18 on - strand (6 nt, 2 codons)");
    }

    #[test]
    fn results_sorted_forward_first() {
        let orfs = OrfFinder::default().find(&dna("TTAGGGCATATGCCCTAA"));
        assert!(orfs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(orfs.first().map(|o| o.strand), Some(Strand::Forward));
    }
}
