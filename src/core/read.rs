use crate::core::cigar::{reference_span, CigarOp};

/// One aligned read as seen by the pileup.
///
/// Coordinates are 0-based and half-open: the read covers reference
/// positions `[reference_start, reference_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Read {
    /// Read name, used only for diagnostics
    pub name: String,

    /// CIGAR operations in alignment order
    pub ops: Vec<CigarOp>,

    /// Raw bases as stored in the record (soft-clipped bases included)
    pub sequence: Vec<u8>,

    pub reference_start: usize,
    pub reference_end: usize,
}

impl Read {
    /// Build a read whose end is derived from the CIGAR's reference span
    pub fn new(
        name: impl Into<String>,
        ops: Vec<CigarOp>,
        sequence: impl Into<Vec<u8>>,
        reference_start: usize,
    ) -> Self {
        let reference_end = reference_start + reference_span(&ops);
        Self {
            name: name.into(),
            ops,
            sequence: sequence.into(),
            reference_start,
            reference_end,
        }
    }

    /// Number of reference positions covered
    #[must_use]
    pub fn reference_len(&self) -> usize {
        self.reference_end.saturating_sub(self.reference_start)
    }

    /// Whether the read covers any position of `[start, end)`
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.reference_start < end && self.reference_end > start
    }
}
