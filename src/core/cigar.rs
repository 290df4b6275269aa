use std::fmt;

use noodles::sam::alignment::record::cigar::op::Kind;

/// CIGAR operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarKind {
    /// `M`: alignment match (consumes query and reference)
    AlignmentMatch,
    /// `=`: sequence match (consumes query and reference)
    SequenceMatch,
    /// `X`: sequence mismatch (consumes query and reference)
    SequenceMismatch,
    /// `I`: insertion to the reference (consumes query)
    Insertion,
    /// `D`: deletion from the reference (consumes reference)
    Deletion,
    /// `S`: soft clip (consumes query)
    SoftClip,
    /// `H`: hard clip (consumes neither)
    HardClip,
    /// `N`: skipped reference region (consumes reference)
    Skip,
    /// `P`: padding (consumes neither)
    Pad,
}

impl CigarKind {
    /// Whether the operation advances along the reference
    #[must_use]
    pub fn consumes_reference(self) -> bool {
        matches!(
            self,
            Self::AlignmentMatch
                | Self::SequenceMatch
                | Self::SequenceMismatch
                | Self::Deletion
                | Self::Skip
        )
    }

    /// Whether the operation advances along the read's bases
    #[must_use]
    pub fn consumes_query(self) -> bool {
        matches!(
            self,
            Self::AlignmentMatch
                | Self::SequenceMatch
                | Self::SequenceMismatch
                | Self::Insertion
                | Self::SoftClip
        )
    }

    /// The SAM character for this operation
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::AlignmentMatch => 'M',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Skip => 'N',
            Self::Pad => 'P',
        }
    }
}

impl fmt::Display for CigarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Kind> for CigarKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Match => Self::AlignmentMatch,
            Kind::SequenceMatch => Self::SequenceMatch,
            Kind::SequenceMismatch => Self::SequenceMismatch,
            Kind::Insertion => Self::Insertion,
            Kind::Deletion => Self::Deletion,
            Kind::SoftClip => Self::SoftClip,
            Kind::HardClip => Self::HardClip,
            Kind::Skip => Self::Skip,
            Kind::Pad => Self::Pad,
        }
    }
}

/// A single CIGAR operation: kind and length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CigarOp {
    pub kind: CigarKind,
    pub len: usize,
}

impl CigarOp {
    #[must_use]
    pub fn new(kind: CigarKind, len: usize) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind)
    }
}

/// Number of reference positions spanned by a list of operations
#[must_use]
pub fn reference_span(ops: &[CigarOp]) -> usize {
    ops.iter()
        .filter(|op| op.kind.consumes_reference())
        .map(|op| op.len)
        .sum()
}

/// Number of read bases consumed by a list of operations
#[must_use]
pub fn query_span(ops: &[CigarOp]) -> usize {
    ops.iter()
        .filter(|op| op.kind.consumes_query())
        .map(|op| op.len)
        .sum()
}

/// Format operations as a CIGAR string, `*` when empty
#[must_use]
pub fn format_cigar(ops: &[CigarOp]) -> String {
    if ops.is_empty() {
        return "*".to_string();
    }
    ops.iter().map(ToString::to_string).collect()
}
