//! Decoding a read's CIGAR walk into one symbol per reference position.

use thiserror::Error;

use crate::core::alphabet::GAP;
use crate::core::cigar::{format_cigar, query_span, CigarKind};
use crate::core::read::Read;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Read '{read}' contains a hard clip; rerun with --hard-clips skip to ignore hard clips")]
    HardClip { read: String },

    #[error("Read '{read}' contains unsupported CIGAR operation '{kind}' in {cigar}")]
    UnsupportedOperation {
        read: String,
        kind: CigarKind,
        cigar: String,
    },

    #[error("Read '{read}' has {available} bases but its CIGAR {cigar} consumes {needed}")]
    SequenceTooShort {
        read: String,
        cigar: String,
        needed: usize,
        available: usize,
    },

    #[error("Read '{read}' with CIGAR {cigar} decodes to {actual} positions but spans {expected} reference positions")]
    SpanMismatch {
        read: String,
        cigar: String,
        expected: usize,
        actual: usize,
    },
}

/// How hard-clip operations are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HardClipPolicy {
    /// Fail on any read containing a hard clip
    #[default]
    Reject,
    /// Ignore hard clips; they consume neither read bases nor reference
    Skip,
}

/// A read's bases laid out on the reference: `symbols[i]` is the call at
/// reference position `start + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAlignment {
    pub start: usize,
    pub symbols: Vec<u8>,
}

impl DecodedAlignment {
    /// One past the last reference position covered
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.symbols.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// `(reference position, symbol)` pairs in reference order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(move |(i, &symbol)| (self.start + i, symbol))
    }
}

/// Converts reads into [`DecodedAlignment`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentDecoder {
    hard_clips: HardClipPolicy,
}

impl AlignmentDecoder {
    #[must_use]
    pub fn new(hard_clips: HardClipPolicy) -> Self {
        Self { hard_clips }
    }

    /// Decode one read.
    ///
    /// Match operations copy bases, deletions emit [`GAP`], insertions and
    /// soft clips advance through the read without emitting anything.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::HardClip` for hard clips under
    /// `HardClipPolicy::Reject`, `DecodeError::UnsupportedOperation` for
    /// reference skips and padding, `DecodeError::SequenceTooShort` when the
    /// read has fewer bases than its CIGAR consumes, and
    /// `DecodeError::SpanMismatch` when the output length differs from
    /// `reference_end - reference_start`.
    pub fn decode(&self, read: &Read) -> Result<DecodedAlignment, DecodeError> {
        let needed = query_span(&read.ops);
        if read.sequence.len() < needed {
            return Err(DecodeError::SequenceTooShort {
                read: read.name.clone(),
                cigar: format_cigar(&read.ops),
                needed,
                available: read.sequence.len(),
            });
        }

        // cursor + op.len never exceeds `needed` below
        let mut symbols = Vec::with_capacity(read.reference_len());
        let mut cursor = 0;

        for op in &read.ops {
            match op.kind {
                CigarKind::AlignmentMatch | CigarKind::SequenceMatch | CigarKind::SequenceMismatch => {
                    symbols.extend_from_slice(&read.sequence[cursor..cursor + op.len]);
                    cursor += op.len;
                }
                CigarKind::Deletion => {
                    symbols.extend(std::iter::repeat(GAP).take(op.len));
                }
                CigarKind::Insertion | CigarKind::SoftClip => {
                    cursor += op.len;
                }
                CigarKind::HardClip => match self.hard_clips {
                    HardClipPolicy::Reject => {
                        return Err(DecodeError::HardClip {
                            read: read.name.clone(),
                        });
                    }
                    HardClipPolicy::Skip => {}
                },
                CigarKind::Skip | CigarKind::Pad => {
                    return Err(DecodeError::UnsupportedOperation {
                        read: read.name.clone(),
                        kind: op.kind,
                        cigar: format_cigar(&read.ops),
                    });
                }
            }
        }

        if symbols.len() != read.reference_len() {
            return Err(DecodeError::SpanMismatch {
                read: read.name.clone(),
                cigar: format_cigar(&read.ops),
                expected: read.reference_len(),
                actual: symbols.len(),
            });
        }

        Ok(DecodedAlignment {
            start: read.reference_start,
            symbols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cigar::CigarOp;

    fn op(kind: CigarKind, len: usize) -> CigarOp {
        CigarOp::new(kind, len)
    }

    #[test]
    fn test_decode_full_match() {
        let read = Read::new("r1", vec![op(CigarKind::AlignmentMatch, 3)], b"ACG".to_vec(), 0);
        let decoded = AlignmentDecoder::default().decode(&read).unwrap();
        assert_eq!(decoded.start, 0);
        assert_eq!(decoded.symbols, b"ACG");
        assert_eq!(decoded.iter().collect::<Vec<_>>(), vec![(0, b'A'), (1, b'C'), (2, b'G')]);
    }

    #[test]
    fn test_decode_soft_clip_insertion_deletion() {
        // 2S 2M 1I 2D 1X: bases TT AC G (ins) - - A
        let read = Read::new(
            "r1",
            vec![
                op(CigarKind::SoftClip, 2),
                op(CigarKind::AlignmentMatch, 2),
                op(CigarKind::Insertion, 1),
                op(CigarKind::Deletion, 2),
                op(CigarKind::SequenceMismatch, 1),
            ],
            b"TTACGA".to_vec(),
            100,
        );
        let decoded = AlignmentDecoder::default().decode(&read).unwrap();
        assert_eq!(decoded.start, 100);
        assert_eq!(decoded.end(), 105);
        assert_eq!(decoded.symbols, b"AC--A");
    }

    #[test]
    fn test_decode_keeps_bases_outside_alphabet() {
        let read = Read::new("r1", vec![op(CigarKind::SequenceMatch, 3)], b"ANT".to_vec(), 7);
        let decoded = AlignmentDecoder::default().decode(&read).unwrap();
        assert_eq!(decoded.symbols, b"ANT");
    }

    #[test]
    fn test_decode_hard_clip_rejected_by_default() {
        let read = Read::new(
            "clipped",
            vec![op(CigarKind::HardClip, 5), op(CigarKind::AlignmentMatch, 2)],
            b"AC".to_vec(),
            0,
        );
        let err = AlignmentDecoder::default().decode(&read).unwrap_err();
        assert!(matches!(err, DecodeError::HardClip { ref read } if read == "clipped"));
    }

    #[test]
    fn test_decode_hard_clip_skipped() {
        let read = Read::new(
            "clipped",
            vec![
                op(CigarKind::HardClip, 5),
                op(CigarKind::AlignmentMatch, 2),
                op(CigarKind::HardClip, 3),
            ],
            b"AC".to_vec(),
            4,
        );
        let decoded = AlignmentDecoder::new(HardClipPolicy::Skip).decode(&read).unwrap();
        assert_eq!(decoded.start, 4);
        assert_eq!(decoded.symbols, b"AC");
    }

    #[test]
    fn test_decode_reference_skip_unsupported() {
        let read = Read::new(
            "spliced",
            vec![
                op(CigarKind::AlignmentMatch, 1),
                op(CigarKind::Skip, 10),
                op(CigarKind::AlignmentMatch, 1),
            ],
            b"AC".to_vec(),
            0,
        );
        let err = AlignmentDecoder::default().decode(&read).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedOperation {
                kind: CigarKind::Skip,
                ..
            }
        ));
        assert!(err.to_string().contains("1M10N1M"));
    }

    #[test]
    fn test_decode_sequence_too_short() {
        let read = Read::new(
            "short",
            vec![op(CigarKind::SoftClip, 2), op(CigarKind::AlignmentMatch, 4)],
            b"ACGTA".to_vec(),
            0,
        );
        let err = AlignmentDecoder::default().decode(&read).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SequenceTooShort {
                needed: 6,
                available: 5,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Read 'short' has 5 bases but its CIGAR 2S4M consumes 6"
        );
    }

    #[test]
    fn test_decode_span_mismatch() {
        let mut read = Read::new("bad", vec![op(CigarKind::AlignmentMatch, 3)], b"ACG".to_vec(), 0);
        read.reference_end = 5;
        let err = AlignmentDecoder::default().decode(&read).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SpanMismatch {
                expected: 5,
                actual: 3,
                ..
            }
        ));
    }
}
