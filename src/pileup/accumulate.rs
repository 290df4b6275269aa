//! Per-sample base counting and the merged count tensor.

use tracing::debug;

use crate::core::alphabet::Alphabet;
use crate::core::window::Window;
use crate::pileup::decode::DecodedAlignment;
use crate::pileup::PileupError;

/// Base counts for a single sample, indexed by `(locus, symbol)`.
///
/// Owned privately by whichever worker accumulates the sample; counts
/// only ever increase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleCounts {
    loci: usize,
    symbols: usize,
    counts: Vec<u64>,
    /// Pairs dropped because the symbol is outside the alphabet
    dropped: u64,
}

impl SampleCounts {
    #[must_use]
    pub fn new(loci: usize, symbols: usize) -> Self {
        Self {
            loci,
            symbols,
            counts: vec![0; loci * symbols],
            dropped: 0,
        }
    }

    /// Add one decoded read.
    ///
    /// Positions outside `window` and symbols outside `alphabet` are dropped
    /// silently. Returns the number of positions counted.
    pub fn add(
        &mut self,
        alignment: &DecodedAlignment,
        window: &Window,
        alphabet: &Alphabet,
    ) -> usize {
        let mut added = 0;
        for (position, symbol) in alignment.iter() {
            let Some(locus) = window.locus_of(position) else {
                continue;
            };
            let Some(index) = alphabet.index_of(symbol) else {
                self.dropped += 1;
                continue;
            };
            self.counts[locus * self.symbols + index] += 1;
            added += 1;
        }
        added
    }

    /// Elementwise sum with another partial count for the same sample.
    ///
    /// # Errors
    ///
    /// Returns `PileupError::ShapeMismatch` if the shapes differ.
    pub fn merge(&mut self, other: &SampleCounts) -> Result<(), PileupError> {
        if (self.loci, self.symbols) != (other.loci, other.symbols) {
            return Err(PileupError::ShapeMismatch {
                expected: format!("{}x{}", self.loci, self.symbols),
                actual: format!("{}x{}", other.loci, other.symbols),
            });
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self.dropped += other.dropped;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, locus: usize, symbol: usize) -> u64 {
        self.counts[locus * self.symbols + symbol]
    }

    #[must_use]
    pub fn loci(&self) -> usize {
        self.loci
    }

    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Counts indexed by `(locus, symbol, sample)`, stored densely with the
/// sample axis innermost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTensor {
    loci: usize,
    symbols: usize,
    samples: usize,
    counts: Vec<u64>,
}

impl CountTensor {
    #[must_use]
    pub fn zeros(loci: usize, symbols: usize, samples: usize) -> Self {
        Self {
            loci,
            symbols,
            samples,
            counts: vec![0; loci * symbols * samples],
        }
    }

    /// Stack per-sample counts along the sample axis, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `PileupError::ShapeMismatch` if the samples disagree on shape.
    pub fn from_samples(samples: &[SampleCounts]) -> Result<Self, PileupError> {
        let Some(first) = samples.first() else {
            return Ok(Self::zeros(0, 0, 0));
        };
        let (loci, symbols) = (first.loci, first.symbols);
        let mut tensor = Self::zeros(loci, symbols, samples.len());

        for (sample, counts) in samples.iter().enumerate() {
            if (counts.loci, counts.symbols) != (loci, symbols) {
                return Err(PileupError::ShapeMismatch {
                    expected: format!("{loci}x{symbols}"),
                    actual: format!("{}x{}", counts.loci, counts.symbols),
                });
            }
            for (cell, &count) in counts.counts.iter().enumerate() {
                tensor.counts[cell * tensor.samples + sample] = count;
            }
            debug!(sample, dropped = counts.dropped, "Stacked sample counts");
        }

        Ok(tensor)
    }

    /// Elementwise sum with another tensor of the same shape.
    ///
    /// # Errors
    ///
    /// Returns `PileupError::ShapeMismatch` if the shapes differ.
    pub fn merge(&mut self, other: &CountTensor) -> Result<(), PileupError> {
        if self.shape() != other.shape() {
            return Err(PileupError::ShapeMismatch {
                expected: format!("{:?}", self.shape()),
                actual: format!("{:?}", other.shape()),
            });
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, locus: usize, symbol: usize, sample: usize) -> u64 {
        self.counts[(locus * self.symbols + symbol) * self.samples + sample]
    }

    /// `(loci, symbols, samples)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.loci, self.symbols, self.samples)
    }

    #[must_use]
    pub fn loci(&self) -> usize {
        self.loci
    }

    #[must_use]
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }
}
