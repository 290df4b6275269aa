//! Normalizing masked counts to per-sample frequencies.

use crate::pileup::accumulate::CountTensor;
use crate::pileup::coverage::CoverageMatrix;

/// Frequencies indexed by `(locus, symbol, sample)`, each in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTensor {
    loci: usize,
    symbols: usize,
    samples: usize,
    values: Vec<f64>,
}

impl FrequencyTensor {
    /// Divide each count by its cell's coverage.
    ///
    /// Cells with zero coverage, masked ones included, get frequency 0 for
    /// every symbol; no division is attempted for them.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Depths and counts stay far below 2^52
    pub fn normalize(counts: &CountTensor, coverage: &CoverageMatrix) -> Self {
        let (loci, symbols, samples) = counts.shape();
        let mut values = vec![0.0; loci * symbols * samples];

        for locus in 0..loci {
            for sample in 0..samples {
                let depth = coverage.get(locus, sample);
                if depth == 0 {
                    continue;
                }
                for symbol in 0..symbols {
                    values[(locus * symbols + symbol) * samples + sample] =
                        counts.get(locus, symbol, sample) as f64 / depth as f64;
                }
            }
        }

        Self {
            loci,
            symbols,
            samples,
            values,
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, locus: usize, symbol: usize, sample: usize) -> f64 {
        self.values[(locus * self.symbols + symbol) * self.samples + sample]
    }

    /// Per-sample frequencies of one symbol at one locus
    #[must_use]
    pub fn samples_of(&self, locus: usize, symbol: usize) -> &[f64] {
        let offset = (locus * self.symbols + symbol) * self.samples;
        &self.values[offset..offset + self.samples]
    }

    /// `(loci, symbols, samples)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.loci, self.symbols, self.samples)
    }
}
