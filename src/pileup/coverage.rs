//! Per-locus, per-sample depth and coverage masking.

use crate::pileup::accumulate::CountTensor;

/// Total counts across the alphabet for each `(locus, sample)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMatrix {
    loci: usize,
    samples: usize,
    depth: Vec<u64>,
}

impl CoverageMatrix {
    /// Sum the count tensor over its symbol axis
    #[must_use]
    pub fn from_counts(counts: &CountTensor) -> Self {
        let (loci, symbols, samples) = counts.shape();
        let mut depth = vec![0u64; loci * samples];

        for locus in 0..loci {
            for symbol in 0..symbols {
                for sample in 0..samples {
                    depth[locus * samples + sample] += counts.get(locus, symbol, sample);
                }
            }
        }

        Self {
            loci,
            samples,
            depth,
        }
    }

    /// Zero every cell whose depth is below `min_coverage`.
    ///
    /// A zeroed cell means "no data" for that sample at that locus. The
    /// count tensor is left untouched.
    #[must_use]
    pub fn masked(&self, min_coverage: u64) -> Self {
        Self {
            loci: self.loci,
            samples: self.samples,
            depth: self
                .depth
                .iter()
                .map(|&d| if d < min_coverage { 0 } else { d })
                .collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, locus: usize, sample: usize) -> u64 {
        self.depth[locus * self.samples + sample]
    }

    /// Depths of every sample at one locus
    #[must_use]
    pub fn row(&self, locus: usize) -> &[u64] {
        &self.depth[locus * self.samples..(locus + 1) * self.samples]
    }

    /// Whether any sample has nonzero depth at the locus
    #[must_use]
    pub fn is_covered(&self, locus: usize) -> bool {
        self.row(locus).iter().any(|&d| d > 0)
    }

    #[must_use]
    pub fn loci(&self) -> usize {
        self.loci
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }
}
