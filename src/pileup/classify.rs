//! Majority and minority symbol classification per locus.

use rayon::prelude::*;

use crate::core::alphabet::Alphabet;
use crate::pileup::coverage::CoverageMatrix;
use crate::pileup::frequency::FrequencyTensor;

/// A minority symbol observed at a locus
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    /// Locus index within the window
    pub locus: usize,

    /// The minority symbol
    pub symbol: u8,

    /// Frequency of the symbol in each sample, 0 where coverage is masked
    pub frequencies: Vec<f64>,
}

/// Classification of a single covered locus
#[derive(Debug, Clone, PartialEq)]
pub struct LocusCall {
    pub locus: usize,

    /// Alphabet index of the majority symbol
    pub majority: usize,

    pub variants: Vec<VariantRecord>,
}

/// Index of the largest value; ties go to the lowest index.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn majority_index(sums: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in sums.iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// Splits each locus into its majority symbol and the remaining observed symbols
#[derive(Debug, Clone, Copy)]
pub struct VariantClassifier<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> VariantClassifier<'a> {
    #[must_use]
    pub fn new(alphabet: &'a Alphabet) -> Self {
        Self { alphabet }
    }

    /// Classify one locus.
    ///
    /// Returns `None` when no sample has coverage at the locus.
    #[must_use]
    pub fn classify_locus(
        &self,
        locus: usize,
        frequencies: &FrequencyTensor,
        coverage: &CoverageMatrix,
    ) -> Option<LocusCall> {
        let depths = coverage.row(locus);
        if depths.iter().all(|&d| d == 0) {
            return None;
        }

        // Summed over every sample: candidacy
        let totals: Vec<f64> = (0..self.alphabet.len())
            .map(|symbol| frequencies.samples_of(locus, symbol).iter().sum())
            .collect();

        // Summed over covered samples only: majority
        let covered_totals: Vec<f64> = (0..self.alphabet.len())
            .map(|symbol| {
                frequencies
                    .samples_of(locus, symbol)
                    .iter()
                    .zip(depths)
                    .filter(|(_, &depth)| depth > 0)
                    .map(|(&freq, _)| freq)
                    .sum()
            })
            .collect();

        let majority = majority_index(&covered_totals)?;

        let variants = totals
            .iter()
            .enumerate()
            .filter(|&(symbol, &total)| symbol != majority && total > 0.0)
            .map(|(symbol, _)| VariantRecord {
                locus,
                symbol: self.alphabet.symbol(symbol),
                frequencies: frequencies.samples_of(locus, symbol).to_vec(),
            })
            .collect();

        Some(LocusCall {
            locus,
            majority,
            variants,
        })
    }

    /// Classify every locus, in locus order.
    ///
    /// Loci are independent and processed on the current rayon pool.
    #[must_use]
    pub fn classify(
        &self,
        frequencies: &FrequencyTensor,
        coverage: &CoverageMatrix,
    ) -> Vec<LocusCall> {
        (0..coverage.loci())
            .into_par_iter()
            .filter_map(|locus| self.classify_locus(locus, frequencies, coverage))
            .collect()
    }

    /// Minority records of every locus, in locus then alphabet order
    #[must_use]
    pub fn variants(
        &self,
        frequencies: &FrequencyTensor,
        coverage: &CoverageMatrix,
    ) -> Vec<VariantRecord> {
        self.classify(frequencies, coverage)
            .into_iter()
            .flat_map(|call| call.variants)
            .collect()
    }
}
