use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::alphabet::Alphabet;
use crate::core::window::Window;
use crate::pileup::accumulate::{CountTensor, SampleCounts};
use crate::pileup::classify::{VariantClassifier, VariantRecord};
use crate::pileup::coverage::CoverageMatrix;
use crate::pileup::decode::{AlignmentDecoder, HardClipPolicy};
use crate::pileup::frequency::FrequencyTensor;
use crate::pileup::source::AlignmentSource;
use crate::pileup::PileupError;

/// Default minimum per-sample depth for a locus to count as covered
pub const DEFAULT_MIN_COVERAGE: u64 = 100;

/// Configuration for a pileup run
#[derive(Debug, Clone)]
pub struct PileupConfig {
    /// Cells with depth strictly below this are masked
    pub min_coverage: u64,

    pub hard_clips: HardClipPolicy,

    /// Worker threads for per-sample accumulation and classification
    pub threads: usize,
}

impl Default for PileupConfig {
    fn default() -> Self {
        Self {
            min_coverage: DEFAULT_MIN_COVERAGE,
            hard_clips: HardClipPolicy::default(),
            threads: 1,
        }
    }
}

/// Everything derived from one run
#[derive(Debug, Clone)]
pub struct PileupResult {
    pub counts: CountTensor,

    /// Depth after masking
    pub coverage: CoverageMatrix,

    pub frequencies: FrequencyTensor,

    /// Minority records, in locus then alphabet order
    pub variants: Vec<VariantRecord>,
}

/// Count every read of one sample into a fresh [`SampleCounts`].
///
/// # Errors
///
/// Returns the first error from the source or the decoder.
pub fn accumulate_sample<S: AlignmentSource>(
    source: &mut S,
    window: &Window,
    alphabet: &Alphabet,
    decoder: AlignmentDecoder,
) -> Result<SampleCounts, PileupError> {
    let label = source.label();
    let mut counts = SampleCounts::new(window.len(), alphabet.len());
    let mut reads: u64 = 0;
    let mut observations: u64 = 0;

    source.visit_reads(window, |read| {
        let decoded = decoder.decode(&read)?;
        observations += counts.add(&decoded, window, alphabet) as u64;
        reads += 1;
        Ok(())
    })?;

    info!(
        source = %label,
        reads,
        observations,
        dropped = counts.dropped(),
        "Accumulated sample"
    );

    Ok(counts)
}

/// Derive coverage, frequencies and variant records from merged counts
#[must_use]
pub fn summarize(counts: CountTensor, alphabet: &Alphabet, min_coverage: u64) -> PileupResult {
    let coverage = CoverageMatrix::from_counts(&counts).masked(min_coverage);
    let frequencies = FrequencyTensor::normalize(&counts, &coverage);
    let variants = VariantClassifier::new(alphabet).variants(&frequencies, &coverage);

    debug!(
        loci = counts.loci(),
        samples = counts.samples(),
        variants = variants.len(),
        "Classified loci"
    );

    PileupResult {
        counts,
        coverage,
        frequencies,
        variants,
    }
}

/// Run the full pipeline over one source per sample.
///
/// Samples are accumulated in parallel, each into its own counts, and
/// stacked in input order once all have finished, so the result does not
/// depend on scheduling.
///
/// # Errors
///
/// Returns `PileupError::ThreadPool` if the worker pool cannot be built, or
/// the first source or decode error from any sample.
pub fn run<S>(
    sources: Vec<S>,
    window: &Window,
    alphabet: &Alphabet,
    config: &PileupConfig,
) -> Result<PileupResult, PileupError>
where
    S: AlignmentSource + Send,
{
    let decoder = AlignmentDecoder::new(config.hard_clips);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()
        .map_err(|e| PileupError::ThreadPool(e.to_string()))?;

    info!(
        window = %window,
        samples = sources.len(),
        threads = config.threads.max(1),
        "Building pileup"
    );

    let samples: Vec<SampleCounts> = pool.install(|| {
        sources
            .into_par_iter()
            .map(|mut source| accumulate_sample(&mut source, window, alphabet, decoder))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let counts = if samples.is_empty() {
        CountTensor::zeros(window.len(), alphabet.len(), 0)
    } else {
        CountTensor::from_samples(&samples)?
    };

    Ok(pool.install(|| summarize(counts, alphabet, config.min_coverage)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cigar::{CigarKind, CigarOp};
    use crate::core::read::Read;

    fn matched(name: &str, bases: &str, start: usize) -> Read {
        Read::new(
            name,
            vec![CigarOp::new(CigarKind::AlignmentMatch, bases.len())],
            bases.as_bytes().to_vec(),
            start,
        )
    }

    #[test]
    fn test_run_single_sample() {
        let sources = vec![vec![matched("r1", "ACG", 0), matched("r2", "ACT", 0)]];
        let config = PileupConfig {
            min_coverage: 2,
            ..PileupConfig::default()
        };
        let result = run(
            sources,
            &Window::whole("ref", 3),
            &Alphabet::nucleotide(),
            &config,
        )
        .unwrap();

        assert_eq!(result.counts.get(0, 0, 0), 2);
        assert_eq!(result.coverage.row(2), &[2]);
        assert_eq!(result.variants.len(), 1);
        assert_eq!(result.variants[0].locus, 2);
        assert_eq!(result.variants[0].symbol, b'T');
        assert_eq!(result.variants[0].frequencies, vec![0.5]);
    }

    #[test]
    fn test_run_propagates_decode_errors() {
        let clipped = Read::new(
            "clipped",
            vec![
                CigarOp::new(CigarKind::HardClip, 2),
                CigarOp::new(CigarKind::AlignmentMatch, 1),
            ],
            b"A".to_vec(),
            0,
        );
        let result = run(
            vec![vec![clipped]],
            &Window::whole("ref", 1),
            &Alphabet::nucleotide(),
            &PileupConfig::default(),
        );
        assert!(matches!(result, Err(PileupError::Decode(_))));
    }

    #[test]
    fn test_run_without_samples() {
        let sources: Vec<Vec<Read>> = Vec::new();
        let result = run(
            sources,
            &Window::whole("ref", 4),
            &Alphabet::nucleotide(),
            &PileupConfig::default(),
        )
        .unwrap();
        assert_eq!(result.counts.shape(), (4, 5, 0));
        assert!(result.variants.is_empty());
    }

    #[test]
    fn test_default_min_coverage() {
        assert_eq!(PileupConfig::default().min_coverage, 100);
        assert_eq!(PileupConfig::default().hard_clips, HardClipPolicy::Reject);
    }
}
