use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::validation::ConfigError;

/// The gap symbol emitted for reference positions covered by a deletion
pub const GAP: u8 = b'-';

/// Nucleotide alphabet in output and tie-break order
const NUCLEOTIDES: &[u8] = b"ACGT-";

/// Which alphabet the pileup is computed over
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlphabetMode {
    /// A, C, G, T and the gap symbol
    #[default]
    Nucleotide,
    /// Reading-frame translation to amino acids (not implemented)
    AminoAcid,
}

impl fmt::Display for AlphabetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nucleotide => write!(f, "nucleotide"),
            Self::AminoAcid => write!(f, "amino-acid"),
        }
    }
}

/// An ordered, bidirectional symbol <-> index mapping.
///
/// Symbol order defines both the output row order and the majority
/// tie-break priority: on equal summed frequency the lower index wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    index: [Option<u8>; 256],
}

impl Alphabet {
    /// Build an alphabet from an ordered list of distinct symbols.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAlphabet` if the list is empty, has more
    /// than 255 symbols, or contains a duplicate.
    pub fn new(symbols: &[u8]) -> Result<Self, ConfigError> {
        if symbols.is_empty() || symbols.len() > usize::from(u8::MAX) {
            return Err(ConfigError::InvalidAlphabet(format!(
                "alphabet must have between 1 and 255 symbols, got {}",
                symbols.len()
            )));
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(ConfigError::InvalidAlphabet(format!(
                    "duplicate symbol '{}'",
                    char::from(*symbol)
                )));
            }
        }

        Ok(Self::from_distinct(symbols))
    }

    /// Build the lookup table for symbols already known to be distinct and
    /// at most 255 in number.
    fn from_distinct(symbols: &[u8]) -> Self {
        let mut index = [None; 256];
        for (i, &symbol) in symbols.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // At most 255 symbols
            {
                index[usize::from(symbol)] = Some(i as u8);
            }
        }
        Self {
            symbols: symbols.to_vec(),
            index,
        }
    }

    /// The nucleotide alphabet `A, C, G, T, -`
    #[must_use]
    pub fn nucleotide() -> Self {
        Self::from_distinct(NUCLEOTIDES)
    }

    /// Resolve the alphabet for a configured mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnimplementedAlphabet` for amino-acid mode.
    pub fn for_mode(mode: AlphabetMode) -> Result<Self, ConfigError> {
        match mode {
            AlphabetMode::Nucleotide => Self::new(NUCLEOTIDES),
            AlphabetMode::AminoAcid => Err(ConfigError::UnimplementedAlphabet(mode)),
        }
    }

    /// Index of a symbol, or `None` if it is not part of the alphabet
    #[inline]
    #[must_use]
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.index[usize::from(symbol)].map(usize::from)
    }

    /// Symbol at an index
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[must_use]
    pub fn symbol(&self, index: usize) -> u8 {
        self.symbols[index]
    }

    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::nucleotide()
    }
}
