use serde::{Deserialize, Serialize};

/// The resolved reference region a pileup is computed over.
///
/// `[start, end)` is 0-based and half-open. Loci inside the pileup are
/// indexed relative to `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub reference: String,
    pub start: usize,
    pub end: usize,

    /// Whether the region came from the user rather than the full reference length
    pub explicit: bool,
}

impl Window {
    /// A window covering a whole reference of `length` bases
    pub fn whole(reference: impl Into<String>, length: usize) -> Self {
        Self {
            reference: reference.into(),
            start: 0,
            end: length,
            explicit: false,
        }
    }

    /// A user-supplied region; callers validate `start < end`
    pub fn region(reference: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            reference: reference.into(),
            start,
            end,
            explicit: true,
        }
    }

    /// Number of loci in the window
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end
    }

    /// Locus index of an absolute reference position, if inside the window
    #[must_use]
    pub fn locus_of(&self, position: usize) -> Option<usize> {
        self.contains(position).then(|| position - self.start)
    }

    /// Absolute 0-based reference position of a locus index
    #[must_use]
    pub fn position_of(&self, locus: usize) -> usize {
        self.start + locus
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.reference, self.start, self.end)
    }
}
