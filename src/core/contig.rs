use serde::{Deserialize, Serialize};

/// A single reference sequence: name and length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    /// Sequence name (SN tag in SAM, FASTA record name)
    pub name: String,

    /// Sequence length (LN tag in SAM)
    pub length: u64,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// The reference sequences available to a run, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDictionary {
    /// Where the dictionary was read from (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub contigs: Vec<Contig>,
}

impl ReferenceDictionary {
    #[must_use]
    pub fn new(contigs: Vec<Contig>) -> Self {
        Self {
            source: None,
            contigs,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Look up a contig by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Contig> {
        self.contigs.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}
