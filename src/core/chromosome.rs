use std::collections::HashMap;
use std::hash::{Hash, Hasher};

const EMPTY_CHROMOSOME_INDEX: usize = usize::MAX;

/// A catalogued chromosome. Known chromosomes compare by catalogue index;
/// synthetic chromosomes built from unrecognized reference names compare by
/// the literal name they carry.
#[derive(Debug, Clone, Eq)]
pub struct Chromosome {
    pub ucsc_name: String,
    pub ensembl_name: String,
    index: usize,
}

impl Chromosome {
    pub fn new(ucsc_name: impl Into<String>, ensembl_name: impl Into<String>, index: usize) -> Self {
        Self {
            ucsc_name: ucsc_name.into(),
            ensembl_name: ensembl_name.into(),
            index,
        }
    }

    /// Synthetic chromosome for a name the catalogue does not know.
    pub fn unknown(name: &str) -> Self {
        Self {
            ucsc_name: name.to_string(),
            ensembl_name: name.to_string(),
            index: EMPTY_CHROMOSOME_INDEX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.index == EMPTY_CHROMOSOME_INDEX
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        if self.index != other.index {
            return false;
        }
        !self.is_empty() || self.ensembl_name == other.ensembl_name
    }
}

impl Hash for Chromosome {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ensembl_name.hash(state);
    }
}

/// Read-only resolution of reference names to chromosomes.
pub trait ChromosomeLookup {
    /// Unknown names yield the synthetic empty chromosome carrying the name.
    fn chromosome(&self, name: &str) -> Chromosome;
}

/// Catalogue keyed by both the UCSC-style and the ensembl-style name.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeSet {
    by_name: HashMap<String, Chromosome>,
    count: usize,
}

impl ChromosomeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ucsc_name: &str, ensembl_name: &str) {
        let chromosome = Chromosome::new(ucsc_name, ensembl_name, self.count);
        self.count += 1;
        self.by_name
            .insert(ucsc_name.to_string(), chromosome.clone());
        self.by_name.insert(ensembl_name.to_string(), chromosome);
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut set = Self::new();
        for (ucsc_name, ensembl_name) in pairs {
            set.insert(ucsc_name, ensembl_name);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl ChromosomeLookup for ChromosomeSet {
    fn chromosome(&self, name: &str) -> Chromosome {
        self.by_name
            .get(name)
            .cloned()
            .unwrap_or_else(|| Chromosome::unknown(name))
    }
}

/// Read-only query for sites where the reference allele is the population
/// minor allele.
pub trait RefMinorProvider {
    fn global_major_allele(&self, chromosome: &Chromosome, position: i64) -> Option<String>;
}

/// In-memory ref-minor store keyed by `(ensembl name, position)`.
#[derive(Debug, Clone, Default)]
pub struct RefMinorTable {
    alleles: HashMap<(String, i64), String>,
}

impl RefMinorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chromosome: &Chromosome, position: i64, global_major_allele: &str) {
        self.alleles.insert(
            (chromosome.ensembl_name.clone(), position),
            global_major_allele.to_string(),
        );
    }
}

impl RefMinorProvider for RefMinorTable {
    fn global_major_allele(&self, chromosome: &Chromosome, position: i64) -> Option<String> {
        self.alleles
            .get(&(chromosome.ensembl_name.clone(), position))
            .cloned()
    }
}
