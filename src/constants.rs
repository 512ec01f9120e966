/// Field value spelling "missing" throughout a call line.
pub const MISSING_FIELD: &str = ".";

/// ALT alleles that never produce a variant on their own.
pub const NON_INFORMATIVE_ALTS: [&str; 3] = ["*", "<NON_REF>", "<*>"];

/// The gVCF symbolic non-reference allele.
pub const GATK_NON_REF_ALT: &str = "<NON_REF>";

// Column layout of a tab-separated variant call line.
pub const VCF_CHROM: usize = 0;
pub const VCF_POS: usize = 1;
pub const VCF_ID: usize = 2;
pub const VCF_REF: usize = 3;
pub const VCF_ALT: usize = 4;
pub const VCF_QUAL: usize = 5;
pub const VCF_FILTER: usize = 6;
pub const VCF_INFO: usize = 7;
pub const VCF_FORMAT: usize = 8;
pub const VCF_SAMPLE_START: usize = 9;
pub const VCF_MIN_FIELDS: usize = 8;
