mod extractor;
mod format_indices;

pub use extractor::SampleFieldExtractor;
pub use format_indices::FormatIndices;

/// Per-sample record parsed from one colon-delimited sample column. Every
/// field a caller did not supply, or supplied as `.`, stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub genotype: Option<String>,
    pub genotype_quality: Option<i32>,
    pub total_depth: Option<i32>,
    pub allele_depths: Option<Vec<i32>>,
    pub variant_frequency: Option<f64>,
    pub failed_filter: bool,
    pub paired_end_read_counts: Option<Vec<i32>>,
    pub split_read_counts: Option<Vec<i32>>,
    pub de_novo_quality: Option<i32>,
    pub copy_number: Option<i32>,
    pub major_chromosome_copy: Option<i32>,
    pub is_loss_of_heterozygosity: bool,
    pub disease_affected_statuses: Option<Vec<String>>,
    pub disease_ids: Option<Vec<String>>,
    pub disease_classification_sources: Option<Vec<String>>,
    pub silent_carrier_haplotype: Option<String>,
    pub paralogous_gene_copy_numbers: Option<Vec<i32>>,
    pub paralogous_entrez_gene_ids: Option<Vec<i64>>,
    pub mpileup_allele_depths: Option<Vec<i32>>,
    pub haplotype_copy_numbers: Option<Vec<i32>>,
    pub is_empty: bool,
}

impl Sample {
    /// The record for a sample column that is `.` or empty.
    pub fn empty() -> Self {
        Self {
            is_empty: true,
            ..Default::default()
        }
    }
}

/// Parse every sample column of a call line. `None` when the line carries no
/// FORMAT descriptor. `info_depth` is the per-line DP override used by
/// callers that report depth on the line instead of the sample.
pub fn extract_samples(
    format: Option<&str>,
    sample_columns: &[&str],
    ref_allele: &str,
    alt_alleles: &[&str],
    info_depth: Option<i32>,
) -> Option<Vec<Sample>> {
    let format = format?;
    let extractor = SampleFieldExtractor::new(format, ref_allele, alt_alleles, info_depth);
    Some(
        sample_columns
            .iter()
            .map(|column| extractor.extract(column))
            .collect(),
    )
}
