use crate::constants::MISSING_FIELD;
use crate::core::sample::{FormatIndices, Sample};

/// Numerator/denominator basis of the allele-depth source that won the
/// tie-break, kept so the variant frequency divides by the same totals the
/// source reported.
struct DepthSource {
    depths: Vec<i32>,
    ref_count: i32,
    total: i32,
}

/// Parses sample columns against one FORMAT descriptor. The reference and
/// alternate alleles are needed to map the Strelka per-base counts;
/// `info_depth` is the per-line DP override some callers use.
pub struct SampleFieldExtractor<'a> {
    indices: FormatIndices,
    ref_allele: &'a str,
    alt_alleles: &'a [&'a str],
    info_depth: Option<i32>,
}

impl<'a> SampleFieldExtractor<'a> {
    pub fn new(
        format: &str,
        ref_allele: &'a str,
        alt_alleles: &'a [&'a str],
        info_depth: Option<i32>,
    ) -> Self {
        Self {
            indices: FormatIndices::from_format(format),
            ref_allele,
            alt_alleles,
            info_depth,
        }
    }

    pub fn extract(&self, sample_column: &str) -> Sample {
        if sample_column.is_empty() || sample_column == MISSING_FIELD {
            return Sample::empty();
        }
        let fields: Vec<&str> = sample_column.split(':').collect();

        let depth_source = self.depth_source(&fields);
        let variant_frequency = self.variant_frequency(&fields, depth_source.as_ref());
        let copy_number = self.field(&fields, self.indices.cn).and_then(parse_number);
        let major_chromosome_copy = self.field(&fields, self.indices.mcc).and_then(parse_number);
        let is_loss_of_heterozygosity = matches!(
            (copy_number, major_chromosome_copy),
            (Some(cn), Some(mcc)) if mcc == cn && cn >= 2
        );

        Sample {
            genotype: self.field(&fields, self.indices.gt).map(str::to_string),
            genotype_quality: self.genotype_quality(&fields),
            total_depth: self.total_depth(&fields),
            allele_depths: depth_source.map(|source| source.depths),
            variant_frequency,
            failed_filter: self.failed_filter(&fields),
            paired_end_read_counts: self
                .field(&fields, self.indices.pr)
                .and_then(parse_number_array),
            split_read_counts: self
                .field(&fields, self.indices.sr)
                .and_then(parse_number_array),
            de_novo_quality: self.field(&fields, self.indices.dq).and_then(parse_number),
            copy_number,
            major_chromosome_copy,
            is_loss_of_heterozygosity,
            disease_affected_statuses: self
                .field(&fields, self.indices.dst)
                .map(parse_string_array),
            disease_ids: self.field(&fields, self.indices.did).map(parse_string_array),
            disease_classification_sources: self
                .field(&fields, self.indices.dcs)
                .map(parse_string_array),
            silent_carrier_haplotype: self
                .field(&fields, self.indices.sch)
                .map(str::to_string),
            paralogous_gene_copy_numbers: self
                .field(&fields, self.indices.pcn)
                .and_then(parse_number_array),
            paralogous_entrez_gene_ids: self
                .field(&fields, self.indices.plg)
                .and_then(parse_number_array),
            mpileup_allele_depths: self
                .field(&fields, self.indices.mad)
                .and_then(parse_number_array),
            haplotype_copy_numbers: self
                .field(&fields, self.indices.chc)
                .and_then(parse_number_array),
            is_empty: false,
        }
    }

    /// The cell at `index`, unless it is absent, out of range, `.` or empty.
    fn field<'f>(&self, fields: &[&'f str], index: Option<usize>) -> Option<&'f str> {
        let value = *fields.get(index?)?;
        if value.is_empty() || value == MISSING_FIELD {
            None
        } else {
            Some(value)
        }
    }

    fn is_single_alt(&self) -> bool {
        self.alt_alleles.len() == 1
    }

    fn has_strelka_counts(&self) -> bool {
        self.indices.au.is_some()
            && self.indices.cu.is_some()
            && self.indices.gu.is_some()
            && self.indices.tu.is_some()
    }

    /// GQX beats GQ when both are present; `.` defers to the other source.
    fn genotype_quality(&self, fields: &[&str]) -> Option<i32> {
        self.field(fields, self.indices.gqx)
            .and_then(parse_number)
            .or_else(|| self.field(fields, self.indices.gq).and_then(parse_number))
    }

    /// FT fails the sample for any value other than PASS, `.` or empty.
    fn failed_filter(&self, fields: &[&str]) -> bool {
        match self.field(fields, self.indices.ft) {
            Some(value) => value != "PASS",
            None => false,
        }
    }

    /// Total depth by source priority. On a multi-allelic record the indel
    /// tier counts, the Strelka per-base counts and the NR form are disabled
    /// and the chain falls through to DPI/DP. A `.` at the first matched
    /// source yields undefined without falling further.
    fn total_depth(&self, fields: &[&str]) -> Option<i32> {
        if self.is_single_alt() {
            if self.indices.tar.is_some() && self.indices.tir.is_some() {
                let reference = tier1_count(self.field(fields, self.indices.tar)?)?;
                let indel = tier1_count(self.field(fields, self.indices.tir)?)?;
                return Some(reference + indel);
            }
            if self.has_strelka_counts() {
                let mut total = 0;
                for index in [
                    self.indices.au,
                    self.indices.cu,
                    self.indices.gu,
                    self.indices.tu,
                ] {
                    total += tier1_count(self.field(fields, index)?)?;
                }
                return Some(total);
            }
            if self.indices.nr.is_some() {
                return parse_number(self.field(fields, self.indices.nr)?);
            }
        }
        if self.indices.dpi.is_some() {
            return parse_number(self.field(fields, self.indices.dpi)?);
        }
        if self.indices.dp.is_some() {
            return parse_number(self.field(fields, self.indices.dp)?);
        }
        self.info_depth
    }

    /// Allele depths by source priority. Only the Strelka source falls
    /// through to AD (when the selected per-base cell is unusable); on a
    /// multi-allelic record only AD is honored.
    fn depth_source(&self, fields: &[&str]) -> Option<DepthSource> {
        if self.is_single_alt() {
            if self.indices.tar.is_some() && self.indices.tir.is_some() {
                let reference = tier1_count(self.field(fields, self.indices.tar)?)?;
                let indel = tier1_count(self.field(fields, self.indices.tir)?)?;
                return Some(DepthSource {
                    depths: vec![reference, indel],
                    ref_count: reference,
                    total: reference + indel,
                });
            }
            if self.indices.nr.is_some() && self.indices.nv.is_some() {
                let total_reads: i32 = parse_number(self.field(fields, self.indices.nr)?)?;
                let variant_reads: i32 = parse_number(self.field(fields, self.indices.nv)?)?;
                return Some(DepthSource {
                    depths: vec![total_reads - variant_reads, variant_reads],
                    ref_count: total_reads - variant_reads,
                    total: total_reads,
                });
            }
            if self.has_strelka_counts() {
                if let Some(source) = self.strelka_depth_source(fields) {
                    return Some(source);
                }
            }
        }
        let depths = parse_number_array(self.field(fields, self.indices.ad)?)?;
        let ref_count = *depths.first()?;
        let total = depths.iter().sum();
        Some(DepthSource {
            depths,
            ref_count,
            total,
        })
    }

    fn strelka_depth_source(&self, fields: &[&str]) -> Option<DepthSource> {
        let ref_index = self.base_count_index(single_base(self.ref_allele)?)?;
        let alt_index = self.base_count_index(single_base(self.alt_alleles[0])?)?;
        let ref_count = tier1_count(self.field(fields, Some(ref_index))?)?;
        let alt_count = tier1_count(self.field(fields, Some(alt_index))?)?;

        let mut total = 0;
        for index in [
            self.indices.au,
            self.indices.cu,
            self.indices.gu,
            self.indices.tu,
        ] {
            total += tier1_count(self.field(fields, index)?)?;
        }

        Some(DepthSource {
            depths: vec![ref_count, alt_count],
            ref_count,
            total,
        })
    }

    fn base_count_index(&self, base: u8) -> Option<usize> {
        match base {
            b'A' => self.indices.au,
            b'C' => self.indices.cu,
            b'G' => self.indices.gu,
            b'T' => self.indices.tu,
            _ => None,
        }
    }

    /// An explicit numeric VF wins; otherwise the frequency is derived from
    /// the winning allele-depth source as (total - ref) / total, zero when
    /// the source saw no reads at all.
    fn variant_frequency(&self, fields: &[&str], source: Option<&DepthSource>) -> Option<f64> {
        if let Some(value) = self
            .field(fields, self.indices.vf)
            .and_then(|vf| vf.parse::<f64>().ok())
        {
            return Some(round_frequency(value));
        }

        let source = source?;
        if source.total == 0 {
            return Some(0.0);
        }
        let frequency = f64::from(source.total - source.ref_count) / f64::from(source.total);
        Some(round_frequency(frequency))
    }
}

/// Clamp into [0, 1] and keep four decimal places.
fn round_frequency(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0
}

/// First (tier-1) entry of a comma-paired count.
fn tier1_count(value: &str) -> Option<i32> {
    parse_number(value.split(',').next()?)
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value == MISSING_FIELD {
        return None;
    }
    value.parse().ok()
}

fn parse_number_array<T: std::str::FromStr>(value: &str) -> Option<Vec<T>> {
    value.split(',').map(parse_number).collect()
}

fn parse_string_array(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

fn single_base(allele: &str) -> Option<u8> {
    if allele.len() == 1 {
        allele.bytes().next()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_single(format: &str, column: &str) -> Sample {
        SampleFieldExtractor::new(format, "A", &["G"], None).extract(column)
    }

    #[test]
    fn missing_or_empty_column_is_the_empty_sample() {
        for column in [".", ""] {
            let sample = extract_single("GT:AD", column);
            assert!(sample.is_empty);
            assert_eq!(sample.genotype, None);
            assert_eq!(sample.allele_depths, None);
        }
    }

    #[test]
    fn genotype_is_kept_verbatim_including_half_calls() {
        assert_eq!(
            extract_single("GT", "0/1").genotype.as_deref(),
            Some("0/1")
        );
        assert_eq!(
            extract_single("GT", "./.").genotype.as_deref(),
            Some("./.")
        );
        assert_eq!(
            extract_single("GT", "1|0").genotype.as_deref(),
            Some("1|0")
        );
    }

    #[test]
    fn unknown_leading_genotype_is_undefined() {
        let sample = extract_single("GT:GQ", ".:208");
        assert_eq!(sample.genotype, None);
        assert_eq!(sample.genotype_quality, Some(208));
        assert!(!sample.is_empty);
    }

    #[test]
    fn gqx_beats_gq_and_dots_defer() {
        assert_eq!(
            extract_single("GQ:GQX", "30:45").genotype_quality,
            Some(45)
        );
        assert_eq!(
            extract_single("GQ:GQX", "30:.").genotype_quality,
            Some(30)
        );
        assert_eq!(extract_single("GQ:GQX", ".:.").genotype_quality, None);
        assert_eq!(extract_single("GQ", "30").genotype_quality, Some(30));
    }

    #[test]
    fn failed_filter_accepts_pass_dot_and_empty() {
        assert!(!extract_single("GT:FT", "0/1:PASS").failed_filter);
        assert!(!extract_single("GT:FT", "0/1:.").failed_filter);
        assert!(!extract_single("GT", "0/1").failed_filter);
        assert!(extract_single("GT:FT", "0/1:LowGQX").failed_filter);
    }

    #[test]
    fn allele_depths_and_frequency_from_ad() {
        let sample = extract_single("GT:AD", "0/1:5,7");
        assert_eq!(sample.allele_depths, Some(vec![5, 7]));
        assert_eq!(sample.variant_frequency, Some(0.5833));
        assert_eq!(sample.total_depth, None);
    }

    #[test]
    fn somatic_indel_tiers_supply_depths_and_total() {
        // TAR carries reference support, TIR tier-1 the indel support.
        let sample = extract_single("TAR:TIR", "10,14:4,5");
        assert_eq!(sample.total_depth, Some(14));
        assert_eq!(sample.allele_depths, Some(vec![10, 4]));
        assert_eq!(sample.variant_frequency, Some(0.2857));
    }

    #[test]
    fn dotted_tier_counts_leave_depth_undefined_without_fallback() {
        let sample = extract_single("TAR:TIR:AD", ".:4,5:5,7");
        assert_eq!(sample.total_depth, None);
        assert_eq!(sample.allele_depths, None);
        assert_eq!(sample.variant_frequency, None);
    }

    #[test]
    fn platypus_nr_nv_depths_subtract_variant_reads() {
        let sample = extract_single("GT:NR:NV", "0/1:20:8");
        assert_eq!(sample.allele_depths, Some(vec![12, 8]));
        assert_eq!(sample.variant_frequency, Some(0.4));
        assert_eq!(sample.total_depth, Some(20));
    }

    #[test]
    fn strelka_base_counts_map_through_ref_and_alt() {
        let extractor = SampleFieldExtractor::new("GT:AU:CU:GU:TU", "C", &["T"], None);
        let sample = extractor.extract("1/1:10,11:20,21:30,31:40,41");
        assert_eq!(sample.total_depth, Some(100));
        assert_eq!(sample.allele_depths, Some(vec![20, 40]));
        assert_eq!(sample.variant_frequency, Some(0.8));
    }

    #[test]
    fn strelka_frequency_uses_all_base_counts_as_denominator() {
        let extractor = SampleFieldExtractor::new("GT:AU:CU:GU:TU", "A", &["C"], None);
        let sample = extractor.extract("0/1:10,11:20,21:30,31:40,41");
        assert_eq!(sample.allele_depths, Some(vec![10, 20]));
        assert_eq!(sample.variant_frequency, Some(0.9));
    }

    #[test]
    fn dotted_strelka_cell_falls_through_to_ad() {
        let extractor = SampleFieldExtractor::new("GT:AU:CU:GU:TU:AD", "A", &["C"], None);
        let sample = extractor.extract("0/1:.:20,21:30,31:40,41:5,7");
        assert_eq!(sample.allele_depths, Some(vec![5, 7]));
        assert_eq!(sample.variant_frequency, Some(0.5833));
    }

    #[test]
    fn non_snv_alleles_send_strelka_records_to_ad() {
        let extractor = SampleFieldExtractor::new("GT:AU:CU:GU:TU:AD", "AT", &["A"], None);
        let sample = extractor.extract("0/1:10,11:20,21:30,31:40,41:6,2");
        assert_eq!(sample.allele_depths, Some(vec![6, 2]));
    }

    #[test]
    fn multi_allelic_records_only_honor_ad() {
        let extractor =
            SampleFieldExtractor::new("GT:TAR:TIR:AD", "A", &["G", "T"], None);
        let sample = extractor.extract("1/2:10,14:4,5:3,5,4");
        assert_eq!(sample.allele_depths, Some(vec![3, 5, 4]));
        // (5 + 4) / 12
        assert_eq!(sample.variant_frequency, Some(0.75));
    }

    #[test]
    fn multi_allelic_records_fall_through_to_dp_for_total_depth() {
        let extractor = SampleFieldExtractor::new("GT:TAR:TIR:DP", "A", &["G", "T"], None);
        let sample = extractor.extract("1/2:10,14:4,5:42");
        assert_eq!(sample.total_depth, Some(42));
    }

    #[test]
    fn dpi_beats_dp_and_info_depth_is_last() {
        assert_eq!(
            extract_single("GT:DPI:DP", "0/1:15:20").total_depth,
            Some(15)
        );
        assert_eq!(extract_single("GT:DP", "0/1:20").total_depth, Some(20));

        let extractor = SampleFieldExtractor::new("GT", "A", &["G"], Some(77));
        assert_eq!(extractor.extract("0/1").total_depth, Some(77));
    }

    #[test]
    fn explicit_vf_overrides_the_derived_frequency() {
        let sample = extract_single("GT:AD:VF", "0/1:5,7:0.25");
        assert_eq!(sample.variant_frequency, Some(0.25));
        // A non-numeric VF defers to the derived value.
        let sample = extract_single("GT:AD:VF", "0/1:5,7:high");
        assert_eq!(sample.variant_frequency, Some(0.5833));
    }

    #[test]
    fn frequency_is_clamped_and_zero_depth_is_zero() {
        let sample = extract_single("GT:VF", "0/1:1.7");
        assert_eq!(sample.variant_frequency, Some(1.0));
        let sample = extract_single("GT:AD", "0/0:0,0");
        assert_eq!(sample.variant_frequency, Some(0.0));
    }

    #[test]
    fn read_pair_and_split_read_counts_parse_as_pairs() {
        let sample = extract_single("PR:SR", "20,5:18,7");
        assert_eq!(sample.paired_end_read_counts, Some(vec![20, 5]));
        assert_eq!(sample.split_read_counts, Some(vec![18, 7]));
    }

    #[test]
    fn de_novo_quality_parses_as_integer() {
        assert_eq!(extract_single("GT:DQ", "0/1:42").de_novo_quality, Some(42));
        assert_eq!(extract_single("GT:DQ", "0/1:.").de_novo_quality, None);
    }

    #[test]
    fn clinical_arrays_split_on_commas() {
        let format = "GT:DST:DID:DCS:SCH:PCN:PLG:MAD:CHC";
        let column =
            "0/1:affected,carrier:MIM253300,ORPHA83330:submitted,curated:hap1:2,1:6606,6607:10,2,8:1,3";
        let sample = extract_single(format, column);
        assert_eq!(
            sample.disease_affected_statuses,
            Some(vec!["affected".to_string(), "carrier".to_string()])
        );
        assert_eq!(
            sample.disease_ids,
            Some(vec!["MIM253300".to_string(), "ORPHA83330".to_string()])
        );
        assert_eq!(
            sample.disease_classification_sources,
            Some(vec!["submitted".to_string(), "curated".to_string()])
        );
        assert_eq!(sample.silent_carrier_haplotype.as_deref(), Some("hap1"));
        assert_eq!(sample.paralogous_gene_copy_numbers, Some(vec![2, 1]));
        assert_eq!(sample.paralogous_entrez_gene_ids, Some(vec![6606, 6607]));
        assert_eq!(sample.mpileup_allele_depths, Some(vec![10, 2, 8]));
        assert_eq!(sample.haplotype_copy_numbers, Some(vec![1, 3]));
    }

    #[test]
    fn loss_of_heterozygosity_requires_equal_counts_at_two_or_more() {
        let loh = extract_single("GT:CN:MCC", "0/1:2:2");
        assert!(loh.is_loss_of_heterozygosity);
        assert_eq!(loh.copy_number, Some(2));
        assert_eq!(loh.major_chromosome_copy, Some(2));

        assert!(!extract_single("GT:CN:MCC", "0/1:6:4").is_loss_of_heterozygosity);
        assert!(!extract_single("GT:CN:MCC", "0/1:1:1").is_loss_of_heterozygosity);
        assert!(!extract_single("GT:CN", "0/1:3").is_loss_of_heterozygosity);
    }

    #[test]
    fn dotted_cells_only_undefine_their_own_field() {
        let sample = extract_single("GT:GQ:DP:AD", "0/1:.:30:5,7");
        assert_eq!(sample.genotype.as_deref(), Some("0/1"));
        assert_eq!(sample.genotype_quality, None);
        assert_eq!(sample.total_depth, Some(30));
        assert_eq!(sample.allele_depths, Some(vec![5, 7]));
    }

    #[test]
    fn short_sample_columns_leave_trailing_fields_undefined() {
        let sample = extract_single("GT:GQ:DP", "0/1");
        assert_eq!(sample.genotype.as_deref(), Some("0/1"));
        assert_eq!(sample.genotype_quality, None);
        assert_eq!(sample.total_depth, None);
    }

    #[test]
    fn extract_samples_requires_a_format_descriptor() {
        use crate::core::sample::extract_samples;
        assert!(extract_samples(None, &["0/1"], "A", &["G"], None).is_none());

        let samples =
            extract_samples(Some("GT:AD"), &["0/1:5,7", "."], "A", &["G"], None).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].genotype.as_deref(), Some("0/1"));
        assert!(samples[1].is_empty);
    }
}
