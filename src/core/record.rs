use crate::constants::{
    VCF_ALT, VCF_CHROM, VCF_FILTER, VCF_FORMAT, VCF_ID, VCF_INFO, VCF_MIN_FIELDS, VCF_POS,
    VCF_QUAL, VCF_REF, VCF_SAMPLE_START,
};
use crate::core::info::InfoData;
use crate::core::sample::{extract_samples, Sample};
use crate::utils::util::Result;

/// One tab-separated variant call line, split once and borrowed.
#[derive(Debug, Clone)]
pub struct CallRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> CallRecord<'a> {
    pub fn from_line(line: &'a str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() < VCF_MIN_FIELDS {
            return Err(crate::varin_error!(
                "Variant call line has {} columns, expected at least {VCF_MIN_FIELDS}: {line:?}",
                fields.len()
            ));
        }
        Ok(Self { fields })
    }

    pub fn chromosome_name(&self) -> &'a str {
        self.fields[VCF_CHROM]
    }

    pub fn position(&self) -> Result<i64> {
        self.fields[VCF_POS].parse().map_err(|e| {
            crate::varin_error!(
                "Invalid POS {:?} on {}: {e}",
                self.fields[VCF_POS],
                self.chromosome_name()
            )
        })
    }

    pub fn id(&self) -> &'a str {
        self.fields[VCF_ID]
    }

    pub fn ref_allele(&self) -> &'a str {
        self.fields[VCF_REF]
    }

    pub fn alt_alleles(&self) -> Vec<&'a str> {
        self.fields[VCF_ALT].split(',').collect()
    }

    pub fn qual(&self) -> &'a str {
        self.fields[VCF_QUAL]
    }

    pub fn filter(&self) -> &'a str {
        self.fields[VCF_FILTER]
    }

    pub fn info(&self) -> Result<InfoData> {
        InfoData::parse(self.fields[VCF_INFO])
    }

    pub fn format(&self) -> Option<&'a str> {
        self.fields.get(VCF_FORMAT).copied()
    }

    pub fn sample_columns(&self) -> &[&'a str] {
        self.fields.get(VCF_SAMPLE_START..).unwrap_or(&[])
    }

    /// Per-sample records in column order; `None` without a FORMAT column.
    pub fn samples(&self, info: &InfoData) -> Option<Vec<Sample>> {
        extract_samples(
            self.format(),
            self.sample_columns(),
            self.ref_allele(),
            &self.alt_alleles(),
            info.depth,
        )
    }
}
