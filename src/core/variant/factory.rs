use crate::core::chromosome::{Chromosome, ChromosomeLookup, RefMinorProvider};
use crate::core::info::InfoData;
use crate::core::variant::small::create_small_variant;
use crate::core::variant::{
    breakend_from_alt, is_non_informative_alt, symbolic_break_ends, Variant, VariantCategory,
    VariantType,
};
use crate::error::VarinError;
use crate::utils::util::Result;

/// Turns the ALT alleles of one call line into normalized variants. The two
/// collaborators are shared, read-only lookups borrowed for the lifetime of
/// processing.
pub struct VariantFactory<'a> {
    chromosomes: &'a dyn ChromosomeLookup,
    ref_minor: &'a dyn RefMinorProvider,
}

impl<'a> VariantFactory<'a> {
    pub fn new(
        chromosomes: &'a dyn ChromosomeLookup,
        ref_minor: &'a dyn RefMinorProvider,
    ) -> Self {
        Self {
            chromosomes,
            ref_minor,
        }
    }

    /// One variant per informative ALT allele, in ALT order; `None` when no
    /// informative allele remains.
    pub fn create_variants(
        &self,
        chromosome_name: &str,
        position: i64,
        ref_allele: &str,
        alt_alleles: &[&str],
        info: &InfoData,
        sample_copy_number: Option<i32>,
    ) -> Result<Option<Vec<Variant>>> {
        let chromosome = self.chromosomes.chromosome(chromosome_name);
        let category = VariantCategory::of_alts(alt_alleles);

        if category == VariantCategory::Reference {
            return Ok(Some(vec![self.create_reference(
                &chromosome,
                position,
                ref_allele,
            )]));
        }

        let mut variants = Vec::new();
        for alt_allele in alt_alleles {
            if is_non_informative_alt(alt_allele) {
                continue;
            }
            variants.push(self.create_for_alt(
                category,
                &chromosome,
                position,
                ref_allele,
                alt_allele,
                info,
                sample_copy_number,
            )?);
        }
        Ok(if variants.is_empty() {
            None
        } else {
            Some(variants)
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_for_alt(
        &self,
        category: VariantCategory,
        chromosome: &Chromosome,
        position: i64,
        ref_allele: &str,
        alt_allele: &str,
        info: &InfoData,
        sample_copy_number: Option<i32>,
    ) -> Result<Variant> {
        match category {
            VariantCategory::SmallVariant => Ok(create_small_variant(
                chromosome, position, ref_allele, alt_allele,
            )),
            VariantCategory::Sv => {
                self.create_structural(chromosome, position, ref_allele, alt_allele, info)
            }
            VariantCategory::Cnv => Ok(create_copy_number(
                chromosome,
                position,
                ref_allele,
                alt_allele,
                info,
                sample_copy_number,
            )),
            VariantCategory::RepeatExpansion => Ok(create_repeat_expansion(
                chromosome, position, ref_allele, alt_allele, info,
            )),
            // Reference lines are handled before per-alt dispatch; reaching
            // this arm is an internal programming error.
            VariantCategory::Reference => Err(VarinError::UnknownCategory {
                category: category.to_string(),
            }),
        }
    }

    fn create_reference(
        &self,
        chromosome: &Chromosome,
        position: i64,
        ref_allele: &str,
    ) -> Variant {
        let end = position + ref_allele.len() as i64 - 1;
        let global_major_allele = self.ref_minor.global_major_allele(chromosome, position);
        Variant {
            chromosome: chromosome.clone(),
            start: position,
            end,
            ref_allele: ref_allele.to_string(),
            alt_allele: ref_allele.to_string(),
            variant_type: VariantType::Reference,
            break_ends: None,
            global_major_allele,
        }
    }

    fn create_structural(
        &self,
        chromosome: &Chromosome,
        position: i64,
        ref_allele: &str,
        alt_allele: &str,
        info: &InfoData,
    ) -> Result<Variant> {
        if alt_allele.contains('[') || alt_allele.contains(']') {
            let break_end = breakend_from_alt(
                self.chromosomes,
                chromosome,
                position,
                ref_allele,
                alt_allele,
            )?;
            return Ok(Variant {
                chromosome: chromosome.clone(),
                start: position,
                end: position,
                ref_allele: ref_allele.to_string(),
                alt_allele: alt_allele.to_string(),
                variant_type: VariantType::TranslocationBreakend,
                break_ends: Some(vec![break_end]),
                global_major_allele: None,
            });
        }

        let variant_type = if alt_allele == "<DUP:TANDEM>" {
            VariantType::TandemDuplication
        } else {
            info.sv_type
                .unwrap_or(VariantType::ComplexStructuralAlteration)
        };
        let break_ends = symbolic_break_ends(chromosome, position, variant_type, info);

        Ok(Variant {
            chromosome: chromosome.clone(),
            start: position + 1,
            end: info.end.unwrap_or(position),
            ref_allele: ref_allele.to_string(),
            alt_allele: alt_allele.to_string(),
            variant_type,
            break_ends,
            global_major_allele: None,
        })
    }
}

fn create_copy_number(
    chromosome: &Chromosome,
    position: i64,
    ref_allele: &str,
    alt_allele: &str,
    info: &InfoData,
    sample_copy_number: Option<i32>,
) -> Variant {
    // A bare <CNV> allele carries no count; concretize it from the sample
    // copy number when one is known.
    let alt_allele = match (alt_allele, sample_copy_number) {
        ("<CNV>", Some(copy_number)) => format!("<CN{copy_number}>"),
        _ => alt_allele.to_string(),
    };
    Variant {
        chromosome: chromosome.clone(),
        start: position + 1,
        end: info.end.unwrap_or(position),
        ref_allele: ref_allele.to_string(),
        alt_allele,
        variant_type: VariantType::CopyNumberVariation,
        break_ends: None,
        global_major_allele: None,
    }
}

fn create_repeat_expansion(
    chromosome: &Chromosome,
    position: i64,
    ref_allele: &str,
    alt_allele: &str,
    info: &InfoData,
) -> Variant {
    Variant {
        chromosome: chromosome.clone(),
        start: position + 1,
        end: info.end.unwrap_or(position),
        ref_allele: ref_allele.to_string(),
        alt_allele: alt_allele.to_string(),
        variant_type: VariantType::ShortTandemRepeatVariation,
        break_ends: None,
        global_major_allele: None,
    }
}
