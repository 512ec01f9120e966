use crate::constants::{GATK_NON_REF_ALT, MISSING_FIELD, NON_INFORMATIVE_ALTS};
use std::fmt;

/// Dispatch tag shared by every ALT allele on one call line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantCategory {
    Reference,
    SmallVariant,
    Sv,
    Cnv,
    RepeatExpansion,
}

impl VariantCategory {
    /// Classify a call line by its ALT alleles. The first matching rule wins
    /// and every rule is a pure any/all predicate, so the category is stable
    /// under ALT permutation.
    pub fn of_alts(alt_alleles: &[&str]) -> Self {
        if alt_alleles.len() == 1
            && (alt_alleles[0] == MISSING_FIELD || alt_alleles[0] == GATK_NON_REF_ALT)
        {
            return VariantCategory::Reference;
        }
        if alt_alleles
            .iter()
            .any(|alt| alt.contains('[') || alt.contains(']'))
        {
            return VariantCategory::Sv;
        }
        if !alt_alleles
            .iter()
            .any(|alt| is_symbolic_alt(alt) && !is_non_informative_alt(alt))
        {
            return VariantCategory::SmallVariant;
        }
        if alt_alleles.iter().any(|alt| alt.starts_with("<STR")) {
            return VariantCategory::RepeatExpansion;
        }
        if alt_alleles.iter().any(|alt| alt.starts_with("<CN")) {
            return VariantCategory::Cnv;
        }
        VariantCategory::Sv
    }
}

impl fmt::Display for VariantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantCategory::Reference => "reference",
            VariantCategory::SmallVariant => "small_variant",
            VariantCategory::Sv => "structural_variant",
            VariantCategory::Cnv => "copy_number_variant",
            VariantCategory::RepeatExpansion => "repeat_expansion",
        };
        write!(f, "{name}")
    }
}

pub fn is_symbolic_alt(alt: &str) -> bool {
    alt.len() > 2 && alt.starts_with('<') && alt.ends_with('>')
}

pub fn is_non_informative_alt(alt: &str) -> bool {
    NON_INFORMATIVE_ALTS.contains(&alt)
}
