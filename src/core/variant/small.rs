use crate::core::chromosome::Chromosome;
use crate::core::variant::{Variant, VariantType};

/// Alleles normalized by bidirectional trimming: the shared suffix goes
/// first, then the shared prefix, advancing `start` past the trimmed bases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrimmedAlleles {
    pub start: i64,
    pub reference: String,
    pub alternate: String,
}

pub(crate) fn trim_alleles(start: i64, ref_allele: &str, alt_allele: &str) -> TrimmedAlleles {
    let mut reference = ref_allele.as_bytes();
    let mut alternate = alt_allele.as_bytes();

    while !reference.is_empty()
        && !alternate.is_empty()
        && reference.last() == alternate.last()
    {
        reference = &reference[..reference.len() - 1];
        alternate = &alternate[..alternate.len() - 1];
    }

    let mut trimmed = 0;
    while trimmed < reference.len()
        && trimmed < alternate.len()
        && reference[trimmed] == alternate[trimmed]
    {
        trimmed += 1;
    }

    TrimmedAlleles {
        start: start + trimmed as i64,
        reference: String::from_utf8_lossy(&reference[trimmed..]).into_owned(),
        alternate: String::from_utf8_lossy(&alternate[trimmed..]).into_owned(),
    }
}

pub(crate) fn small_variant_type(reference: &str, alternate: &str) -> VariantType {
    match (reference.len(), alternate.len()) {
        (0, 0) => VariantType::Reference,
        (0, _) => VariantType::Insertion,
        (_, 0) => VariantType::Deletion,
        (1, 1) => VariantType::Snv,
        (ref_len, alt_len) if ref_len == alt_len => VariantType::Mnv,
        _ => VariantType::Indel,
    }
}

pub(crate) fn create_small_variant(
    chromosome: &Chromosome,
    position: i64,
    ref_allele: &str,
    alt_allele: &str,
) -> Variant {
    let trimmed = trim_alleles(position, ref_allele, alt_allele);
    let variant_type = small_variant_type(&trimmed.reference, &trimmed.alternate);
    let end = trimmed.start + trimmed.reference.len() as i64 - 1;

    Variant {
        chromosome: chromosome.clone(),
        start: trimmed.start,
        end,
        ref_allele: trimmed.reference,
        alt_allele: trimmed.alternate,
        variant_type,
        break_ends: None,
        global_major_allele: None,
    }
}
