use crate::core::chromosome::{Chromosome, ChromosomeLookup};
use crate::core::info::InfoData;
use crate::core::variant::{BreakEnd, VariantType};
use crate::error::VarinError;
use crate::utils::util::Result;
use once_cell::sync::Lazy;
use regex::Regex;

// Explicit breakend ALT grammars: sequence-first ("forward") and
// sequence-last ("reverse"). Compiled once for the process lifetime.
static FORWARD_BREAKEND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+([\[\]])([^:]+):(\d+)([\[\]])").expect("forward breakend pattern must compile")
});
static REVERSE_BREAKEND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\[\]])([^:]+):(\d+)([\[\]])\w+").expect("reverse breakend pattern must compile")
});

/// Derive the canonical breakend pair of a symbolic structural variant.
/// `start` is the padded call position; returns nothing when the END
/// coordinate is unknown or the type has no breakend interpretation.
pub fn symbolic_break_ends(
    chromosome: &Chromosome,
    start: i64,
    variant_type: VariantType,
    info: &InfoData,
) -> Option<Vec<BreakEnd>> {
    let end = info.end?;
    let c = chromosome;
    let pair = match variant_type {
        VariantType::Deletion => [
            BreakEnd::new(c.clone(), c.clone(), start, end + 1, false, true),
            BreakEnd::new(c.clone(), c.clone(), end + 1, start, true, false),
        ],
        VariantType::Duplication | VariantType::TandemDuplication => [
            BreakEnd::new(c.clone(), c.clone(), end, start, false, true),
            BreakEnd::new(c.clone(), c.clone(), start, end, true, false),
        ],
        VariantType::Inversion => {
            if info.is_inv3 {
                [
                    BreakEnd::new(c.clone(), c.clone(), start, end, false, false),
                    BreakEnd::new(c.clone(), c.clone(), end, start, false, false),
                ]
            } else if info.is_inv5 {
                [
                    BreakEnd::new(c.clone(), c.clone(), start + 1, end + 1, true, true),
                    BreakEnd::new(c.clone(), c.clone(), end + 1, start + 1, true, true),
                ]
            } else {
                [
                    BreakEnd::new(c.clone(), c.clone(), start, end, false, false),
                    BreakEnd::new(c.clone(), c.clone(), end + 1, start + 1, true, true),
                ]
            }
        }
        _ => return None,
    };
    Some(pair.to_vec())
}

/// Parse an explicit breakend ALT allele into its single junction. The form
/// is chosen by whether the allele starts with the ref allele; the bracket
/// adjacent to the mate locus carries the mate orientation.
pub fn breakend_from_alt(
    lookup: &dyn ChromosomeLookup,
    chromosome: &Chromosome,
    position: i64,
    ref_allele: &str,
    alt_allele: &str,
) -> Result<BreakEnd> {
    let forward = alt_allele.starts_with(ref_allele);
    let pattern = if forward {
        &FORWARD_BREAKEND
    } else {
        &REVERSE_BREAKEND
    };
    let captures = pattern
        .captures(alt_allele)
        .ok_or_else(|| VarinError::BreakendParse {
            allele: alt_allele.to_string(),
        })?;

    let orientation_bracket = if forward { &captures[4] } else { &captures[1] };
    let mate_position: i64 = captures[3].parse().map_err(|_| VarinError::BreakendParse {
        allele: alt_allele.to_string(),
    })?;

    Ok(BreakEnd::new(
        chromosome.clone(),
        lookup.chromosome(&captures[2]),
        position,
        mate_position,
        !forward,
        orientation_bracket == "[",
    ))
}
