use crate::constants::MISSING_FIELD;
use crate::core::variant::VariantType;
use crate::error::VarinError;
use crate::utils::util::Result;

/// Typed view of the INFO column: the structural-variant type, the END
/// coordinate, the inversion orientation flags, and the copy-number and
/// depth hints some callers put on the line instead of the sample column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoData {
    pub sv_type: Option<VariantType>,
    pub end: Option<i64>,
    pub is_inv3: bool,
    pub is_inv5: bool,
    pub copy_number: Option<i32>,
    pub depth: Option<i32>,
}

impl InfoData {
    pub fn parse(info: &str) -> Result<Self> {
        let mut data = InfoData::default();
        if info.is_empty() || info == MISSING_FIELD {
            return Ok(data);
        }

        for entry in info.split(';') {
            let (key, value) = match entry.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (entry, None),
            };
            match key {
                "SVTYPE" => data.sv_type = value.and_then(VariantType::from_sv_tag),
                "END" => data.end = parse_info_int(key, value)?,
                "INV3" => data.is_inv3 = true,
                "INV5" => data.is_inv5 = true,
                "CN" => data.copy_number = parse_info_int(key, value)?,
                "DP" => data.depth = parse_info_int(key, value)?,
                _ => {}
            }
        }
        Ok(data)
    }
}

fn parse_info_int<T: std::str::FromStr>(key: &str, value: Option<&str>) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    let value = match value {
        Some(value) if value != MISSING_FIELD => value,
        _ => return Ok(None),
    };
    value.parse().map(Some).map_err(|e: T::Err| VarinError::InfoParse {
        key: key.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}
