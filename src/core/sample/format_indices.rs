/// Positional index of every recognized tag within the FORMAT descriptor.
/// Absent and unrecognized tags leave their index unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatIndices {
    pub gt: Option<usize>,
    pub gq: Option<usize>,
    pub gqx: Option<usize>,
    pub dp: Option<usize>,
    pub dpi: Option<usize>,
    pub dpf: Option<usize>,
    pub ad: Option<usize>,
    pub vf: Option<usize>,
    pub tir: Option<usize>,
    pub tar: Option<usize>,
    pub nr: Option<usize>,
    pub nv: Option<usize>,
    pub au: Option<usize>,
    pub cu: Option<usize>,
    pub gu: Option<usize>,
    pub tu: Option<usize>,
    pub ft: Option<usize>,
    pub pr: Option<usize>,
    pub sr: Option<usize>,
    pub dq: Option<usize>,
    pub cn: Option<usize>,
    pub mcc: Option<usize>,
    pub dst: Option<usize>,
    pub did: Option<usize>,
    pub dcs: Option<usize>,
    pub sch: Option<usize>,
    pub pcn: Option<usize>,
    pub plg: Option<usize>,
    pub mad: Option<usize>,
    pub chc: Option<usize>,
    pub pch: Option<usize>,
}

impl FormatIndices {
    pub fn from_format(format: &str) -> Self {
        let mut indices = Self::default();
        for (index, tag) in format.split(':').enumerate() {
            let slot = match tag {
                "GT" => &mut indices.gt,
                "GQ" => &mut indices.gq,
                "GQX" => &mut indices.gqx,
                "DP" => &mut indices.dp,
                "DPI" => &mut indices.dpi,
                "DPF" => &mut indices.dpf,
                "AD" => &mut indices.ad,
                "VF" => &mut indices.vf,
                "TIR" => &mut indices.tir,
                "TAR" => &mut indices.tar,
                "NR" => &mut indices.nr,
                "NV" => &mut indices.nv,
                "AU" => &mut indices.au,
                "CU" => &mut indices.cu,
                "GU" => &mut indices.gu,
                "TU" => &mut indices.tu,
                "FT" => &mut indices.ft,
                "PR" => &mut indices.pr,
                "SR" => &mut indices.sr,
                "DQ" => &mut indices.dq,
                "CN" => &mut indices.cn,
                "MCC" => &mut indices.mcc,
                "DST" => &mut indices.dst,
                "DID" => &mut indices.did,
                "DCS" => &mut indices.dcs,
                "SCH" => &mut indices.sch,
                "PCN" => &mut indices.pcn,
                "PLG" => &mut indices.plg,
                "MAD" => &mut indices.mad,
                "CHC" => &mut indices.chc,
                "PCH" => &mut indices.pch,
                _ => continue,
            };
            *slot = Some(index);
        }
        indices
    }
}
