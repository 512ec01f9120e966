use crate::error::Result;
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Fixed gzip member header: magic, CM, FLG, MTIME, XFL, OS, XLEN.
pub const BGZF_FIXED_HEADER_LEN: usize = 12;
/// CRC32 + ISIZE trailer.
pub const BGZF_FOOTER_LEN: usize = 8;
/// Hard cap on the compressed size of one member (BSIZE is a u16).
pub const BGZF_MAX_BLOCK_SIZE: usize = 0x1_0000;
/// Uncompressed payload cap per member, leaving headroom for incompressible data.
pub const BGZF_MAX_PAYLOAD: usize = 0xff00;

/// The canonical 28-byte empty member terminating a BGZF stream.
pub const BGZF_EOF_MARKER: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02,
    0x00, 0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// One complete compressed BGZF member, held without decompression so it can
/// be copied through to an output stream byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgzfBlock {
    pub file_offset: u64,
    pub data: Vec<u8>,
}

impl BgzfBlock {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_eof_marker(&self) -> bool {
        self.data == BGZF_EOF_MARKER
    }

    /// Inflate the member body, verifying the CRC32 and ISIZE trailer.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let corrupt = |message: String| crate::error::StitchError::corrupt(self.file_offset, message);

        if self.data.len() < BGZF_FIXED_HEADER_LEN + BGZF_FOOTER_LEN {
            return Err(corrupt(format!(
                "member is {} bytes, shorter than header plus trailer",
                self.data.len()
            )));
        }
        let xlen = u16::from_le_bytes([self.data[10], self.data[11]]) as usize;
        let body_start = BGZF_FIXED_HEADER_LEN + xlen;
        let body_end = self.data.len() - BGZF_FOOTER_LEN;
        if body_start > body_end {
            return Err(corrupt(format!(
                "extra field length {xlen} overruns the member body"
            )));
        }

        let mut decompressed = Vec::new();
        DeflateDecoder::new(&self.data[body_start..body_end])
            .read_to_end(&mut decompressed)
            .map_err(|e| corrupt(format!("inflate failed: {e}")))?;

        let trailer = &self.data[body_end..];
        let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let expected_len = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

        let mut crc = flate2::Crc::new();
        crc.update(&decompressed);
        if crc.sum() != expected_crc {
            return Err(corrupt(format!(
                "CRC32 mismatch: trailer declares {expected_crc:#010x}, content hashes to {:#010x}",
                crc.sum()
            )));
        }
        if decompressed.len() as u32 != expected_len {
            return Err(corrupt(format!(
                "ISIZE mismatch: trailer declares {expected_len} bytes, inflated {}",
                decompressed.len()
            )));
        }

        Ok(decompressed)
    }
}

/// Scan a gzip extra field for the BC subfield and return the declared total
/// member size (BSIZE + 1).
pub(crate) fn declared_block_size(extra: &[u8]) -> Option<usize> {
    let mut rest = extra;
    while rest.len() >= 4 {
        let (si1, si2) = (rest[0], rest[1]);
        let slen = u16::from_le_bytes([rest[2], rest[3]]) as usize;
        let payload = rest.get(4..4 + slen)?;
        if si1 == b'B' && si2 == b'C' && slen == 2 {
            let bsize = u16::from_le_bytes([payload[0], payload[1]]) as usize;
            return Some(bsize + 1);
        }
        rest = &rest[4 + slen..];
    }
    None
}
