use crate::error::{Result, StitchError};
use crate::stitch::block::{declared_block_size, BgzfBlock, BGZF_FIXED_HEADER_LEN, BGZF_FOOTER_LEN};
use std::io::{Read, Seek, SeekFrom};

/// Reads a BGZF stream one compressed member at a time. Blocks are never
/// inflated here; pass-through copying and decompression are caller choices.
pub struct BgzfBlockReader<R: Read + Seek> {
    inner: R,
    next_offset: u64,
}

impl<R: Read + Seek> BgzfBlockReader<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let next_offset = inner.stream_position()?;
        Ok(Self { inner, next_offset })
    }

    /// File offset of the next block that `read_block` would return.
    pub fn block_offset(&self) -> u64 {
        self.next_offset
    }

    /// Reposition the reader to a block boundary at `file_offset`.
    pub fn seek_to(&mut self, file_offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(file_offset))?;
        self.next_offset = file_offset;
        Ok(())
    }

    /// Read the next compressed member, or `None` at a clean end of stream.
    pub fn read_block(&mut self) -> Result<Option<BgzfBlock>> {
        let offset = self.next_offset;

        let mut header = [0u8; BGZF_FIXED_HEADER_LEN];
        let header_read = read_up_to(&mut self.inner, &mut header)?;
        if header_read == 0 {
            return Ok(None);
        }
        if header_read < BGZF_FIXED_HEADER_LEN {
            return Err(StitchError::corrupt(
                offset,
                format!("stream ended after {header_read} bytes of a gzip header"),
            ));
        }
        if header[0] != 0x1f || header[1] != 0x8b || header[2] != 0x08 {
            return Err(StitchError::corrupt(
                offset,
                format!(
                    "not a gzip member: leading bytes {:#04x} {:#04x} {:#04x}",
                    header[0], header[1], header[2]
                ),
            ));
        }
        if header[3] & 0x04 == 0 {
            return Err(StitchError::corrupt(
                offset,
                "gzip member has no extra field, so it cannot declare a block size",
            ));
        }

        let xlen = u16::from_le_bytes([header[10], header[11]]) as usize;
        let mut extra = vec![0u8; xlen];
        self.inner
            .read_exact(&mut extra)
            .map_err(|e| StitchError::corrupt(offset, format!("extra field truncated: {e}")))?;

        let total_len = declared_block_size(&extra).ok_or_else(|| {
            StitchError::corrupt(offset, "extra field is missing the BC subfield")
        })?;
        let consumed = BGZF_FIXED_HEADER_LEN + xlen;
        if total_len < consumed + BGZF_FOOTER_LEN {
            return Err(StitchError::corrupt(
                offset,
                format!("declared block size {total_len} is smaller than its own header"),
            ));
        }

        let mut data = Vec::with_capacity(total_len);
        data.extend_from_slice(&header);
        data.extend_from_slice(&extra);
        data.resize(total_len, 0);
        self.inner
            .read_exact(&mut data[consumed..])
            .map_err(|e| StitchError::corrupt(offset, format!("member body truncated: {e}")))?;

        self.next_offset = offset + total_len as u64;
        Ok(Some(BgzfBlock {
            file_offset: offset,
            data,
        }))
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Read until `buf` is full or the stream ends; returns the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
