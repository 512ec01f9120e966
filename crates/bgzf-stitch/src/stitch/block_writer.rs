use crate::error::Result;
use crate::stitch::block::{BgzfBlock, BGZF_EOF_MARKER, BGZF_MAX_BLOCK_SIZE, BGZF_MAX_PAYLOAD};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

/// Compress one payload into a complete BGZF member.
pub fn compress_block(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > BGZF_MAX_PAYLOAD {
        return Err(crate::stitch_error!(
            "block payload is {} bytes, above the {} byte cap",
            payload.len(),
            BGZF_MAX_PAYLOAD
        ));
    }

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload)?;
    let deflated = encoder.finish()?;

    let total_len = 18 + deflated.len() + 8;
    if total_len > BGZF_MAX_BLOCK_SIZE {
        return Err(crate::stitch_error!(
            "compressed member is {total_len} bytes, above the {BGZF_MAX_BLOCK_SIZE} byte cap"
        ));
    }
    let bsize = (total_len - 1) as u16;

    let mut crc = flate2::Crc::new();
    crc.update(payload);

    let mut member = Vec::with_capacity(total_len);
    member.extend_from_slice(&[0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff]);
    member.extend_from_slice(&6u16.to_le_bytes());
    member.extend_from_slice(&[b'B', b'C']);
    member.extend_from_slice(&2u16.to_le_bytes());
    member.extend_from_slice(&bsize.to_le_bytes());
    member.extend_from_slice(&deflated);
    member.extend_from_slice(&crc.sum().to_le_bytes());
    member.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    Ok(member)
}

/// Block-compressing writer. Buffered text becomes one member per
/// `flush_block`, so callers control where block boundaries fall; already
/// compressed members pass through untouched via `write_raw_block`.
pub struct BgzfWriter<W: Write> {
    inner: W,
    buffer: Vec<u8>,
    compressed_offset: u64,
}

impl<W: Write> BgzfWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(BGZF_MAX_PAYLOAD),
            compressed_offset: 0,
        }
    }

    /// Virtual offset of the next byte to be written: compressed offset in
    /// the high 48 bits, in-block offset in the low 16.
    pub fn virtual_offset(&self) -> i64 {
        ((self.compressed_offset as i64) << 16) | self.buffer.len() as i64
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let room = BGZF_MAX_PAYLOAD - self.buffer.len();
            let take = room.min(rest.len());
            self.buffer.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.buffer.len() == BGZF_MAX_PAYLOAD {
                self.flush_block()?;
            }
        }
        Ok(())
    }

    /// Emit the buffered payload as one member; a no-op on an empty buffer.
    pub fn flush_block(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let member = compress_block(&self.buffer)?;
        self.inner.write_all(&member)?;
        self.compressed_offset += member.len() as u64;
        self.buffer.clear();
        Ok(())
    }

    /// Copy an already compressed member through verbatim.
    pub fn write_raw_block(&mut self, block: &BgzfBlock) -> Result<()> {
        self.write_raw_member(&block.data)
    }

    pub fn write_raw_member(&mut self, member: &[u8]) -> Result<()> {
        self.flush_block()?;
        self.inner.write_all(member)?;
        self.compressed_offset += member.len() as u64;
        Ok(())
    }

    /// Flush the final block, terminate the stream, and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush_block()?;
        self.inner.write_all(&BGZF_EOF_MARKER)?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}
