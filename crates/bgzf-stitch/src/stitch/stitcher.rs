use crate::error::Result;
use crate::stitch::block_reader::BgzfBlockReader;
use crate::stitch::block_writer::{compress_block, BgzfWriter};
use crate::stitch::section_index::{
    block_offset, file_offset, SectionIndex, ABSENT_SECTION, GENES_SECTION, POSITIONS_SECTION,
};
use std::collections::BTreeSet;
use std::io::{Read, Seek, Write};

/// Counters reported by a completed stitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchStats {
    pub position_blocks: usize,
    pub gene_lines_total: usize,
    pub gene_lines_unique: usize,
}

const FOOTER_LINE: &str = "]}";
const GENES_SECTION_OPENER: &str = "\n],\"genes\":[\n";

/// Concatenates block-compressed annotated JSON shards into one well-formed
/// output: position blocks are copied through compressed, gene lines are
/// deduplicated across shards and rewritten as a single trailing section.
pub struct JsonStitcher<W: Write> {
    writer: BgzfWriter<W>,
    comma_member: Vec<u8>,
    gene_lines: BTreeSet<String>,
    shard_count: usize,
    position_blocks: usize,
    gene_lines_total: usize,
}

impl<W: Write> JsonStitcher<W> {
    pub fn new(output: W) -> Result<Self> {
        Ok(Self {
            writer: BgzfWriter::new(output),
            comma_member: compress_block(b",\n")?,
            gene_lines: BTreeSet::new(),
            shard_count: 0,
            position_blocks: 0,
            gene_lines_total: 0,
        })
    }

    /// Fold the next shard into the output. Shards must be added in the
    /// order their positions should appear.
    pub fn add_shard<R: Read + Seek>(&mut self, shard: R, index: &SectionIndex) -> Result<()> {
        let first_shard = self.shard_count == 0;
        if !first_shard {
            // Glue between consecutive position arrays.
            self.writer.write_raw_member(&self.comma_member)?;
        }

        let mut reader = BgzfBlockReader::new(shard)?;
        self.copy_position_blocks(&mut reader, index, first_shard)?;
        self.collect_gene_lines(&mut reader, index)?;
        self.shard_count += 1;
        Ok(())
    }

    /// Copy compressed position blocks through verbatim. The leading block of
    /// the first shard carries the JSON header and is kept; the leading block
    /// of every later shard is skipped so the header appears exactly once.
    fn copy_position_blocks<R: Read + Seek>(
        &mut self,
        reader: &mut BgzfBlockReader<R>,
        index: &SectionIndex,
        first_shard: bool,
    ) -> Result<()> {
        let (_, positions_end) = index.section_range(POSITIONS_SECTION);
        if positions_end == ABSENT_SECTION {
            return Err(crate::stitch_error!(
                "shard index does not describe a \"{POSITIONS_SECTION}\" section"
            ));
        }

        let end_offset = file_offset(positions_end);
        let mut leading_block = true;
        while reader.block_offset() < end_offset {
            let block = reader.read_block()?.ok_or_else(|| {
                crate::stitch_error!("shard ended before its positions section did")
            })?;
            if !leading_block || first_shard {
                self.writer.write_raw_block(&block)?;
                self.position_blocks += 1;
            }
            leading_block = false;
        }
        Ok(())
    }

    /// Inflate the gene section and collect its lines, deduplicating by
    /// exact string equality across all shards.
    fn collect_gene_lines<R: Read + Seek>(
        &mut self,
        reader: &mut BgzfBlockReader<R>,
        index: &SectionIndex,
    ) -> Result<()> {
        let genes_begin = index.begin(GENES_SECTION);
        if genes_begin == ABSENT_SECTION {
            return Ok(());
        }

        reader.seek_to(file_offset(genes_begin))?;
        let mut skip = block_offset(genes_begin);
        let mut text = Vec::new();
        while let Some(block) = reader.read_block()? {
            if block.is_eof_marker() {
                break;
            }
            let mut content = block.decompress()?;
            if skip > 0 {
                let taken = skip.min(content.len());
                content.drain(..taken);
                skip -= taken;
            }
            text.append(&mut content);
        }
        let text = String::from_utf8(text)
            .map_err(|e| crate::stitch_error!("gene section is not valid UTF-8: {e}"))?;

        for line in text.split('\n') {
            if line.is_empty() {
                continue;
            }
            if line == FOOTER_LINE {
                break;
            }
            self.gene_lines_total += 1;
            let mut owned = line.to_string();
            if !owned.ends_with(',') {
                owned.push(',');
            }
            self.gene_lines.insert(owned);
        }
        Ok(())
    }

    /// Emit the merged gene section and the stream terminator.
    pub fn finish(mut self) -> Result<StitchStats> {
        let stats = StitchStats {
            position_blocks: self.position_blocks,
            gene_lines_total: self.gene_lines_total,
            gene_lines_unique: self.gene_lines.len(),
        };

        if self.gene_lines.is_empty() {
            self.writer.write_all(FOOTER_LINE.as_bytes())?;
        } else {
            self.writer.write_all(GENES_SECTION_OPENER.as_bytes())?;
            let last = self.gene_lines.len() - 1;
            for (position, line) in self.gene_lines.iter().enumerate() {
                let line = if position == last {
                    line.strip_suffix(',').unwrap_or(line)
                } else {
                    line
                };
                self.writer.write_all(line.as_bytes())?;
                self.writer.write_all(b"\n")?;
            }
            self.writer.write_all(FOOTER_LINE.as_bytes())?;
        }
        self.writer.finish()?;

        log::debug!(
            "stitched {} shards: {} position blocks, {} gene lines ({} unique)",
            self.shard_count,
            stats.position_blocks,
            stats.gene_lines_total,
            stats.gene_lines_unique
        );
        Ok(stats)
    }
}
