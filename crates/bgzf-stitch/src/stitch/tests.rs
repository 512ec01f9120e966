use crate::error::StitchError;
use crate::stitch::block_writer::BgzfWriter;
use crate::stitch::section_index::{
    SectionIndex, SectionIndexWriter, GENES_SECTION, POSITIONS_SECTION,
};
use crate::stitch::stitcher::JsonStitcher;
use flate2::read::MultiGzDecoder;
use std::io::{Cursor, Read};

const SHARD_HEADER: &str = "{\"header\":{\"name\":\"annotated_json\"},\"positions\":[\n";

/// Write a shard the way the annotation pipeline does: the stream is flushed
/// after the header line, after the last position line, and after the gene
/// section opener, so every section starts on a block boundary.
fn build_shard(positions: &[&str], genes: &[&str]) -> (Vec<u8>, SectionIndex) {
    let mut writer = BgzfWriter::new(Vec::new());
    writer.write_all(SHARD_HEADER.as_bytes()).unwrap();
    writer.flush_block().unwrap();

    let positions_begin = writer.virtual_offset();
    writer.write_all(positions.join(",\n").as_bytes()).unwrap();
    writer.flush_block().unwrap();
    let positions_end = writer.virtual_offset();

    writer.write_all(b"\n],\"genes\":[\n").unwrap();
    writer.flush_block().unwrap();
    let genes_begin = writer.virtual_offset();

    for (position, gene) in genes.iter().enumerate() {
        writer.write_all(gene.as_bytes()).unwrap();
        let separator: &[u8] = if position + 1 < genes.len() { b",\n" } else { b"\n" };
        writer.write_all(separator).unwrap();
    }
    let genes_end = writer.virtual_offset();
    writer.write_all(b"]}\n").unwrap();
    let stream = writer.finish().unwrap();

    let mut index_writer = SectionIndexWriter::new();
    index_writer.add_section(POSITIONS_SECTION, positions_begin, positions_end);
    index_writer.add_section(GENES_SECTION, genes_begin, genes_end);
    let mut encoded = Vec::new();
    index_writer.write_to(&mut encoded).unwrap();
    let index = SectionIndex::read_from(&mut Cursor::new(encoded)).unwrap();

    (stream, index)
}

fn decompress_all(stream: &[u8]) -> String {
    let mut text = String::new();
    MultiGzDecoder::new(stream)
        .read_to_string(&mut text)
        .unwrap();
    text
}

#[test]
fn stitch_two_shards_merges_positions_and_deduplicates_genes() {
    let (shard1, index1) = build_shard(
        &["{\"chrom\":\"chr1\",\"pos\":100}", "{\"chrom\":\"chr1\",\"pos\":200}"],
        &["{\"gene\":\"G1\"}", "{\"gene\":\"G2\"}"],
    );
    let (shard2, index2) = build_shard(
        &["{\"chrom\":\"chr1\",\"pos\":100}", "{\"chrom\":\"chr1\",\"pos\":200}"],
        &["{\"gene\":\"G2\"}", "{\"gene\":\"G3\"}"],
    );

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    stitcher.add_shard(Cursor::new(shard1), &index1).unwrap();
    stitcher.add_shard(Cursor::new(shard2), &index2).unwrap();
    let stats = stitcher.finish().unwrap();

    let expected = format!(
        "{SHARD_HEADER}{positions},\n{positions}\n],\"genes\":[\n{genes}\n]}}",
        positions = "{\"chrom\":\"chr1\",\"pos\":100},\n{\"chrom\":\"chr1\",\"pos\":200}",
        genes = "{\"gene\":\"G1\"},\n{\"gene\":\"G2\"},\n{\"gene\":\"G3\"}"
    );
    assert_eq!(decompress_all(&output), expected);

    // Header block plus one position block from the first shard, one
    // position block from the second.
    assert_eq!(stats.position_blocks, 3);
    assert_eq!(stats.gene_lines_total, 4);
    assert_eq!(stats.gene_lines_unique, 3);
}

#[test]
fn position_blocks_are_copied_byte_identical() {
    let (shard, index) = build_shard(&["{\"pos\":1}"], &["{\"gene\":\"G1\"}"]);

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    stitcher.add_shard(Cursor::new(shard.clone()), &index).unwrap();
    stitcher.finish().unwrap();

    let copied_len = crate::stitch::section_index::file_offset(index.end(POSITIONS_SECTION));
    assert_eq!(
        &output[..copied_len as usize],
        &shard[..copied_len as usize]
    );
}

#[test]
fn stitch_without_gene_lines_emits_bare_footer() {
    let (shard1, index1) = build_shard(&["{\"pos\":1}"], &[]);
    let (shard2, index2) = build_shard(&["{\"pos\":2}"], &[]);

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    stitcher.add_shard(Cursor::new(shard1), &index1).unwrap();
    stitcher.add_shard(Cursor::new(shard2), &index2).unwrap();
    let stats = stitcher.finish().unwrap();

    let text = decompress_all(&output);
    assert!(text.ends_with("{\"pos\":1},\n{\"pos\":2}]}"), "got: {text}");
    assert_eq!(stats.gene_lines_total, 0);
    assert_eq!(stats.gene_lines_unique, 0);
}

#[test]
fn gene_section_starting_mid_block_is_honored() {
    // Opener and gene lines share one block; the gene begin offset carries a
    // nonzero in-block component.
    let mut writer = BgzfWriter::new(Vec::new());
    writer.write_all(SHARD_HEADER.as_bytes()).unwrap();
    writer.flush_block().unwrap();
    let positions_begin = writer.virtual_offset();
    writer.write_all(b"{\"pos\":7}").unwrap();
    writer.flush_block().unwrap();
    let positions_end = writer.virtual_offset();
    writer.write_all(b"\n],\"genes\":[\n").unwrap();
    let genes_begin = writer.virtual_offset();
    assert_ne!(genes_begin & 0xffff, 0);
    writer.write_all(b"{\"gene\":\"G9\"}\n]}\n").unwrap();
    let stream = writer.finish().unwrap();

    let mut index_writer = SectionIndexWriter::new();
    index_writer.add_section(POSITIONS_SECTION, positions_begin, positions_end);
    index_writer.add_section(GENES_SECTION, genes_begin, genes_begin);
    let mut encoded = Vec::new();
    index_writer.write_to(&mut encoded).unwrap();
    let index = SectionIndex::read_from(&mut Cursor::new(encoded)).unwrap();

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    stitcher.add_shard(Cursor::new(stream), &index).unwrap();
    let stats = stitcher.finish().unwrap();

    assert_eq!(stats.gene_lines_unique, 1);
    assert!(decompress_all(&output).ends_with("\"genes\":[\n{\"gene\":\"G9\"}\n]}"));
}

#[test]
fn gene_lines_deduplicate_by_exact_string_equality() {
    // A whitespace-padded line is a different string and must survive as
    // its own entry, sorting ahead of the unpadded one.
    let (shard1, index1) = build_shard(&["{\"pos\":1}"], &[" {\"gene\":\"G1\"}"]);
    let (shard2, index2) = build_shard(&["{\"pos\":2}"], &["{\"gene\":\"G1\"}"]);

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    stitcher.add_shard(Cursor::new(shard1), &index1).unwrap();
    stitcher.add_shard(Cursor::new(shard2), &index2).unwrap();
    let stats = stitcher.finish().unwrap();

    assert_eq!(stats.gene_lines_total, 2);
    assert_eq!(stats.gene_lines_unique, 2);
    assert!(decompress_all(&output)
        .ends_with("\"genes\":[\n {\"gene\":\"G1\"},\n{\"gene\":\"G1\"}\n]}"));
}

#[test]
fn shard_without_positions_section_fails_the_stitch() {
    let (shard, _) = build_shard(&["{\"pos\":1}"], &[]);
    let mut index_writer = SectionIndexWriter::new();
    index_writer.add_section(GENES_SECTION, 0, 0);
    let mut encoded = Vec::new();
    index_writer.write_to(&mut encoded).unwrap();
    let index = SectionIndex::read_from(&mut Cursor::new(encoded)).unwrap();

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    let err = stitcher.add_shard(Cursor::new(shard), &index).unwrap_err();
    assert!(err.to_string().contains("positions"));
}

#[test]
fn corrupt_shard_aborts_the_stitch() {
    let (mut shard, index) = build_shard(&["{\"pos\":1}"], &[]);
    shard[1] = 0x00;

    let mut output = Vec::new();
    let mut stitcher = JsonStitcher::new(&mut output).unwrap();
    let err = stitcher.add_shard(Cursor::new(shard), &index).unwrap_err();
    assert!(matches!(err, StitchError::BgzfCorrupt { .. }));
}
