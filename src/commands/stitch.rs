use crate::{cli::StitchArgs, utils::util::Result};
use bgzf_stitch::{JsonStitcher, SectionIndex, SECTION_INDEX_EXT};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::File,
    io::{BufReader, BufWriter, IsTerminal, Write},
    path::PathBuf,
};

pub fn stitch(args: StitchArgs) -> Result<()> {
    let index_paths = resolve_index_paths(&args)?;

    let output = File::create(&args.output).map_err(|e| {
        crate::varin_error!("Failed to create output file {}: {e}", args.output.display())
    })?;
    let mut writer = BufWriter::new(output);
    let mut stitcher = JsonStitcher::new(&mut writer)?;

    let progress = shard_progress(args.json_shards.len() as u64);
    for (shard_path, index_path) in args.json_shards.iter().zip(&index_paths) {
        log::debug!(
            "Stitching shard {} (index {})",
            shard_path.display(),
            index_path.display()
        );
        let mut index_reader = BufReader::new(File::open(index_path).map_err(|e| {
            crate::varin_error!("Failed to open index {}: {e}", index_path.display())
        })?);
        let index = SectionIndex::read_from(&mut index_reader)?;

        let shard = BufReader::new(File::open(shard_path).map_err(|e| {
            crate::varin_error!("Failed to open shard {}: {e}", shard_path.display())
        })?);
        stitcher.add_shard(shard, &index)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    let stats = stitcher.finish()?;
    writer.flush()?;

    log::info!(
        "Stitched {} shards into {}: {} position blocks, {} gene lines ({} unique)",
        args.json_shards.len(),
        args.output.display(),
        stats.position_blocks,
        stats.gene_lines_total,
        stats.gene_lines_unique
    );
    Ok(())
}

fn resolve_index_paths(args: &StitchArgs) -> Result<Vec<PathBuf>> {
    if let Some(indexes) = &args.indexes {
        if indexes.len() != args.json_shards.len() {
            return Err(crate::varin_error!(
                "Got {} index files for {} shards; supply exactly one --index per --json",
                indexes.len(),
                args.json_shards.len()
            ));
        }
        return Ok(indexes.clone());
    }

    args.json_shards
        .iter()
        .map(|shard| {
            let mut sidecar = shard.as_os_str().to_os_string();
            sidecar.push(".");
            sidecar.push(SECTION_INDEX_EXT);
            let sidecar = PathBuf::from(sidecar);
            crate::utils::util::try_exists(&sidecar)?;
            Ok(sidecar)
        })
        .collect()
}

fn shard_progress(total: u64) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} shards {elapsed_precise}")
            .expect("progress template must parse"),
    );
    progress
}
