pub mod error;
pub mod stitch;

pub use error::{Result, StitchError};
pub use stitch::block::{BgzfBlock, BGZF_EOF_MARKER, BGZF_MAX_BLOCK_SIZE, BGZF_MAX_PAYLOAD};
pub use stitch::block_reader::BgzfBlockReader;
pub use stitch::block_writer::BgzfWriter;
pub use stitch::section_index::{
    block_offset, file_offset, SectionIndex, SectionIndexWriter, ABSENT_SECTION, GENES_SECTION,
    POSITIONS_SECTION, SECTION_INDEX_EXT,
};
pub use stitch::stitcher::{JsonStitcher, StitchStats};
