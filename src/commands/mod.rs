mod stitch;

pub use stitch::stitch;
