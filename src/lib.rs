pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod chromosome;
    pub mod info;
    pub mod record;
    pub mod sample;
    pub mod variant;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
