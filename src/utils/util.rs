use crate::error::VarinResult;
use std::{fmt::Display, path::Path, sync::Once};

pub type Result<T> = VarinResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

pub fn try_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::varin_error!(
            "Path/File does not exist: {}",
            path.display()
        ));
    }
    Ok(())
}
