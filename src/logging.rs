//! Log setup. The terminal belongs to the game, so logs only ever go to a file.

use std::{fs::File, path::Path};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::{constants::assets::LOG_FILE, Error, Result};

/// Send everything at debug and above to [`LOG_FILE`] in `dir`, replacing whatever was there.
///
/// Fails if the file can't be created, or if a logger is already set up.
pub fn init(dir: &Path) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let file = File::create(dir.join(LOG_FILE))?;
    WriteLogger::init(LevelFilter::Debug, config, file).map_err(|e| Error::Bare(e.to_string().into()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unwritable_dir_fails_cleanly() {
        let dir = std::env::temp_dir().join("rochambeau-no-such-dir").join("deeper");
        assert!(matches!(init(&dir), Err(Error::Io(_))));
    }
}
