use crate::assets::AssetDir;

use super::{Cue, CuePlayer};

/// Plays each cue from its sound file on its own short-lived thread.
///
/// Nothing ever waits on those threads: if the audio device is missing or a file won't decode, the thread logs a
/// warning and exits. Built without the `audio` feature, cues are only logged.
pub struct SoundBoard {
    assets: AssetDir,
}

impl SoundBoard {
    pub fn new(assets: AssetDir) -> Self {
        Self { assets }
    }
}

impl CuePlayer for SoundBoard {
    fn notify(&self, cue: Cue) {
        let path = self.assets.path(cue.file_name());
        #[cfg(feature = "audio")]
        {
            let spawned = std::thread::Builder::new()
                .name(format!("cue-{:?}", cue).to_lowercase())
                .spawn(move || {
                    if let Err(e) = play::play(&path) {
                        log::warn!("couldn't play {}: {}", path.display(), e);
                    }
                });
            if let Err(e) = spawned {
                log::warn!("couldn't start playing {:?} cue: {}", cue, e);
            }
        }
        #[cfg(not(feature = "audio"))]
        log::debug!("skipping {}, built without audio", path.display());
    }
}

#[cfg(feature = "audio")]
mod play {
    use std::{fmt::Display, fs::File, io::BufReader, path::Path};

    use crate::{Error, Result};

    fn audio(e: impl Display) -> Error {
        Error::Audio(e.to_string())
    }

    /// Play a sound file start to finish, blocking until it's done.
    pub fn play(path: &Path) -> Result<()> {
        let file = BufReader::new(File::open(path)?);
        // the stream has to outlive the sink, or playback stops immediately
        let (_stream, handle) = rodio::OutputStream::try_default().map_err(audio)?;
        let sink = rodio::Sink::try_new(&handle).map_err(audio)?;
        sink.append(rodio::Decoder::new(file).map_err(audio)?);
        sink.sleep_until_end();
        Ok(())
    }

}
