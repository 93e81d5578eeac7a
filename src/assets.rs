//! Finding the files the game loads at runtime.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{constants::assets::DIR, Result};

/// The directory assets are loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Use a specific directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `assets/` next to the running executable, or `./assets` if the executable can't be found.
    pub fn locate() -> Self {
        let base = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join(DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where things that live *beside* the assets go, e.g. the log file.
    pub fn base(&self) -> &Path {
        match self.root.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// The full path of one asset.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read a whole asset into memory.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.path(name))?)
    }
}
