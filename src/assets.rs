//! Where an application's images, sounds, music and fonts live.

use std::path::{Path, PathBuf};

use crate::*;

/// Environment variable that overrides the asset root.
pub const ASSETS_ENV: &str = "TOUCHGUI_ASSETS";

/// The asset folder layout: `images/`, `sounds/`, `music/` and `fonts/` under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFolders {
    root: PathBuf,
}

impl AssetFolders {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        return Self { root: root.into() };
    }

    /// The root named by `TOUCHGUI_ASSETS`, or the current directory.
    pub fn from_env() -> Self {
        match std::env::var_os(ASSETS_ENV) {
            Some(root) => return Self::new(root),
            None => return Self::new("."),
        }
    }

    pub fn root(&self) -> &Path {
        return &self.root;
    }

    pub fn images(&self) -> PathBuf {
        return self.root.join("images");
    }

    pub fn sounds(&self) -> PathBuf {
        return self.root.join("sounds");
    }

    pub fn music(&self) -> PathBuf {
        return self.root.join("music");
    }

    pub fn fonts(&self) -> PathBuf {
        return self.root.join("fonts");
    }

    pub fn image(&self, file: &str) -> PathBuf {
        return self.images().join(file);
    }

    pub fn sound(&self, file: &str) -> PathBuf {
        return self.sounds().join(file);
    }

    pub fn track(&self, file: &str) -> PathBuf {
        return self.music().join(file);
    }

    /// The first `.ttf` or `.otf` file in `fonts/`, by name.
    pub fn default_font(&self) -> Result<Option<Font>> {
        let dir = self.fonts();
        if dir.is_dir() == false {
            log::warn!("No font folder at {:?}, text won't be drawn", dir);
            return Ok(None);
        }
        let font_file = files_in(&dir)?.into_iter().find(|path| {
            let extension = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
            return matches!(extension.as_deref(), Some("ttf") | Some("otf"));
        });
        match font_file {
            Some(path) => return Ok(Some(Font::from_path(path)?)),
            None => {
                log::warn!("No font in {:?}, text won't be drawn", dir);
                return Ok(None);
            }
        }
    }
}

impl Default for AssetFolders {
    fn default() -> Self {
        return Self::from_env();
    }
}

/// The regular files directly inside `dir`, sorted by name.
pub fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    return Ok(files);
}
