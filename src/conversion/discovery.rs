//! Input enumeration

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::audio::InputFormat;

/// Eligible file found directly inside the input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// File name without extension, byte-exact
    pub stem: OsString,
    pub format: InputFormat,
}

impl InputFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Files grouped by format: all m4a, then ogg, then mp3
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    groups: [Vec<InputFile>; 3],
}

impl Discovery {
    /// Scan the top level of `dir`. A folder that is missing or unreadable
    /// yields nothing, and unreadable entries are skipped.
    pub fn scan(dir: &Path) -> Self {
        let mut discovery = Self::default();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Input folder does not exist: {}", dir.display());
                return discovery;
            }
            Err(e) => {
                warn!("Cannot read input folder {}: {}", dir.display(), e);
                return discovery;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            let Some(format) = InputFormat::from_path(&path) else {
                continue;
            };
            if !path.is_file() {
                debug!("Skipping non-file entry: {}", path.display());
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_os_string()) else {
                continue;
            };
            discovery.groups[group_index(format)].push(InputFile { path, stem, format });
        }

        discovery
    }

    pub fn count(&self, format: InputFormat) -> usize {
        self.groups[group_index(format)].len()
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Files in processing order
    pub fn files(&self) -> impl Iterator<Item = &InputFile> {
        self.groups.iter().flatten()
    }
}

fn group_index(format: InputFormat) -> usize {
    match format {
        InputFormat::M4a => 0,
        InputFormat::Ogg => 1,
        InputFormat::Mp3 => 2,
    }
}
