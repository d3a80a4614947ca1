//! Input formats and the fixed Ogg Vorbis output profile

use std::ffi::OsStr;
use std::path::Path;

/// Extension of every produced file
pub const OUTPUT_EXTENSION: &str = "ogg";

/// Accepted input formats, in processing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    M4a,
    Ogg,
    Mp3,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [InputFormat::M4a, InputFormat::Ogg, InputFormat::Mp3];

    pub fn extension(self) -> &'static str {
        match self {
            Self::M4a => "m4a",
            Self::Ogg => "ogg",
            Self::Mp3 => "mp3",
        }
    }

    /// Match a path's extension, ignoring ASCII case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(OsStr::to_str)?;
        Self::ALL.into_iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

/// Encoder settings required by the game engine. Not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingProfile {
    pub codec: &'static str,
    pub channels: u8,
    pub sample_rate: u32,
    /// Vorbis VBR quality, 0-10
    pub quality: u8,
}

impl EncodingProfile {
    pub const VORBIS_MONO_44K: EncodingProfile = EncodingProfile {
        codec: "libvorbis",
        channels: 1,
        sample_rate: 44100,
        quality: 5,
    };

    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-c:a".to_string(),
            self.codec.to_string(),
            "-ac".to_string(),
            self.channels.to_string(),
            "-ar".to_string(),
            self.sample_rate.to_string(),
            "-q:a".to_string(),
            self.quality.to_string(),
        ]
    }
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self::VORBIS_MONO_44K
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.m4a")), Some(InputFormat::M4a));
        assert_eq!(InputFormat::from_path(Path::new("dir/b.ogg")), Some(InputFormat::Ogg));
        assert_eq!(InputFormat::from_path(Path::new("C.MP3")), Some(InputFormat::Mp3));
        assert_eq!(InputFormat::from_path(Path::new("d.wav")), None);
        assert_eq!(InputFormat::from_path(Path::new("mp3")), None);
        assert_eq!(InputFormat::from_path(Path::new(".mp3")), None);
    }

    #[test]
    fn test_profile_args() {
        assert_eq!(
            EncodingProfile::default().to_args(),
            ["-c:a", "libvorbis", "-ac", "1", "-ar", "44100", "-q:a", "5"]
        );
    }
}
