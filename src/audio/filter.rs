//! Audio filter chain passed to the tool via `-af`

use std::fmt;

/// Removes near-silent audio from both ends of a clip.
///
/// ffmpeg's `silenceremove` only trims the start reliably, so the clip is
/// reversed, trimmed again and reversed back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceTrim {
    /// Minimum silence duration in seconds
    pub min_duration: f32,
    /// Amplitude threshold in dB
    pub threshold_db: i32,
}

impl Default for SilenceTrim {
    fn default() -> Self {
        Self {
            min_duration: 0.1,
            threshold_db: -50,
        }
    }
}

impl SilenceTrim {
    fn remove_leading(&self) -> String {
        format!(
            "silenceremove=start_periods=1:start_silence={}:start_threshold={}dB",
            self.min_duration, self.threshold_db
        )
    }
}

impl fmt::Display for SilenceTrim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leading = self.remove_leading();
        write!(f, "{leading},areverse,{leading},areverse")
    }
}

/// Named stage of the filter chain
#[derive(Debug, Clone, PartialEq)]
pub enum FilterStage {
    SilenceTrim(SilenceTrim),
}

impl FilterStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SilenceTrim(_) => "silence-trim",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SilenceTrim(trim) => fmt::Display::fmt(trim, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain enabled by the processing settings
    pub fn from_settings(silence_trim: bool) -> Self {
        let mut chain = Self::new();
        if silence_trim {
            chain.push(FilterStage::SilenceTrim(SilenceTrim::default()));
        }
        chain
    }

    pub fn push(&mut self, stage: FilterStage) {
        self.stages.push(stage);
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(FilterStage::name).collect()
    }

    /// `-af <graph>` arguments, empty when there are no stages
    pub fn to_args(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let graph = self.stages.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        vec!["-af".to_string(), graph]
    }
}
