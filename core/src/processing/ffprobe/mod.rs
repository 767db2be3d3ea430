mod command;

use std::time::Duration;

use async_trait::async_trait;
use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};

use crate::{config::Config, error::ProbeError, util::OptionPathExt};

pub use command::{ffprobe, parse_ffprobe_output};
#[cfg(test)]
pub(crate) use command::FFPROBE_MP4_OUTPUT;

/// Raw ffprobe fields, before any interpretation. Numbers that ffprobe
/// prints as strings are kept as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProbeOutput {
    pub format: ContainerFormat,
    /// First video stream in the file, if any
    pub video: Option<VideoStream>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContainerFormat {
    pub format_name: String,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VideoStream {
    pub codec_name: Option<String>,
    pub profile: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub r_frame_rate: Option<String>,
    pub avg_frame_rate: Option<String>,
    pub nb_frames: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
}

/// Extracts container and stream metadata from a media file.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FFProbe {
    pub bin_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl FFProbe {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bin_path: config.bin_paths.ffprobe.clone(),
            timeout: config.probe_timeout,
        }
    }
}

#[async_trait]
impl Probe for FFProbe {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        ffprobe(path, self.bin_path.as_opt_path(), self.timeout).await
    }
}
