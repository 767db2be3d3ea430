use crate::util::round2;

/// Normalized technical properties of one uploaded video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDescriptor {
    /// Full precision, see [`VideoDescriptor::display_duration`]
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    /// Already rounded to two decimals
    pub frame_rate: f64,
    pub frame_count: u64,
    /// As reported by the probe, not lower-cased
    pub codec_name: String,
    pub profile: Option<String>,
    /// Possibly a comma separated list of aliases, e.g. `mov,mp4,m4a,3gp,3g2,mj2`
    pub container_format: String,
    pub bit_rate: Option<u64>,
    pub file_size: u64,
    pub mime_type: String,
    pub file_name: String,
}

impl VideoDescriptor {
    pub fn display_duration(&self) -> f64 {
        round2(self.duration_seconds)
    }
}

/// A video that satisfies the default criteria.
#[cfg(test)]
pub fn test_descriptor() -> VideoDescriptor {
    VideoDescriptor {
        duration_seconds: 6.0,
        width: 1920,
        height: 810,
        frame_rate: 24.0,
        frame_count: 144,
        codec_name: "h264".into(),
        profile: Some("High".into()),
        container_format: "mov,mp4,m4a,3gp,3g2,mj2".into(),
        bit_rate: Some(16_000_000),
        file_size: 13_107_200,
        mime_type: "video/mp4".into(),
        file_name: "entry.mp4".into(),
    }
}
