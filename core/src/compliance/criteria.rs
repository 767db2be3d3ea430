use itertools::Itertools;

use crate::util::trim_decimal;

use super::display::{codec_display_name, format_display_name};

/// Allowed ranges for each criterion. Immutable once constructed, pass a
/// different value to evaluate against a different rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceCriteria {
    /// Exact (width, height) pairs
    pub resolutions: Vec<(u32, u32)>,
    pub target_frame_rate: f64,
    pub frame_rate_tolerance: f64,
    pub target_frame_count: u64,
    pub frame_count_tolerance: u64,
    /// Inclusive
    pub max_file_size: u64,
    /// Lower-case substrings matched against container format and MIME type
    pub container_tokens: Vec<String>,
    /// Lower-case substrings matched against the codec name
    pub codec_tokens: Vec<String>,
}

impl Default for ComplianceCriteria {
    fn default() -> Self {
        Self {
            resolutions: vec![(1920, 810), (3840, 1620)],
            target_frame_rate: 24.0,
            frame_rate_tolerance: 0.1,
            target_frame_count: 144,
            frame_count_tolerance: 2,
            max_file_size: 100 * 1024 * 1024,
            container_tokens: ["mp4", "mov", "quicktime"].map(String::from).to_vec(),
            codec_tokens: ["h264", "avc", "hevc", "h265"].map(String::from).to_vec(),
        }
    }
}

impl ComplianceCriteria {
    pub fn resolution_requirement(&self) -> String {
        self.resolutions
            .iter()
            .map(|(w, h)| format!("{}×{}", w, h))
            .join(" or ")
    }

    pub fn format_requirement(&self) -> String {
        self.container_tokens
            .iter()
            .map(|token| format_display_name(token, ""))
            .unique()
            .join(" or ")
    }

    pub fn file_size_requirement(&self) -> String {
        format!(
            "< {}MB",
            trim_decimal(self.max_file_size as f64 / (1024.0 * 1024.0))
        )
    }

    pub fn frame_rate_requirement(&self) -> String {
        format!("{} fps", trim_decimal(self.target_frame_rate))
    }

    pub fn frame_count_requirement(&self) -> String {
        format!("{} frames", self.target_frame_count)
    }

    pub fn codec_requirement(&self) -> String {
        self.codec_tokens
            .iter()
            .map(|token| codec_display_name(token))
            .unique()
            .join(" or ")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_requirement_strings() {
        let criteria = ComplianceCriteria::default();
        assert_eq!(criteria.resolution_requirement(), "1920×810 or 3840×1620");
        assert_eq!(criteria.format_requirement(), "MP4 or MOV");
        assert_eq!(criteria.file_size_requirement(), "< 100MB");
        assert_eq!(criteria.frame_rate_requirement(), "24 fps");
        assert_eq!(criteria.frame_count_requirement(), "144 frames");
        assert_eq!(criteria.codec_requirement(), "H.264 or H.265");
    }

    #[test]
    fn requirement_strings_follow_overrides() {
        let criteria = ComplianceCriteria {
            resolutions: vec![(1920, 1080)],
            target_frame_rate: 23.976,
            max_file_size: 50 * 1024 * 1024,
            codec_tokens: vec!["hevc".into()],
            ..Default::default()
        };
        assert_eq!(criteria.resolution_requirement(), "1920×1080");
        assert_eq!(criteria.frame_rate_requirement(), "23.98 fps");
        assert_eq!(criteria.file_size_requirement(), "< 50MB");
        assert_eq!(criteria.codec_requirement(), "H.265");
    }
}
