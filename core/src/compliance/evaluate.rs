use crate::{model::VideoDescriptor, util::trim_decimal};

use super::{
    display::{codec_display_name, format_display_name, format_file_size},
    ComplianceCriteria, ComplianceVerdict, CriterionResult,
};

/// Frame rates are compared after rounding to two decimals, where
/// `23.9 - 24.0` is not exactly `-0.1`.
const FRAME_RATE_EPSILON: f64 = 1e-9;

/// Accepted regardless of the configured codec tokens. `hvc1` and `hev1` are
/// the MP4 sample entry names of HEVC and contain neither `hevc` nor `h265`.
const CODEC_ALIASES: [&str; 4] = ["avc", "hevc", "hvc1", "hev1"];

pub fn resolution_valid(width: u32, height: u32, criteria: &ComplianceCriteria) -> bool {
    criteria.resolutions.contains(&(width, height))
}

pub fn format_valid(container_format: &str, mime_type: &str, criteria: &ComplianceCriteria) -> bool {
    let container = container_format.to_lowercase();
    let mime = mime_type.to_lowercase();
    criteria
        .container_tokens
        .iter()
        .map(|token| token.to_lowercase())
        .any(|token| container.contains(&token) || mime.contains(&token))
}

pub fn file_size_valid(file_size: u64, criteria: &ComplianceCriteria) -> bool {
    file_size <= criteria.max_file_size
}

pub fn frame_rate_valid(frame_rate: f64, criteria: &ComplianceCriteria) -> bool {
    (frame_rate - criteria.target_frame_rate).abs()
        <= criteria.frame_rate_tolerance + FRAME_RATE_EPSILON
}

pub fn frame_count_valid(frame_count: u64, criteria: &ComplianceCriteria) -> bool {
    frame_count.abs_diff(criteria.target_frame_count) <= criteria.frame_count_tolerance
}

pub fn codec_valid(codec_name: &str, criteria: &ComplianceCriteria) -> bool {
    let codec = codec_name.to_lowercase();
    criteria
        .codec_tokens
        .iter()
        .map(|token| token.to_lowercase())
        .chain(CODEC_ALIASES.map(String::from))
        .any(|token| codec.contains(&token))
}

/// Check every criterion. Missing or zero values make a criterion invalid,
/// this never fails.
pub fn evaluate(descriptor: &VideoDescriptor, criteria: &ComplianceCriteria) -> ComplianceVerdict {
    let resolution = CriterionResult {
        valid: resolution_valid(descriptor.width, descriptor.height, criteria),
        value: format!("{}×{}", descriptor.width, descriptor.height),
        requirement: criteria.resolution_requirement(),
    };
    let format = CriterionResult {
        valid: format_valid(&descriptor.container_format, &descriptor.mime_type, criteria),
        value: format_display_name(&descriptor.container_format, &descriptor.mime_type),
        requirement: criteria.format_requirement(),
    };
    let file_size = CriterionResult {
        valid: file_size_valid(descriptor.file_size, criteria),
        value: format_file_size(descriptor.file_size),
        requirement: criteria.file_size_requirement(),
    };
    let frame_rate = CriterionResult {
        valid: frame_rate_valid(descriptor.frame_rate, criteria),
        value: format!("{} fps", trim_decimal(descriptor.frame_rate)),
        requirement: criteria.frame_rate_requirement(),
    };
    let frame_count = CriterionResult {
        valid: frame_count_valid(descriptor.frame_count, criteria),
        value: format!("{} frames", descriptor.frame_count),
        requirement: criteria.frame_count_requirement(),
    };
    let codec = CriterionResult {
        valid: codec_valid(&descriptor.codec_name, criteria),
        value: codec_display_name(&descriptor.codec_name),
        requirement: criteria.codec_requirement(),
    };
    let overall = resolution.valid
        && format.valid
        && file_size.valid
        && frame_rate.valid
        && frame_count.valid
        && codec.valid;
    ComplianceVerdict {
        resolution,
        format,
        file_size,
        frame_rate,
        frame_count,
        codec,
        overall,
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{compliance::Criterion, model::test_descriptor};

    #[test]
    fn compliant_video_passes_everything() {
        let verdict = evaluate(&test_descriptor(), &ComplianceCriteria::default());
        assert!(verdict.overall);
        assert!(verdict.failed().is_empty());
        assert_eq!(
            verdict.resolution,
            CriterionResult {
                valid: true,
                value: "1920×810".into(),
                requirement: "1920×810 or 3840×1620".into(),
            }
        );
        assert_eq!(verdict.format.value, "MP4");
        assert_eq!(verdict.file_size.value, "12.5 MB");
        assert_eq!(verdict.frame_rate.value, "24 fps");
        assert_eq!(verdict.frame_count.value, "144 frames");
        assert_eq!(verdict.codec.value, "H.264");
    }

    #[test]
    fn oversized_file_only_fails_file_size() {
        let descriptor = VideoDescriptor {
            file_size: 200 * 1024 * 1024,
            ..test_descriptor()
        };
        let verdict = evaluate(&descriptor, &ComplianceCriteria::default());
        assert!(!verdict.overall);
        assert_eq!(verdict.failed(), vec![Criterion::FileSize]);
        assert_eq!(verdict.file_size.value, "200 MB");
        assert_eq!(verdict.file_size.requirement, "< 100MB");
    }

    #[test]
    fn file_size_boundary_is_inclusive() {
        let criteria = ComplianceCriteria::default();
        assert!(file_size_valid(104857600, &criteria));
        assert!(!file_size_valid(104857601, &criteria));
        assert!(file_size_valid(0, &criteria));
    }

    #[test]
    fn frame_rate_boundaries() {
        let criteria = ComplianceCriteria::default();
        assert!(frame_rate_valid(23.9, &criteria));
        assert!(!frame_rate_valid(23.89, &criteria));
        assert!(frame_rate_valid(24.1, &criteria));
        assert!(!frame_rate_valid(24.11, &criteria));
        assert!(frame_rate_valid(23.98, &criteria));
        assert!(!frame_rate_valid(25.0, &criteria));
        assert!(!frame_rate_valid(0.0, &criteria));
    }

    #[test]
    fn frame_count_boundaries() {
        let criteria = ComplianceCriteria::default();
        assert!(frame_count_valid(142, &criteria));
        assert!(!frame_count_valid(141, &criteria));
        assert!(frame_count_valid(146, &criteria));
        assert!(!frame_count_valid(147, &criteria));
        assert!(!frame_count_valid(0, &criteria));
    }

    #[test]
    fn codec_names() {
        let criteria = ComplianceCriteria::default();
        let check = |codec: &str| {
            let verdict = evaluate(
                &VideoDescriptor {
                    codec_name: codec.into(),
                    ..test_descriptor()
                },
                &criteria,
            );
            (verdict.codec.valid, verdict.codec.value)
        };
        assert_eq!(check("avc1"), (true, "H.264".to_string()));
        assert_eq!(check("hvc1"), (true, "H.265".to_string()));
        assert_eq!(check("hev1"), (true, "H.265".to_string()));
        assert_eq!(check("vp9"), (false, "VP9".to_string()));
        assert_eq!(check("H264"), (true, "H.264".to_string()));
        assert_eq!(check("av1"), (false, "AV1".to_string()));
    }

    #[test]
    fn avc_and_hevc_pass_without_configured_tokens() {
        let criteria = ComplianceCriteria {
            codec_tokens: vec!["prores".into()],
            ..Default::default()
        };
        assert!(codec_valid("avc1", &criteria));
        assert!(codec_valid("hevc", &criteria));
        assert!(codec_valid("prores", &criteria));
        assert!(codec_valid("hvc1", &criteria));
        assert!(!codec_valid("h264", &criteria));
    }

    #[test]
    fn format_matches_container_or_mime() {
        let criteria = ComplianceCriteria::default();
        assert!(format_valid("mov,mp4,m4a,3gp,3g2,mj2", "", &criteria));
        assert!(format_valid("unknown", "video/quicktime", &criteria));
        assert!(format_valid("MOV", "", &criteria));
        assert!(!format_valid("avi", "video/x-msvideo", &criteria));
        assert!(!format_valid("matroska,webm", "video/webm", &criteria));
    }

    #[test]
    fn zero_dimensions_are_invalid_not_an_error() {
        let descriptor = VideoDescriptor {
            width: 0,
            height: 0,
            ..test_descriptor()
        };
        let verdict = evaluate(&descriptor, &ComplianceCriteria::default());
        assert!(!verdict.resolution.valid);
        assert_eq!(verdict.resolution.value, "0×0");
    }

    proptest! {
        #[test]
        fn resolution_valid_iff_exact_match(width in 0u32..5000, height in 0u32..3000) {
            let criteria = ComplianceCriteria::default();
            let expected = (width, height) == (1920, 810) || (width, height) == (3840, 1620);
            prop_assert_eq!(resolution_valid(width, height, &criteria), expected);
        }

        #[test]
        fn file_size_valid_iff_at_most_limit(file_size in 0u64..300 * 1024 * 1024) {
            let criteria = ComplianceCriteria::default();
            prop_assert_eq!(file_size_valid(file_size, &criteria), file_size <= 104857600);
        }

        #[test]
        fn frame_count_valid_iff_within_two(frame_count in 0u64..400) {
            let criteria = ComplianceCriteria::default();
            prop_assert_eq!(
                frame_count_valid(frame_count, &criteria),
                (142..=146).contains(&frame_count)
            );
        }

        #[test]
        fn overall_is_and_of_criteria(
            width in prop::sample::select(vec![1920u32, 3840, 1280]),
            frame_count in 130u64..160,
            file_size in 0u64..200 * 1024 * 1024,
            codec in "h264|hevc|vp9|av1|avc1",
        ) {
            let descriptor = VideoDescriptor {
                width,
                height: if width == 3840 { 1620 } else { 810 },
                frame_count,
                file_size,
                codec_name: codec,
                ..test_descriptor()
            };
            let verdict = evaluate(&descriptor, &ComplianceCriteria::default());
            let all_valid = verdict.iter().all(|(_, result)| result.valid);
            prop_assert_eq!(verdict.overall, all_valid);
            prop_assert_eq!(verdict.overall, verdict.failed().is_empty());
            prop_assert_eq!(&verdict, &evaluate(&descriptor, &ComplianceCriteria::default()));
        }
    }
}
