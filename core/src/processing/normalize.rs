use tracing::debug;

use crate::{
    error::MetadataError,
    model::{UploadInfo, VideoDescriptor},
    util::round2,
};

use super::ffprobe::ProbeOutput;

/// Parse an ffprobe rational like `24000/1001`. Only `<digits>/<digits>` with a
/// non-zero denominator is accepted.
pub fn parse_frame_rate(expr: &str) -> Result<f64, MetadataError> {
    let invalid = || MetadataError::InvalidFrameRate(expr.to_string());
    let (numerator, denominator) = expr.split_once('/').ok_or_else(invalid)?;
    let parse_part = |part: &str| -> Result<u64, MetadataError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };
    let numerator = parse_part(numerator)?;
    let denominator = parse_part(denominator)?;
    if denominator == 0 {
        return Err(invalid());
    }
    Ok(numerator as f64 / denominator as f64)
}

fn parse_non_negative(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Turn raw probe output and upload info into a [`VideoDescriptor`].
pub fn normalize(probe: &ProbeOutput, upload: &UploadInfo) -> Result<VideoDescriptor, MetadataError> {
    let video = probe.video.as_ref().ok_or(MetadataError::NoVideoStream)?;

    // r_frame_rate is 0/0 for some variable frame rate streams
    let frame_rate_expr = match video.r_frame_rate.as_deref() {
        Some(r) if r != "0/0" => Some(r),
        _ => video.avg_frame_rate.as_deref().or(video.r_frame_rate.as_deref()),
    };
    let frame_rate = parse_frame_rate(frame_rate_expr.unwrap_or_default())?;

    let duration_seconds = parse_non_negative(video.duration.as_deref())
        .or_else(|| parse_non_negative(probe.format.duration.as_deref()))
        .unwrap_or(0.0);

    let explicit_frame_count = video
        .nb_frames
        .as_deref()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0);
    let frame_count = match explicit_frame_count {
        Some(n) => n,
        None => {
            let derived = (duration_seconds * frame_rate).round() as u64;
            debug!(
                duration_seconds,
                frame_rate, derived, "no frame count in stream, derived from duration"
            );
            derived
        }
    };

    let bit_rate = video
        .bit_rate
        .as_deref()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .or_else(|| {
            probe
                .format
                .bit_rate
                .as_deref()
                .and_then(|s| s.trim().parse::<u64>().ok())
        });

    Ok(VideoDescriptor {
        duration_seconds,
        width: video.width.unwrap_or(0),
        height: video.height.unwrap_or(0),
        frame_rate: round2(frame_rate),
        frame_count,
        codec_name: video.codec_name.clone().unwrap_or_default(),
        profile: video.profile.clone(),
        container_format: probe.format.format_name.clone(),
        bit_rate,
        file_size: upload.file_size,
        mime_type: upload.mime_type.clone(),
        file_name: upload.file_name.clone(),
    })
}
