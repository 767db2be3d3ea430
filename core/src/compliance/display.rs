//! Human readable forms of measured values. These strings end up in API
//! responses, so changing them changes the API.

use crate::util::trim_decimal;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Size in the largest unit that keeps the value >= 1, with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", trim_decimal(value), SIZE_UNITS[unit])
}

pub fn codec_display_name(codec_name: &str) -> String {
    match codec_name.to_ascii_lowercase().as_str() {
        "h264" | "avc" | "avc1" => "H.264".to_string(),
        "hevc" | "h265" | "hev1" | "hvc1" => "H.265".to_string(),
        _ => codec_name.to_uppercase(),
    }
}

/// ffprobe reports the same `mov,mp4,...` format name for both MP4 and
/// QuickTime files, so the MIME type is checked first.
pub fn format_display_name(container_format: &str, mime_type: &str) -> String {
    let container = container_format.to_ascii_lowercase();
    let mime = mime_type.to_ascii_lowercase();
    if mime.contains("quicktime") {
        "MOV".to_string()
    } else if mime.contains("mp4") || container.contains("mp4") {
        "MP4".to_string()
    } else if container.contains("mov") || container.contains("quicktime") {
        "MOV".to_string()
    } else {
        container_format.to_uppercase()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1048576), "1 MB");
        assert_eq!(format_file_size(157286400), "150 MB");
        assert_eq!(format_file_size(104857601), "100 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn codec_aliases() {
        assert_eq!(codec_display_name("h264"), "H.264");
        assert_eq!(codec_display_name("avc1"), "H.264");
        assert_eq!(codec_display_name("AVC"), "H.264");
        assert_eq!(codec_display_name("hevc"), "H.265");
        assert_eq!(codec_display_name("hvc1"), "H.265");
        assert_eq!(codec_display_name("hev1"), "H.265");
        assert_eq!(codec_display_name("vp9"), "VP9");
        assert_eq!(codec_display_name("prores"), "PRORES");
    }

    #[test]
    fn container_formats() {
        assert_eq!(format_display_name("mov,mp4,m4a,3gp,3g2,mj2", "video/mp4"), "MP4");
        assert_eq!(
            format_display_name("mov,mp4,m4a,3gp,3g2,mj2", "video/quicktime"),
            "MOV"
        );
        assert_eq!(format_display_name("mov", ""), "MOV");
        assert_eq!(format_display_name("avi", "video/x-msvideo"), "AVI");
        assert_eq!(format_display_name("matroska,webm", "video/webm"), "MATROSKA,WEBM");
    }
}
