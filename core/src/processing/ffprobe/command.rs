use std::{process::Stdio, time::Duration};

use camino::Utf8Path as Path;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{instrument, warn};

use crate::error::ProbeError;

use super::{ContainerFormat, ProbeOutput, VideoStream};

#[instrument(level = "debug")]
pub async fn ffprobe(
    path: &Path,
    ffprobe_bin_path: Option<&Path>,
    timeout: Duration,
) -> Result<ProbeOutput, ProbeError> {
    let child = Command::new(ffprobe_bin_path.map(|p| p.as_str()).unwrap_or("ffprobe"))
        .args([
            "-v",
            "error",
            "-show_format",
            "-show_streams",
            "-of",
            "json",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // dropping the wait future on timeout kills ffprobe
        .kill_on_drop(true)
        .spawn()
        .map_err(ProbeError::Spawn)?;
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Err(_elapsed) => {
            warn!("ffprobe timed out after {:?}", timeout);
            return Err(ProbeError::Timeout(timeout));
        }
        Ok(result) => result.map_err(ProbeError::Io)?,
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(status = %output.status, "ffprobe failed: {}", stderr);
        return Err(ProbeError::Failed {
            status: output.status.to_string(),
            stderr,
        });
    }
    parse_ffprobe_output(&output.stdout)
}

pub fn parse_ffprobe_output(json: &[u8]) -> Result<ProbeOutput, ProbeError> {
    #[derive(Debug, Clone, Deserialize)]
    struct FFProbeFormat {
        pub format_name: Option<String>,
        pub duration: Option<String>,
        pub bit_rate: Option<String>,
    }
    #[derive(Debug, Clone, Deserialize)]
    struct FFProbeVideoStream {
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
    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "codec_type")]
    enum FFProbeStreamType {
        #[serde(rename = "video")]
        Video(FFProbeVideoStream),
        #[serde(other)]
        Other,
    }
    #[derive(Debug, Clone, Deserialize)]
    struct FFProbeOutput {
        #[serde(default)]
        pub streams: Vec<FFProbeStreamType>,
        pub format: Option<FFProbeFormat>,
    }

    let parsed: FFProbeOutput = serde_json::from_slice(json)?;
    let mut video_streams = parsed.streams.into_iter().filter_map(|stream| match stream {
        FFProbeStreamType::Video(video) => Some(VideoStream {
            codec_name: video.codec_name,
            profile: video.profile,
            width: video.width,
            height: video.height,
            r_frame_rate: video.r_frame_rate,
            avg_frame_rate: video.avg_frame_rate,
            nb_frames: video.nb_frames,
            duration: video.duration,
            bit_rate: video.bit_rate,
        }),
        FFProbeStreamType::Other => None,
    });
    let video = video_streams.next();
    let extra_video_streams = video_streams.count();
    if extra_video_streams > 0 {
        warn!(
            "{} additional video streams in file, using the first one",
            extra_video_streams
        );
    }
    let format = parsed
        .format
        .map(|format| ContainerFormat {
            format_name: format.format_name.unwrap_or_default(),
            duration: format.duration,
            bit_rate: format.bit_rate,
        })
        .unwrap_or_default();
    Ok(ProbeOutput { format, video })
}

#[cfg(test)]
pub(crate) const FFPROBE_MP4_OUTPUT: &str = r#"
{
    "streams": [
        {
            "index": 0,
            "codec_name": "h264",
            "codec_long_name": "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
            "profile": "High",
            "codec_type": "video",
            "codec_tag_string": "avc1",
            "codec_tag": "0x31637661",
            "width": 1920,
            "height": 810,
            "coded_width": 1920,
            "coded_height": 816,
            "has_b_frames": 2,
            "sample_aspect_ratio": "1:1",
            "display_aspect_ratio": "64:27",
            "pix_fmt": "yuv420p",
            "level": 40,
            "r_frame_rate": "24/1",
            "avg_frame_rate": "24/1",
            "time_base": "1/12288",
            "start_pts": 0,
            "start_time": "0.000000",
            "duration_ts": 73728,
            "duration": "6.000000",
            "bit_rate": "15894211",
            "bits_per_raw_sample": "8",
            "nb_frames": "144",
            "extradata_size": 46
        },
        {
            "index": 1,
            "codec_name": "aac",
            "codec_long_name": "AAC (Advanced Audio Coding)",
            "profile": "LC",
            "codec_type": "audio",
            "sample_fmt": "fltp",
            "sample_rate": "48000",
            "channels": 2,
            "r_frame_rate": "0/0",
            "avg_frame_rate": "0/0",
            "duration": "6.000000",
            "bit_rate": "128000",
            "nb_frames": "283"
        }
    ],
    "format": {
        "filename": "/tmp/.tmpA1b2C3.mp4",
        "nb_streams": 2,
        "nb_programs": 0,
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "format_long_name": "QuickTime / MOV",
        "start_time": "0.000000",
        "duration": "6.000000",
        "size": "12058368",
        "bit_rate": "16077824",
        "probe_score": 100
    }
}
"#;

#[cfg(test)]
mod test {
    use claims::{assert_matches, assert_ok};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ffprobe_output_parsed_correctly() {
        let parsed = assert_ok!(parse_ffprobe_output(FFPROBE_MP4_OUTPUT.as_bytes()));
        assert_eq!(
            parsed,
            ProbeOutput {
                format: ContainerFormat {
                    format_name: "mov,mp4,m4a,3gp,3g2,mj2".into(),
                    duration: Some("6.000000".into()),
                    bit_rate: Some("16077824".into()),
                },
                video: Some(VideoStream {
                    codec_name: Some("h264".into()),
                    profile: Some("High".into()),
                    width: Some(1920),
                    height: Some(810),
                    r_frame_rate: Some("24/1".into()),
                    avg_frame_rate: Some("24/1".into()),
                    nb_frames: Some("144".into()),
                    duration: Some("6.000000".into()),
                    bit_rate: Some("15894211".into()),
                }),
            }
        );
    }

    #[test]
    fn audio_only_file_has_no_video_stream() {
        let output = r#"
{
    "streams": [
        {
            "index": 0,
            "codec_name": "mp3",
            "codec_type": "audio",
            "sample_rate": "44100",
            "channels": 2,
            "duration": "183.222857",
            "bit_rate": "320000"
        }
    ],
    "format": {
        "format_name": "mp3",
        "duration": "183.222857",
        "bit_rate": "320218"
    }
}
"#;
        let parsed = assert_ok!(parse_ffprobe_output(output.as_bytes()));
        assert_eq!(parsed.video, None);
        assert_eq!(parsed.format.format_name, "mp3");
    }

    // make sure we don't choke on unexpected codec_type values or extra video streams
    #[test]
    fn first_video_stream_wins() {
        let output = r#"
{
    "streams": [
        { "index": 0, "codec_type": "data", "codec_tag_string": "tmcd" },
        { "index": 1, "codec_type": "video", "codec_name": "hevc", "width": 3840, "height": 1620, "r_frame_rate": "24000/1001" },
        { "index": 2, "codec_type": "video", "codec_name": "mjpeg", "width": 600, "height": 600, "r_frame_rate": "90000/1" },
        { "index": 3, "codec_type": "couldbeanythingreally" }
    ]
}
"#;
        let parsed = assert_ok!(parse_ffprobe_output(output.as_bytes()));
        let video = parsed.video.expect("has a video stream");
        assert_eq!(video.codec_name.as_deref(), Some("hevc"));
        assert_eq!(video.width, Some(3840));
        assert_eq!(video.nb_frames, None);
        assert_eq!(parsed.format, ContainerFormat::default());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert_matches!(
            parse_ffprobe_output(b"Invalid data found when processing input"),
            Err(ProbeError::Parse(_))
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn ffprobe_process_outcomes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let write_script = |name: &str, body: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            camino::Utf8PathBuf::try_from(path).unwrap()
        };
        let input = Path::new("/nonexistent/input.mp4");

        let json_path = dir.path().join("output.json");
        std::fs::write(&json_path, FFPROBE_MP4_OUTPUT).unwrap();
        let ok_script = write_script("ok.sh", &format!("cat '{}'", json_path.display()));
        let parsed = assert_ok!(ffprobe(input, Some(ok_script.as_path()), Duration::from_secs(10)).await);
        assert_eq!(parsed.format.format_name, "mov,mp4,m4a,3gp,3g2,mj2");

        let failing_script = write_script("fail.sh", "echo 'moov atom not found' >&2; exit 1");
        let result = ffprobe(input, Some(failing_script.as_path()), Duration::from_secs(10)).await;
        assert_matches!(result, Err(ProbeError::Failed { stderr, .. }) if stderr == "moov atom not found");

        let slow_script = write_script("slow.sh", "sleep 10");
        let result = ffprobe(input, Some(slow_script.as_path()), Duration::from_millis(200)).await;
        assert_matches!(result, Err(ProbeError::Timeout(_)));

        let missing = Path::new("/nonexistent/ffprobe");
        let result = ffprobe(input, Some(missing), Duration::from_secs(10)).await;
        assert_matches!(result, Err(ProbeError::Spawn(_)));
    }
}
