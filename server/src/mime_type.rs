use std::borrow::Cow;

/// Uploads must have one of these content types or one of [`ACCEPTED_EXTENSIONS`].
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["video/mp4", "video/quicktime", "video/x-msvideo"];
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

pub fn guess_mime_type(file_ext: &str) -> Option<Cow<'static, str>> {
    match file_ext {
        "mp4" | "m4v" => Some(Cow::Borrowed("video/mp4")),
        "mov" | "qt" => Some(Cow::Borrowed("video/quicktime")),
        "avi" => Some(Cow::Borrowed("video/x-msvideo")),
        "mkv" => Some(Cow::Borrowed("video/x-matroska")),
        "webm" => Some(Cow::Borrowed("video/webm")),
        _ => None,
    }
}

pub fn file_extension(file_name: &str) -> Option<String> {
    camino::Utf8Path::new(file_name)
        .extension()
        .map(|ext| ext.to_ascii_lowercase())
}

pub fn guess_mime_type_path(file_name: &str) -> Option<Cow<'static, str>> {
    let ext = file_extension(file_name)?;
    match guess_mime_type(&ext) {
        Some(m) => Some(m),
        None => {
            tracing::warn!("can't guess MIME type for filename '{}'", file_name);
            None
        }
    }
}

/// `video/mp4; codecs="avc1.640028"` -> `video/mp4`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_accepted_upload(content_type: Option<&str>, file_name: &str) -> bool {
    let mime_ok = content_type
        .map(essence)
        .is_some_and(|mime| ACCEPTED_MIME_TYPES.contains(&mime.as_str()));
    let ext_ok = file_extension(file_name)
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
    mime_ok || ext_ok
}

/// MIME type to record for an upload: what the client sent, unless that is
/// missing or generic, then a guess from the file name.
pub fn upload_mime_type(content_type: Option<&str>, file_name: &str) -> String {
    match content_type.map(essence) {
        Some(mime) if !mime.is_empty() && mime != "application/octet-stream" => mime,
        _ => guess_mime_type_path(file_name)
            .map(Cow::into_owned)
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepted_uploads() {
        assert!(is_accepted_upload(Some("video/mp4"), "clip"));
        assert!(is_accepted_upload(Some("video/quicktime"), "clip.bin"));
        assert!(is_accepted_upload(Some("video/x-msvideo"), "clip"));
        assert!(is_accepted_upload(Some("Video/MP4; codecs=\"avc1\""), "clip"));
        assert!(is_accepted_upload(Some("application/octet-stream"), "clip.MOV"));
        assert!(is_accepted_upload(None, "clip.avi"));
        assert!(!is_accepted_upload(Some("video/webm"), "clip.webm"));
        assert!(!is_accepted_upload(Some("image/png"), "clip.png"));
        assert!(!is_accepted_upload(None, "mp4"));
    }

    #[test]
    fn recorded_mime_type() {
        assert_eq!(upload_mime_type(Some("video/mp4"), "a.mov"), "video/mp4");
        assert_eq!(
            upload_mime_type(Some("application/octet-stream"), "a.mov"),
            "video/quicktime"
        );
        assert_eq!(upload_mime_type(None, "a.avi"), "video/x-msvideo");
        assert_eq!(upload_mime_type(None, "a"), "application/octet-stream");
    }
}
