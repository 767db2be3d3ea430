use axum::extract::Multipart;
use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use clipcheck_core::{error::UploadError, model::UploadInfo};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{
    http_error::ApiResult,
    mime_type::{file_extension, is_accepted_upload, upload_mime_type},
};

/// Name of the multipart field holding the video
pub const VIDEO_FIELD: &str = "video";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    /// Inclusive
    pub max_size: u64,
    /// Where temp files go, OS default if `None`
    pub dir: Option<PathBuf>,
}

/// An uploaded file on disk. The file is deleted when this is dropped, so keep
/// it alive for as long as the path is in use.
#[derive(Debug)]
pub struct UploadedFile {
    file: NamedTempFile,
    path: PathBuf,
    pub info: UploadInfo,
}

impl UploadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting errors that dropping would ignore.
    pub fn close(self) -> std::io::Result<()> {
        self.file.close()
    }
}

fn create_temp_file(file_name: &str, settings: &UploadSettings) -> Result<(NamedTempFile, PathBuf), UploadError> {
    let suffix = file_extension(file_name)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    let mut builder = tempfile::Builder::new();
    builder.prefix("clipcheck-").suffix(&suffix);
    let file = match &settings.dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    let path = PathBuf::try_from(file.path().to_path_buf()).map_err(|err| {
        UploadError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            err.to_string(),
        ))
    })?;
    Ok((file, path))
}

/// Stream the `video` field of a multipart request into a temp file.
///
/// Type and size limits are checked while receiving; on any error the partial
/// file is removed before returning.
pub async fn receive_upload(
    multipart: &mut Multipart,
    settings: &UploadSettings,
) -> ApiResult<UploadedFile> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FIELD) {
            debug!("skipping multipart field {:?}", field.name());
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        if !is_accepted_upload(content_type.as_deref(), &file_name) {
            return Err(UploadError::UnsupportedType {
                mime_type: content_type.unwrap_or_default(),
                file_name,
            }
            .into());
        }

        let (file, path) = create_temp_file(&file_name, settings)?;
        let mut writer = tokio::fs::File::from_std(file.as_file().try_clone().map_err(UploadError::Io)?);
        let mut file_size: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            file_size += chunk.len() as u64;
            if file_size > settings.max_size {
                return Err(UploadError::TooLarge {
                    limit: settings.max_size,
                }
                .into());
            }
            writer.write_all(&chunk).await.map_err(UploadError::Io)?;
        }
        writer.flush().await.map_err(UploadError::Io)?;
        drop(writer);

        debug!(%path, file_size, "received upload {}", file_name);
        let mime_type = upload_mime_type(content_type.as_deref(), &file_name);
        return Ok(UploadedFile {
            file,
            path,
            info: UploadInfo {
                file_name,
                mime_type,
                file_size,
            },
        });
    }
    Err(UploadError::MissingFile.into())
}
