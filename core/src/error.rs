use std::time::Duration;

/// Upload was rejected before any probing happened.
#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("File too large, the maximum upload size is {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("Unsupported file type '{mime_type}' for '{file_name}', expected an MP4, MOV or AVI video")]
    UnsupportedType {
        file_name: String,
        mime_type: String,
    },
    #[error("No video file in request")]
    MissingFile,
    #[error("Error storing uploaded file")]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("Error starting ffprobe")]
    Spawn(#[source] std::io::Error),
    #[error("ffprobe did not finish within {0:?}")]
    Timeout(Duration),
    #[error("ffprobe could not read the file ({status})")]
    Failed { status: String, stderr: String },
    #[error("Error waiting for ffprobe")]
    Io(#[source] std::io::Error),
    #[error("Could not parse ffprobe output")]
    Parse(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("No video stream found in file")]
    NoVideoStream,
    #[error("Invalid frame rate '{0}'")]
    InvalidFrameRate(String),
}

/// Any error that ends an analysis request.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
