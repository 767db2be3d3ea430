use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clipcheck_core::error::{AnalyzeError, MetadataError, ProbeError, UploadError};
use eyre::eyre;

use crate::schema::{ErrorResponse, TransportErrorResponse};

#[derive(Debug)]
pub enum HttpError {
    /// The request was well formed but the video could not be analyzed
    Analyze(AnalyzeError),
    /// The request itself could not be read
    Transport(StatusCode, eyre::Report),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Analyze(AnalyzeError::Upload(err)) => match err {
                UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                UploadError::UnsupportedType { .. } | UploadError::MissingFile => {
                    StatusCode::BAD_REQUEST
                }
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            HttpError::Analyze(AnalyzeError::Probe(ProbeError::Timeout(_))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            HttpError::Analyze(AnalyzeError::Probe(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Analyze(AnalyzeError::Metadata(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::Transport(status, _) => *status,
        }
    }
}

/// Display of an error followed by all of its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}

// Tell axum how to convert `HttpError` into a response.
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            HttpError::Analyze(err) => {
                let error = error_chain(&err);
                if status.is_server_error() {
                    tracing::error!(%status, "analysis failed: {}", error);
                } else {
                    tracing::info!(%status, "upload rejected: {}", error);
                }
                (
                    status,
                    Json(ErrorResponse {
                        success: false,
                        error,
                    }),
                )
                    .into_response()
            }
            HttpError::Transport(status, err) => {
                tracing::warn!(%status, "bad request: {:#}", err);
                (
                    status,
                    Json(TransportErrorResponse {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

macro_rules! impl_from {
    ($from:ty) => {
        impl From<$from> for HttpError {
            fn from(err: $from) -> Self {
                Self::Analyze(err.into())
            }
        }
    };
}

impl_from!(AnalyzeError);
impl_from!(UploadError);
impl_from!(ProbeError);
impl_from!(MetadataError);

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        Self::Transport(err.status(), eyre!(err.body_text()))
    }
}

impl From<MultipartRejection> for HttpError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Transport(rejection.status(), eyre!(rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, HttpError>;

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Analyze(err) => write!(f, "{}", err),
            HttpError::Transport(_, err) => write!(f, "{}", err),
        }
    }
}
