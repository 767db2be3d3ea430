use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use clipcheck_core::analysis::analyze_file;
use tracing::{warn, Instrument};

use crate::{
    app_state::SharedState,
    http_error::ApiResult,
    schema::{AnalyzeResponse, AnalyzeUpload, ErrorResponse},
    upload::receive_upload,
};

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

pub fn router(max_upload_size: u64) -> Router<SharedState> {
    let body_limit = usize::try_from(max_upload_size.saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);
    Router::new()
        .route("/analyze", post(post_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
}

#[tracing::instrument(name = "Analyze upload", skip(app_state, multipart))]
#[utoipa::path(post, path = "/api/analyze",
    request_body(content = AnalyzeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeResponse),
        (status = BAD_REQUEST, body = ErrorResponse, description = "No video in request or unsupported file type. Malformed multipart requests get a TransportErrorResponse"),
        (status = PAYLOAD_TOO_LARGE, body = ErrorResponse, description = "File exceeds the upload limit"),
        (status = UNPROCESSABLE_ENTITY, body = ErrorResponse, description = "No video stream or unreadable frame rate"),
        (status = INTERNAL_SERVER_ERROR, body = ErrorResponse, description = "Probing the file failed"),
        (status = GATEWAY_TIMEOUT, body = ErrorResponse, description = "Probing the file timed out"),
    )
)]
pub async fn post_analyze(
    State(app_state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let mut multipart = multipart?;
    let upload = receive_upload(&mut multipart, &app_state.upload)
        .in_current_span()
        .await?;
    let analysis = analyze_file(
        app_state.prober.as_ref(),
        &app_state.criteria,
        upload.path(),
        upload.info.clone(),
    )
    .in_current_span()
    .await?;
    if let Err(err) = upload.close() {
        warn!("error removing uploaded file: {}", err);
    }
    Ok(Json((&analysis).into()))
}
