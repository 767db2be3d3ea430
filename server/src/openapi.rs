use utoipa::OpenApi;

use crate::schema::{
    AnalyzeResponse, AnalyzeUpload, CriterionResult, ErrorResponse, Report, ReportRow,
    ReportStatus, TransportErrorResponse, Validation, VideoInfo,
};

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::analyze::post_analyze),
    components(schemas(
        AnalyzeUpload,
        AnalyzeResponse,
        VideoInfo,
        Validation,
        CriterionResult,
        Report,
        ReportRow,
        ReportStatus,
        ErrorResponse,
        TransportErrorResponse,
    )),
    tags((name = "clipcheck"))
)]
pub struct ApiDoc;
