use camino::Utf8Path as Path;
use tracing::{debug, info, instrument};

use crate::{
    compliance::{evaluate, ComplianceCriteria, ComplianceVerdict},
    error::AnalyzeError,
    model::{UploadInfo, VideoDescriptor},
    processing::{ffprobe::Probe, normalize::normalize},
    report::{format_report, Report},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub descriptor: VideoDescriptor,
    pub verdict: ComplianceVerdict,
    pub report: Report,
}

/// Probe the file at `path` and check it against `criteria`.
///
/// `path` must stay valid until this returns, deleting it afterwards is up to
/// the caller.
#[instrument(skip(prober, criteria, upload), fields(file_name = %upload.file_name))]
pub async fn analyze_file(
    prober: &dyn Probe,
    criteria: &ComplianceCriteria,
    path: &Path,
    upload: UploadInfo,
) -> Result<Analysis, AnalyzeError> {
    let probe_output = prober.probe(path).await?;
    let descriptor = normalize(&probe_output, &upload)?;
    let verdict = evaluate(&descriptor, criteria);
    let report = format_report(&verdict, &descriptor, &upload);
    info!(
        overall = verdict.overall,
        failed = ?verdict.failed(),
        "analyzed {}",
        upload.file_name
    );
    debug!("\n{}", report);
    Ok(Analysis {
        descriptor,
        verdict,
        report,
    })
}
