use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use clipcheck_core::{analysis, compliance, report};

/// Multipart form accepted by `POST /api/analyze`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeUpload {
    /// MP4, MOV or AVI file
    #[schema(value_type = String, format = Binary)]
    video: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Always `true`
    pub success: bool,
    pub video_info: VideoInfo,
    pub validation: Validation,
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Seconds, rounded to two decimals
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    /// Rounded to two decimals
    pub frame_rate: f64,
    pub frame_count: u64,
    pub codec: String,
    pub profile: Option<String>,
    /// Bits per second
    pub bit_rate: Option<u64>,
    pub format: String,
    pub file_name: String,
    /// Bytes
    pub file_size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResult {
    pub valid: bool,
    pub value: String,
    pub requirement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub resolution: CriterionResult,
    pub format: CriterionResult,
    pub file_size: CriterionResult,
    pub frame_rate: CriterionResult,
    pub frame_count: CriterionResult,
    pub codec: CriterionResult,
    /// True iff every criterion is valid
    pub overall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReportStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Key of this criterion in `validation`
    pub criterion: String,
    pub label: String,
    pub requirement: String,
    pub value: String,
    pub status: ReportStatus,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub file_name: String,
    pub file_size: String,
    pub mime_type: String,
    pub duration: String,
    pub rows: Vec<ReportRow>,
    pub overall: ReportStatus,
    pub status_line: String,
}

impl From<&compliance::CriterionResult> for CriterionResult {
    fn from(value: &compliance::CriterionResult) -> Self {
        CriterionResult {
            valid: value.valid,
            value: value.value.clone(),
            requirement: value.requirement.clone(),
        }
    }
}

impl From<&compliance::ComplianceVerdict> for Validation {
    fn from(value: &compliance::ComplianceVerdict) -> Self {
        Validation {
            resolution: (&value.resolution).into(),
            format: (&value.format).into(),
            file_size: (&value.file_size).into(),
            frame_rate: (&value.frame_rate).into(),
            frame_count: (&value.frame_count).into(),
            codec: (&value.codec).into(),
            overall: value.overall,
        }
    }
}

impl From<report::Status> for ReportStatus {
    fn from(value: report::Status) -> Self {
        match value {
            report::Status::Pass => ReportStatus::Pass,
            report::Status::Fail => ReportStatus::Fail,
        }
    }
}

impl From<&report::Report> for Report {
    fn from(value: &report::Report) -> Self {
        Report {
            file_name: value.file_name.clone(),
            file_size: value.file_size.clone(),
            mime_type: value.mime_type.clone(),
            duration: value.duration.clone(),
            rows: value
                .rows
                .iter()
                .map(|row| ReportRow {
                    criterion: row.criterion.as_ref().to_string(),
                    label: row.label.to_string(),
                    requirement: row.requirement.clone(),
                    value: row.value.clone(),
                    status: row.status.into(),
                    icon: row.status.icon().to_string(),
                })
                .collect(),
            overall: value.overall.into(),
            status_line: value.status_line.clone(),
        }
    }
}

impl From<&analysis::Analysis> for AnalyzeResponse {
    fn from(value: &analysis::Analysis) -> Self {
        let descriptor = &value.descriptor;
        AnalyzeResponse {
            success: true,
            video_info: VideoInfo {
                duration: descriptor.display_duration(),
                width: descriptor.width,
                height: descriptor.height,
                frame_rate: descriptor.frame_rate,
                frame_count: descriptor.frame_count,
                codec: descriptor.codec_name.clone(),
                profile: descriptor.profile.clone(),
                bit_rate: descriptor.bit_rate,
                format: descriptor.container_format.clone(),
                file_name: descriptor.file_name.clone(),
                file_size: descriptor.file_size,
                mime_type: descriptor.mime_type.clone(),
            },
            validation: (&value.verdict).into(),
            report: (&value.report).into(),
        }
    }
}
