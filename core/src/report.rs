use std::fmt;

use crate::{
    compliance::{display::format_file_size, ComplianceVerdict, Criterion},
    model::{UploadInfo, VideoDescriptor},
    util::trim_decimal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn from_valid(valid: bool) -> Self {
        if valid {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Status::Pass => "✓",
            Status::Fail => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportRow {
    pub criterion: Criterion,
    pub label: &'static str,
    pub requirement: String,
    pub value: String,
    pub status: Status,
}

/// Everything a client needs to render the result of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Report {
    pub file_name: String,
    pub file_size: String,
    pub mime_type: String,
    pub duration: String,
    pub rows: Vec<ReportRow>,
    pub overall: Status,
    pub status_line: String,
}

pub fn format_report(
    verdict: &ComplianceVerdict,
    descriptor: &VideoDescriptor,
    upload: &UploadInfo,
) -> Report {
    let rows: Vec<ReportRow> = verdict
        .iter()
        .map(|(criterion, result)| ReportRow {
            criterion,
            label: criterion.label(),
            requirement: result.requirement.clone(),
            value: result.value.clone(),
            status: Status::from_valid(result.valid),
        })
        .collect();
    let failed = rows.iter().filter(|row| row.status == Status::Fail).count();
    let status_line = if verdict.overall {
        "All requirements met".to_string()
    } else {
        format!("{} of {} requirements not met", failed, rows.len())
    };
    Report {
        file_name: upload.file_name.clone(),
        file_size: format_file_size(upload.file_size),
        mime_type: upload.mime_type.clone(),
        duration: format!("{} s", trim_decimal(descriptor.display_duration())),
        rows,
        overall: Status::from_valid(verdict.overall),
        status_line,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}, {}, {})",
            self.file_name, self.file_size, self.mime_type, self.duration
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{} {}: {} (required: {})",
                row.status.icon(),
                row.label,
                row.value,
                row.requirement
            )?;
        }
        write!(f, "{} {}", self.overall.icon(), self.status_line)
    }
}
