use std::sync::Arc;

use clipcheck_core::{compliance::ComplianceCriteria, ffprobe::Probe};

use crate::upload::UploadSettings;

pub struct AppState {
    pub prober: Arc<dyn Probe>,
    /// Read-only for the lifetime of the server
    pub criteria: ComplianceCriteria,
    pub upload: UploadSettings,
}

pub type SharedState = Arc<AppState>;
