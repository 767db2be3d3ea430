use strum::{AsRefStr, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Criterion {
    Resolution,
    Format,
    FileSize,
    FrameRate,
    FrameCount,
    Codec,
}

impl Criterion {
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Resolution => "Resolution",
            Criterion::Format => "Format",
            Criterion::FileSize => "File Size",
            Criterion::FrameRate => "Frame Rate",
            Criterion::FrameCount => "Frame Count",
            Criterion::Codec => "Codec",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CriterionResult {
    pub valid: bool,
    /// Measured value, formatted for display
    pub value: String,
    pub requirement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplianceVerdict {
    pub resolution: CriterionResult,
    pub format: CriterionResult,
    pub file_size: CriterionResult,
    pub frame_rate: CriterionResult,
    pub frame_count: CriterionResult,
    pub codec: CriterionResult,
    pub overall: bool,
}

impl ComplianceVerdict {
    pub fn get(&self, criterion: Criterion) -> &CriterionResult {
        match criterion {
            Criterion::Resolution => &self.resolution,
            Criterion::Format => &self.format,
            Criterion::FileSize => &self.file_size,
            Criterion::FrameRate => &self.frame_rate,
            Criterion::FrameCount => &self.frame_count,
            Criterion::Codec => &self.codec,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, &CriterionResult)> + '_ {
        Criterion::iter().map(move |criterion| (criterion, self.get(criterion)))
    }

    pub fn failed(&self) -> Vec<Criterion> {
        self.iter()
            .filter(|(_, result)| !result.valid)
            .map(|(criterion, _)| criterion)
            .collect()
    }
}
