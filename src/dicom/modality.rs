//! Acquisition modality (0008,0060)

use crate::error::ExportError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Ultrasound bone densitometry
    UltrasoundBoneDensitometry,
    BiomagneticImaging,
    /// X-ray bone densitometry
    XrayBoneDensitometry,
    ComputedRadiography,
    ComputedTomography,
    Diaphanography,
    DigitalRadiography,
    IntraOralRadiography,
    Mammography,
    MagneticResonance,
    Plan,
    PositronEmissionTomography,
    RtImage,
    RtDose,
    RtStruct,
    RtPlan,
    RtRecord,
    Segmentation,
    Ultrasound,
}

impl Modality {
    pub const ALL: [Modality; 19] = [
        Self::UltrasoundBoneDensitometry,
        Self::BiomagneticImaging,
        Self::XrayBoneDensitometry,
        Self::ComputedRadiography,
        Self::ComputedTomography,
        Self::Diaphanography,
        Self::DigitalRadiography,
        Self::IntraOralRadiography,
        Self::Mammography,
        Self::MagneticResonance,
        Self::Plan,
        Self::PositronEmissionTomography,
        Self::RtImage,
        Self::RtDose,
        Self::RtStruct,
        Self::RtPlan,
        Self::RtRecord,
        Self::Segmentation,
        Self::Ultrasound,
    ];

    /// DICOM defined term for this modality
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UltrasoundBoneDensitometry => "BDUS",
            Self::BiomagneticImaging => "BI",
            Self::XrayBoneDensitometry => "BMD",
            Self::ComputedRadiography => "CR",
            Self::ComputedTomography => "CT",
            Self::Diaphanography => "DG",
            Self::DigitalRadiography => "DX",
            Self::IntraOralRadiography => "IO",
            Self::Mammography => "MG",
            Self::MagneticResonance => "MR",
            Self::Plan => "PLAN",
            Self::PositronEmissionTomography => "PT",
            Self::RtImage => "RTIMAGE",
            Self::RtDose => "RTDOSE",
            Self::RtStruct => "RTSTRUCT",
            Self::RtPlan => "RTPLAN",
            Self::RtRecord => "RTRECORD",
            Self::Segmentation => "SEG",
            Self::Ultrasound => "US",
        }
    }
}

/// Classify a modality code. Matching is exact and case-sensitive.
pub fn resolve_modality(code: &str) -> Result<Modality, ExportError> {
    Modality::ALL
        .into_iter()
        .find(|m| m.code() == code)
        .ok_or_else(|| ExportError::UnsupportedModality(code.to_string()))
}

impl FromStr for Modality {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_modality(s)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
