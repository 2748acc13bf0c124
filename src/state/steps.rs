//! Questionnaire steps

use serde::{Deserialize, Serialize};

/// Number of steps in the questionnaire
pub const MAX_STEPS: usize = 5;

/// One section of the questionnaire, in the order the user walks through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    SubjectProperty,
    ZoningDistrict,
    AdjacentZoning,
    BuildingSetback,
    HeightRestrictions,
}

impl WizardStep {
    pub const ALL: [WizardStep; MAX_STEPS] = [
        Self::SubjectProperty,
        Self::ZoningDistrict,
        Self::AdjacentZoning,
        Self::BuildingSetback,
        Self::HeightRestrictions,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::SubjectProperty => 0,
            Self::ZoningDistrict => 1,
            Self::AdjacentZoning => 2,
            Self::BuildingSetback => 3,
            Self::HeightRestrictions => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SubjectProperty => "Subject Property",
            Self::ZoningDistrict => "Zoning District",
            Self::AdjacentZoning => "Adjacent Zoning",
            Self::BuildingSetback => "Building Setback Requirements",
            Self::HeightRestrictions => "Height Restrictions",
        }
    }
}

/// Completion and validity of one step, as reported by the step's UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepValidation {
    pub is_complete: bool,
    pub is_valid: bool,
}

impl StepValidation {
    pub fn new(is_complete: bool, is_valid: bool) -> Self {
        Self {
            is_complete,
            is_valid,
        }
    }

    /// A step only opens the gate once it is both complete and valid
    pub fn passes(&self) -> bool {
        self.is_complete && self.is_valid
    }
}
