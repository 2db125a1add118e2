//! Field identifiers for the census-style person schema

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical attributes, each backed by its own label codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoricalField {
    Workclass,
    Education,
    MaritalStatus,
    Occupation,
    Relationship,
    Race,
    Gender,
    NativeCountry,
    /// Target column; decoded from the classifier output, never user input
    Income,
}

impl CategoricalField {
    /// Every field with a codec, in artifact order.
    pub const ALL: [CategoricalField; 9] = [
        CategoricalField::Workclass,
        CategoricalField::Education,
        CategoricalField::MaritalStatus,
        CategoricalField::Occupation,
        CategoricalField::Relationship,
        CategoricalField::Race,
        CategoricalField::Gender,
        CategoricalField::NativeCountry,
        CategoricalField::Income,
    ];

    /// Fields supplied by the user (everything but the target).
    pub const INPUTS: [CategoricalField; 8] = [
        CategoricalField::Workclass,
        CategoricalField::Education,
        CategoricalField::MaritalStatus,
        CategoricalField::Occupation,
        CategoricalField::Relationship,
        CategoricalField::Race,
        CategoricalField::Gender,
        CategoricalField::NativeCountry,
    ];

    /// Column name used by the training data and the codec artifact.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workclass => "workclass",
            Self::Education => "education",
            Self::MaritalStatus => "marital-status",
            Self::Occupation => "occupation",
            Self::Relationship => "relationship",
            Self::Race => "race",
            Self::Gender => "gender",
            Self::NativeCountry => "native-country",
            Self::Income => "income",
        }
    }

    /// Human-readable form label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Workclass => "Workclass",
            Self::Education => "Education",
            Self::MaritalStatus => "Marital Status",
            Self::Occupation => "Occupation",
            Self::Relationship => "Relationship",
            Self::Race => "Race",
            Self::Gender => "Gender",
            Self::NativeCountry => "Native Country",
            Self::Income => "Income",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Position in [`Self::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric attributes passed through to the feature record unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericField {
    Age,
    EducationalNum,
    CapitalGain,
    CapitalLoss,
    HoursPerWeek,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Age,
        NumericField::EducationalNum,
        NumericField::CapitalGain,
        NumericField::CapitalLoss,
        NumericField::HoursPerWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::EducationalNum => "educational-num",
            Self::CapitalGain => "capital-gain",
            Self::CapitalLoss => "capital-loss",
            Self::HoursPerWeek => "hours-per-week",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::EducationalNum => "Education Number",
            Self::CapitalGain => "Capital Gain",
            Self::CapitalLoss => "Capital Loss",
            Self::HoursPerWeek => "Hours Per Week",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
