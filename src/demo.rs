//! Demo artifact set for the census income schema.
//!
//! The label sets are the categories of the public adult census data, in
//! the sorted order a fitted label encoder stores them. Scaler statistics
//! approximate that dataset; the linear coefficients are illustrative, not
//! the output of a training run.

use crate::feature_encoder::FEATURE_COUNT;
use crate::models::classifier::LinearClassifier;
use crate::models::codec::CodecSet;
use crate::models::loader::Artifacts;
use crate::models::scaler::StandardScaler;
use crate::types::PersonInput;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

const WORKCLASS: &[&str] = &[
    "?",
    "Federal-gov",
    "Local-gov",
    "Never-worked",
    "Private",
    "Self-emp-inc",
    "Self-emp-not-inc",
    "State-gov",
    "Without-pay",
];

const EDUCATION: &[&str] = &[
    "10th",
    "11th",
    "12th",
    "1st-4th",
    "5th-6th",
    "7th-8th",
    "9th",
    "Assoc-acdm",
    "Assoc-voc",
    "Bachelors",
    "Doctorate",
    "HS-grad",
    "Masters",
    "Preschool",
    "Prof-school",
    "Some-college",
];

const MARITAL_STATUS: &[&str] = &[
    "Divorced",
    "Married-AF-spouse",
    "Married-civ-spouse",
    "Married-spouse-absent",
    "Never-married",
    "Separated",
    "Widowed",
];

const OCCUPATION: &[&str] = &[
    "?",
    "Adm-clerical",
    "Armed-Forces",
    "Craft-repair",
    "Exec-managerial",
    "Farming-fishing",
    "Handlers-cleaners",
    "Machine-op-inspct",
    "Other-service",
    "Priv-house-serv",
    "Prof-specialty",
    "Protective-serv",
    "Sales",
    "Tech-support",
    "Transport-moving",
];

const RELATIONSHIP: &[&str] = &[
    "Husband",
    "Not-in-family",
    "Other-relative",
    "Own-child",
    "Unmarried",
    "Wife",
];

const RACE: &[&str] = &[
    "Amer-Indian-Eskimo",
    "Asian-Pac-Islander",
    "Black",
    "Other",
    "White",
];

const GENDER: &[&str] = &["Female", "Male"];

const NATIVE_COUNTRY: &[&str] = &[
    "?",
    "Cambodia",
    "Canada",
    "China",
    "Columbia",
    "Cuba",
    "Dominican-Republic",
    "Ecuador",
    "El-Salvador",
    "England",
    "France",
    "Germany",
    "Greece",
    "Guatemala",
    "Haiti",
    "Holand-Netherlands",
    "Honduras",
    "Hong",
    "Hungary",
    "India",
    "Iran",
    "Ireland",
    "Italy",
    "Jamaica",
    "Japan",
    "Laos",
    "Mexico",
    "Nicaragua",
    "Outlying-US(Guam-USVI-etc)",
    "Peru",
    "Philippines",
    "Poland",
    "Portugal",
    "Puerto-Rico",
    "Scotland",
    "South",
    "Taiwan",
    "Thailand",
    "Trinadad&Tobago",
    "United-States",
    "Vietnam",
    "Yugoslavia",
];

const INCOME: &[&str] = &["<=50K", ">50K"];

// Column statistics, in feature order
const SCALER_MEAN: [f64; FEATURE_COUNT] = [
    38.64, 3.87, 10.29, 10.08, 2.62, 6.14, 1.44, 3.67, 0.67, 1079.07, 87.50, 40.42, 36.75,
];
const SCALER_SCALE: [f64; FEATURE_COUNT] = [
    13.71, 1.46, 3.87, 2.57, 1.51, 3.97, 1.60, 0.85, 0.47, 7452.02, 403.00, 12.39, 7.78,
];

const COEFFICIENTS: [f64; FEATURE_COUNT] = [
    0.45, 0.02, 0.05, 0.82, -0.38, 0.06, -0.22, 0.08, 0.41, 2.30, 0.27, 0.37, 0.03,
];
const INTERCEPT: f64 = -1.45;

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Codecs for every categorical field, including `income`
pub fn demo_codecs() -> Result<CodecSet> {
    let labels: BTreeMap<String, Vec<String>> = [
        ("workclass", WORKCLASS),
        ("education", EDUCATION),
        ("marital-status", MARITAL_STATUS),
        ("occupation", OCCUPATION),
        ("relationship", RELATIONSHIP),
        ("race", RACE),
        ("gender", GENDER),
        ("native-country", NATIVE_COUNTRY),
        ("income", INCOME),
    ]
    .into_iter()
    .map(|(field, labels)| (field.to_string(), owned(labels)))
    .collect();

    CodecSet::from_map(labels)
}

pub fn demo_scaler() -> Result<StandardScaler> {
    StandardScaler::new(&SCALER_MEAN, &SCALER_SCALE)
}

pub fn demo_classifier() -> Result<LinearClassifier> {
    LinearClassifier::new(&COEFFICIENTS, INTERCEPT, [0, 1])
}

/// In-memory artifacts, as if loaded from [`write_demo_artifacts`]
pub fn demo_artifacts() -> Result<Artifacts> {
    Artifacts::new(Box::new(demo_classifier()?), demo_scaler()?, demo_codecs()?)
}

/// Write the demo set under the default artifact file names.
pub fn write_demo_artifacts<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let files = [
        (
            "label_encoders.json",
            serde_json::to_string_pretty(&demo_codecs()?.to_map())?,
        ),
        (
            "scaler.json",
            serde_json::to_string_pretty(&demo_scaler()?.to_artifact())?,
        ),
        (
            "model.json",
            serde_json::to_string_pretty(&demo_classifier()?.to_artifact())?,
        ),
    ];

    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote artifact");
    }

    Ok(())
}

/// First record of the adult census data
pub fn reference_person() -> PersonInput {
    PersonInput {
        age: 39,
        workclass: "State-gov".to_string(),
        education: "Bachelors".to_string(),
        educational_num: 13,
        marital_status: "Never-married".to_string(),
        occupation: "Adm-clerical".to_string(),
        relationship: "Not-in-family".to_string(),
        race: "White".to_string(),
        gender: "Male".to_string(),
        capital_gain: 2174,
        capital_loss: 0,
        hours_per_week: 40,
        native_country: "United-States".to_string(),
    }
}
