//! Label codecs: bidirectional label <-> integer code mappings

use crate::error::PredictError;
use crate::types::CategoricalField;
use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Known labels of one categorical field, with codes `0..N-1`.
///
/// A label's code is its position in `classes`, matching a fitted label
/// encoder's `classes_` array.
#[derive(Debug, Clone)]
pub struct LabelCodec {
    field: CategoricalField,
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelCodec {
    /// Build a codec from its ordered label list.
    ///
    /// Fails on an empty list or duplicate labels, either of which would
    /// break the bijection.
    pub fn new(field: CategoricalField, classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("codec for '{}' has no labels", field);
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (code, label) in classes.iter().enumerate() {
            if codes.insert(label.clone(), code).is_some() {
                bail!("codec for '{}' has duplicate label {:?}", field, label);
            }
        }

        Ok(Self {
            field,
            classes,
            codes,
        })
    }

    pub fn field(&self) -> CategoricalField {
        self.field
    }

    /// Known labels in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// Map a label to its code. Unknown labels are an error, never a default.
    pub fn encode(&self, label: &str) -> Result<usize, PredictError> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| PredictError::UnknownCategory {
                field: self.field,
                value: label.to_string(),
            })
    }

    /// Map a code back to its label.
    pub fn decode(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|c| self.classes.get(c))
            .map(String::as_str)
    }
}

/// One codec per categorical field, including the `income` target.
#[derive(Debug, Clone)]
pub struct CodecSet {
    /// Indexed by [`CategoricalField::index`]
    codecs: Vec<LabelCodec>,
}

impl CodecSet {
    /// Build from the artifact's `field name -> labels` map.
    ///
    /// Every field in [`CategoricalField::ALL`] must be present. Extra
    /// entries are ignored with a warning.
    pub fn from_map(mut labels: BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut codecs = Vec::with_capacity(CategoricalField::ALL.len());

        for field in CategoricalField::ALL {
            let Some(classes) = labels.remove(field.as_str()) else {
                bail!("missing codec for field '{}'", field);
            };
            codecs.push(LabelCodec::new(field, classes)?);
        }

        for extra in labels.keys() {
            warn!(field = %extra, "Ignoring codec for unknown field");
        }

        Ok(Self { codecs })
    }

    pub fn get(&self, field: CategoricalField) -> &LabelCodec {
        &self.codecs[field.index()]
    }

    pub fn income(&self) -> &LabelCodec {
        self.get(CategoricalField::Income)
    }

    /// Inverse of [`Self::from_map`].
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.codecs
            .iter()
            .map(|c| (c.field.as_str().to_string(), c.classes.clone()))
            .collect()
    }
}
