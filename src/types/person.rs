//! Raw person attributes as entered on the form

use super::fields::{CategoricalField, NumericField};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One person's attributes, before encoding.
///
/// Field names follow the training columns (`marital-status`,
/// `hours-per-week`, ...) so records can be read straight from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PersonInput {
    pub age: i64,
    pub workclass: String,
    pub education: String,
    pub educational_num: i64,
    pub marital_status: String,
    pub occupation: String,
    pub relationship: String,
    pub race: String,
    pub gender: String,
    #[serde(default)]
    pub capital_gain: i64,
    #[serde(default)]
    pub capital_loss: i64,
    pub hours_per_week: i64,
    pub native_country: String,
}

impl PersonInput {
    /// Raw label for a categorical input field.
    ///
    /// Returns `None` for [`CategoricalField::Income`], which is never an input.
    pub fn category(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Workclass => &self.workclass,
            CategoricalField::Education => &self.education,
            CategoricalField::MaritalStatus => &self.marital_status,
            CategoricalField::Occupation => &self.occupation,
            CategoricalField::Relationship => &self.relationship,
            CategoricalField::Race => &self.race,
            CategoricalField::Gender => &self.gender,
            CategoricalField::NativeCountry => &self.native_country,
            CategoricalField::Income => return None,
        };
        Some(value.as_str())
    }

    pub fn numeric(&self, field: NumericField) -> i64 {
        match field {
            NumericField::Age => self.age,
            NumericField::EducationalNum => self.educational_num,
            NumericField::CapitalGain => self.capital_gain,
            NumericField::CapitalLoss => self.capital_loss,
            NumericField::HoursPerWeek => self.hours_per_week,
        }
    }

    pub fn set_category(&mut self, field: CategoricalField, value: String) {
        match field {
            CategoricalField::Workclass => self.workclass = value,
            CategoricalField::Education => self.education = value,
            CategoricalField::MaritalStatus => self.marital_status = value,
            CategoricalField::Occupation => self.occupation = value,
            CategoricalField::Relationship => self.relationship = value,
            CategoricalField::Race => self.race = value,
            CategoricalField::Gender => self.gender = value,
            CategoricalField::NativeCountry => self.native_country = value,
            CategoricalField::Income => {
                warn!(value = %value, "Ignoring income label set on a person input")
            }
        }
    }

    pub fn set_numeric(&mut self, field: NumericField, value: i64) {
        match field {
            NumericField::Age => self.age = value,
            NumericField::EducationalNum => self.educational_num = value,
            NumericField::CapitalGain => self.capital_gain = value,
            NumericField::CapitalLoss => self.capital_loss = value,
            NumericField::HoursPerWeek => self.hours_per_week = value,
        }
    }
}

impl Default for PersonInput {
    fn default() -> Self {
        Self {
            age: 18,
            workclass: String::new(),
            education: String::new(),
            educational_num: 1,
            marital_status: String::new(),
            occupation: String::new(),
            relationship: String::new(),
            race: String::new(),
            gender: String::new(),
            capital_gain: 0,
            capital_loss: 0,
            hours_per_week: 1,
            native_country: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_deserialization_uses_column_names() {
        let json = r#"{
            "age": 39, "workclass": "State-gov", "education": "Bachelors",
            "educational-num": 13, "marital-status": "Never-married",
            "occupation": "Adm-clerical", "relationship": "Not-in-family",
            "race": "White", "gender": "Male", "capital-gain": 2174,
            "capital-loss": 0, "hours-per-week": 40, "native-country": "United-States"
        }"#;

        let person: PersonInput = serde_json::from_str(json).unwrap();

        assert_eq!(person.age, 39);
        assert_eq!(person.marital_status, "Never-married");
        assert_eq!(person.capital_gain, 2174);
        assert_eq!(person.numeric(NumericField::HoursPerWeek), 40);
        assert_eq!(person.category(CategoricalField::NativeCountry), Some("United-States"));
    }

    #[test]
    fn test_optional_capital_fields_default_to_zero() {
        let json = r#"{
            "age": 25, "workclass": "Private", "education": "HS-grad",
            "educational-num": 9, "marital-status": "Divorced",
            "occupation": "Sales", "relationship": "Unmarried",
            "race": "Black", "gender": "Female", "hours-per-week": 30,
            "native-country": "Canada"
        }"#;

        let person: PersonInput = serde_json::from_str(json).unwrap();

        assert_eq!(person.capital_gain, 0);
        assert_eq!(person.capital_loss, 0);
    }

    #[test]
    fn test_income_is_not_an_input() {
        let person = PersonInput::default();
        assert_eq!(person.category(CategoricalField::Income), None);
    }

    #[test]
    fn test_setters() {
        let mut person = PersonInput::default();
        person.set_category(CategoricalField::Race, "Asian-Pac-Islander".to_string());
        person.set_numeric(NumericField::CapitalLoss, 1902);

        assert_eq!(person.race, "Asian-Pac-Islander");
        assert_eq!(person.capital_loss, 1902);
    }

    #[test]
    fn test_setting_income_leaves_person_unchanged() {
        let mut person = PersonInput::default();
        person.set_category(CategoricalField::Income, ">50K".to_string());
        assert_eq!(person, PersonInput::default());
    }
}
