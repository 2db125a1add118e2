//! Line-oriented terminal form driving the predictor.

use crate::pipeline::Predictor;
use crate::types::{CategoricalField, NumericField, PersonInput};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// One form input
#[derive(Debug, Clone, Copy)]
enum Step {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

/// Inputs every prediction needs
const REQUIRED_STEPS: [Step; 10] = [
    Step::Numeric(NumericField::Age),
    Step::Categorical(CategoricalField::Workclass),
    Step::Categorical(CategoricalField::Education),
    Step::Numeric(NumericField::EducationalNum),
    Step::Categorical(CategoricalField::MaritalStatus),
    Step::Categorical(CategoricalField::Occupation),
    Step::Categorical(CategoricalField::Relationship),
    Step::Categorical(CategoricalField::Race),
    Step::Categorical(CategoricalField::Gender),
    Step::Numeric(NumericField::HoursPerWeek),
];

/// "Additional info" inputs; an empty line keeps the default
const OPTIONAL_STEPS: [Step; 3] = [
    Step::Numeric(NumericField::CapitalGain),
    Step::Numeric(NumericField::CapitalLoss),
    Step::Categorical(CategoricalField::NativeCountry),
];

/// Interactive session over any line reader and writer.
pub struct FormSession<'a, R, W> {
    predictor: &'a Predictor,
    input: R,
    output: W,
    default_country: String,
}

impl<'a, R: BufRead, W: Write> FormSession<'a, R, W> {
    /// `default_country` is used when it is a known label, otherwise the
    /// first native-country label is.
    pub fn new(predictor: &'a Predictor, input: R, output: W, default_country: &str) -> Self {
        let countries = predictor.encoder().codec(CategoricalField::NativeCountry);
        let default_country = if countries.contains(default_country) {
            default_country.to_string()
        } else {
            countries.classes()[0].clone()
        };

        Self {
            predictor,
            input,
            output,
            default_country,
        }
    }

    /// Run until the user stops or input ends. Returns the number of
    /// predictions shown.
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.output, "Employee Salary Prediction")?;
        writeln!(
            self.output,
            "Enter employee details to predict whether income is >50K or <=50K"
        )?;

        let mut shown = 0;
        loop {
            writeln!(self.output)?;
            let Some(person) = self.fill_person()? else {
                break;
            };

            match self.ask_confirm("Predict income?", true)? {
                None => break,
                Some(false) => {}
                Some(true) => match self.predictor.predict(&person) {
                    Ok(outcome) => {
                        writeln!(self.output, "Predicted Income: {}", outcome.label)?;
                        shown += 1;
                    }
                    Err(e) => writeln!(self.output, "Error: {}", e.user_message())?,
                },
            }

            if self.ask_confirm("Predict another?", false)? != Some(true) {
                break;
            }
        }

        debug!(predictions = shown, "Form session ended");
        Ok(shown)
    }

    /// Read every field. `None` when input ends first.
    fn fill_person(&mut self) -> Result<Option<PersonInput>> {
        let mut person = PersonInput::default();

        for step in REQUIRED_STEPS {
            if !self.fill_step(&mut person, step, false)? {
                return Ok(None);
            }
        }

        writeln!(self.output, "-- Additional Info (optional, Enter to skip) --")?;
        for step in OPTIONAL_STEPS {
            if !self.fill_step(&mut person, step, true)? {
                return Ok(None);
            }
        }

        Ok(Some(person))
    }

    fn fill_step(&mut self, person: &mut PersonInput, step: Step, optional: bool) -> Result<bool> {
        match step {
            Step::Numeric(field) => {
                let bound = self.predictor.encoder().bounds().get(field);
                let default = optional.then(|| if bound.contains(0) { 0 } else { bound.min });
                match self.ask_number(field, default)? {
                    Some(value) => person.set_numeric(field, value),
                    None => return Ok(false),
                }
            }
            Step::Categorical(field) => {
                let default = optional.then(|| self.default_country.clone());
                match self.ask_category(field, default.as_deref())? {
                    Some(label) => person.set_category(field, label),
                    None => return Ok(false),
                }
            }
        }
        Ok(true)
    }

    fn ask_number(&mut self, field: NumericField, default: Option<i64>) -> Result<Option<i64>> {
        let bound = self.predictor.encoder().bounds().get(field);

        loop {
            match default {
                Some(d) => write!(
                    self.output,
                    "{} [{}-{}] (default {}): ",
                    field.title(),
                    bound.min,
                    bound.max,
                    d
                )?,
                None => write!(self.output, "{} [{}-{}]: ", field.title(), bound.min, bound.max)?,
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                if let Some(d) = default {
                    return Ok(Some(d));
                }
                continue;
            }

            match line.parse::<i64>() {
                Ok(value) if bound.contains(value) => return Ok(Some(value)),
                _ => writeln!(
                    self.output,
                    "{} must be a whole number between {} and {}",
                    field.title(),
                    bound.min,
                    bound.max
                )?,
            }
        }
    }

    fn ask_category(
        &mut self,
        field: CategoricalField,
        default: Option<&str>,
    ) -> Result<Option<String>> {
        let predictor = self.predictor;
        let codec = predictor.encoder().codec(field);
        let options = codec.classes();

        writeln!(self.output, "{}:", field.title())?;
        for (i, label) in options.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, label)?;
        }

        loop {
            match default {
                Some(d) => write!(self.output, "Select 1-{} (default {}): ", options.len(), d)?,
                None => write!(self.output, "Select 1-{}: ", options.len())?,
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                if let Some(d) = default {
                    return Ok(Some(d.to_string()));
                }
                continue;
            }

            // Option number first, then exact label
            let choice = match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1].clone()),
                _ if codec.contains(&line) => Some(line),
                _ => None,
            };

            match choice {
                Some(label) => return Ok(Some(label)),
                None => writeln!(
                    self.output,
                    "Invalid choice: enter a number between 1 and {} or an exact label",
                    options.len()
                )?,
            }
        }
    }

    /// Yes/no question; an empty answer takes `default`.
    fn ask_confirm(&mut self, question: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            write!(self.output, "{} {} ", question, hint)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.to_ascii_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer y or n")?,
            }
        }
    }

    /// Next trimmed line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}
