use crate::error::ValidationError;
use crate::manager::ErrorManager;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category holding the messages produced while converting raw input.
pub const CONVERSION_CATEGORY: &str = "conversion";
/// Category holding required fields that were left blank.
pub const MISSING_CATEGORY: &str = "missing";

/// An already type-converted input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// The source cell was present but blank.
    Empty,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Integer(i) => Some(Decimal::from(*i)),
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// The output of an ingestion pass: a field → value mapping plus the
/// conversion failures that were met while producing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
    labels: BTreeMap<String, String>,
    errors: ErrorManager,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the display name of a field.
    pub fn with_label(mut self, field: &str, label: &str) -> Self {
        self.labels.insert(field.to_string(), label.to_string());
        self
    }

    /// Display name of a field, falling back to the field name itself.
    pub fn field_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }

    pub fn set(&mut self, field: &str, value: FieldValue) {
        self.values.insert(field.to_string(), value);
    }

    /// Value of `field`; a field that was never set is `MissingData`.
    pub fn get(&self, field: &str) -> Result<&FieldValue, ValidationError> {
        self.values
            .get(field)
            .ok_or_else(|| ValidationError::MissingData(self.field_name(field).to_string()))
    }

    /// Same as `get` but absence is `None` instead of an error.
    pub fn get_silent(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Numeric value of a field; blank fields read as `None`.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, ValidationError> {
        match self.get(field)? {
            FieldValue::Empty => Ok(None),
            value => value.as_decimal().map(Some).ok_or_else(|| {
                ValidationError::IncorrectData(format!("{} is not numeric", self.field_name(field)))
            }),
        }
    }

    /// Stores the failure to convert `raw` for `field`.
    ///
    /// Blank input is not a failure: the field is set to `Empty` instead.
    pub fn record_conversion_error(&mut self, field: &str, raw: &str) {
        if raw.trim().is_empty() {
            self.set(field, FieldValue::Empty);
            return;
        }
        let error = ValidationError::Conversion {
            field: self.field_name(field).to_string(),
            value: raw.to_string(),
        };
        self.errors.add_to(CONVERSION_CATEGORY, error.to_string());
    }

    pub fn errors(&self) -> &ErrorManager {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorManager {
        &mut self.errors
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Checks completeness, then business rules, and reports whether any
    /// error (conversion, completeness or validation) has been recorded.
    pub fn is_valid<V>(&mut self, validator: &V) -> bool
    where
        V: DataValidator + ?Sized,
    {
        let missing: Vec<&str> = validator
            .required_fields()
            .iter()
            .copied()
            .filter(|field| self.get_silent(field).is_none_or(FieldValue::is_empty))
            .collect();

        // Rules see the form with the errors recorded so far.
        let mut found = ErrorManager::new();
        if missing.is_empty() {
            validator.validate(self, &mut found);
        } else {
            for field in missing {
                found.add_to(MISSING_CATEGORY, format!("{} is missing", self.field_name(field)));
            }
        }
        self.errors.merge(&found);

        tracing::debug!(errors = self.errors.count(), "Form validated.");
        self.errors.count() == 0
    }
}

/// Business rules applied to ingested data.
pub trait DataValidator {
    /// Fields that must hold a non-blank value before `validate` runs.
    fn required_fields(&self) -> &[&str] {
        &[]
    }

    /// Records every rule violation into `errors`.
    fn validate(&self, data: &FormData, errors: &mut ErrorManager);
}
