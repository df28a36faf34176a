//! Form validation rules.
//!
//! Rules are checked in a fixed order per field (required, then minimum
//! length, then pattern) and only the first failure is reported. Fields a
//! rule names but the form lacks are skipped.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const PATTERN_MESSAGE: &str = "Invalid format.";
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, Default)]
pub struct Rule {
    required: Option<String>,
    min_length: Option<usize>,
    pattern: Option<(Regex, Option<String>)>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self) -> Self {
        self.required_with(REQUIRED_MESSAGE)
    }

    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Value must contain a match for `pattern` (unanchored unless the pattern anchors itself).
    pub fn pattern(mut self, pattern: &str, message: Option<&str>) -> Result<Self, regex::Error> {
        self.pattern = Some((Regex::new(pattern)?, message.map(str::to_string)));
        Ok(self)
    }

    fn check(&self, value: &str) -> Option<String> {
        if let Some(message) = &self.required
            && value.trim().is_empty()
        {
            return Some(message.clone());
        }
        if let Some(min) = self.min_length
            && value.chars().count() < min
        {
            return Some(format!("Minimum {min} characters required."));
        }
        if let Some((regex, message)) = &self.pattern
            && !regex.is_match(value)
        {
            return Some(message.clone().unwrap_or_else(|| PATTERN_MESSAGE.to_string()));
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub fields: BTreeMap<String, FieldState>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|s| *s == FieldState::Valid)
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(FieldState::Invalid(message)) => Some(message),
            _ => None,
        }
    }

    /// `(field, message)` pairs for every invalid field.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(name, state)| match state {
            FieldState::Invalid(message) => Some((name.as_str(), message.as_str())),
            FieldState::Valid => None,
        })
    }
}

pub fn validate_form(form: &HashMap<String, String>, rules: &[(&str, Rule)]) -> Validation {
    let mut validation = Validation::default();
    for (name, rule) in rules {
        let Some(value) = form.get(*name) else {
            continue;
        };
        let state = match rule.check(value) {
            Some(message) => FieldState::Invalid(message),
            None => FieldState::Valid,
        };
        validation.fields.insert(name.to_string(), state);
    }
    validation
}
