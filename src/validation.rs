//! Validation System - preconditions before image synthesis
//!
//! Each rule is a pure check. The validator runs every rule in order and
//! collects all failures; deciding whether a failure is fatal belongs to
//! the caller.

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::options::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("An image is required")]
    MissingImage,

    #[error("The output file name must have the suffix of .png")]
    InvalidOutputExtension,

    #[error("At least one piece of text is required")]
    MissingText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            violations: vec![],
        }
    }

    pub fn failure(violations: Vec<ValidationError>) -> Self {
        Self {
            valid: false,
            violations,
        }
    }

    /// The failure a user actually sees when reporting is fatal
    pub fn first_error(&self) -> Option<ValidationError> {
        self.violations.first().copied()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.first_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Validation rule trait - one precondition per rule
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn check(&self, options: &Options) -> Result<(), ValidationError>;
}

// --- Concrete Rules ---

pub struct ImageRequiredRule;

impl ValidationRule for ImageRequiredRule {
    fn name(&self) -> &'static str { "image_required" }

    fn check(&self, options: &Options) -> Result<(), ValidationError> {
        if options.image.is_empty() {
            return Err(ValidationError::MissingImage);
        }
        Ok(())
    }
}

pub struct OutputExtensionRule;

impl ValidationRule for OutputExtensionRule {
    fn name(&self) -> &'static str { "output_extension" }

    fn check(&self, options: &Options) -> Result<(), ValidationError> {
        match options.name.as_deref() {
            Some(name) if !name.is_empty() && !name.to_lowercase().ends_with(".png") => {
                Err(ValidationError::InvalidOutputExtension)
            }
            _ => Ok(()),
        }
    }
}

pub struct TextRequiredRule;

impl ValidationRule for TextRequiredRule {
    fn name(&self) -> &'static str { "text_required" }

    fn check(&self, options: &Options) -> Result<(), ValidationError> {
        if options.top.is_empty() && options.bottom.is_empty() {
            return Err(ValidationError::MissingText);
        }
        Ok(())
    }
}

/// Validator runs every rule, in order, without short-circuiting
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ImageRequiredRule),
                Box::new(OutputExtensionRule),
                Box::new(TextRequiredRule),
            ],
        }
    }

    pub fn validate(&self, options: &Options) -> ValidationResult {
        let mut violations = vec![];

        for rule in &self.rules {
            if let Err(err) = rule.check(options) {
                debug!("rule {} failed: {}", rule.name(), err);
                violations.push(err);
            }
        }

        if violations.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::failure(violations)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
