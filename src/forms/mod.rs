pub mod brand;
pub mod category;
pub mod image_rules;
pub mod matrix;
pub mod product;
pub mod variant;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::richtext;

pub use brand::{BrandForm, BrandPayload, SectionForm};
pub use category::{CategoryForm, CategoryPayload};
pub use image_rules::ImageRules;
pub use product::{DetailForm, ProductForm, ProductPayload};
pub use variant::{MatrixAttribute, OptionForm, VariantGroup, VariantMatrix, VariantPayload};

pub(crate) static SKU_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,40}$").unwrap());
pub(crate) static ITEM_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,50}$").unwrap());

/// A form the dashboard can validate and submit.
pub trait FormSchema {
    type Payload: Serialize;

    /// Field errors keyed by path, e.g. `variants[0].options[1].sku`.
    fn check(&self) -> Result<(), FieldErrors>;

    fn payload(&self) -> Self::Payload;
}

/// Inline messages shown under each form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.into()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Adds derive-level errors, nesting their paths under `prefix`.
    pub fn extend_validation(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let name = field.to_string();
            let path = join_path(prefix, &name);
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        self.add(path.clone(), describe(&name, error));
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.extend_validation(&path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.extend_validation(&format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }

    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        let mut errors = Self::new();
        if let Err(validation) = result {
            errors.extend_validation("", &validation);
        }
        errors
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let label = field.replace('_', " ");
    match error.code.as_ref() {
        "required" => format!("{label} is required"),
        "length" => format!("{label} has an invalid length"),
        "range" => format!("{label} is out of range"),
        "url" => format!("{label} must be a valid URL"),
        "email" => format!("{label} must be a valid email"),
        "regex" => format!("{label} has an invalid format"),
        _ => format!("{label} is invalid"),
    }
}

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |value| value.trim().is_empty())
}

/// Blank strings become `None` before they reach the backend.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn image_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with("required", "image is required"));
    }
    Ok(())
}

pub(crate) fn rich_text_present(value: &str) -> Result<(), ValidationError> {
    if richtext::plain_text(value).is_empty() {
        return Err(error_with("required", "description is required"));
    }
    Ok(())
}

pub(crate) fn money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error_with("money", "amount cannot be negative"));
    }
    if value.normalize().scale() > 2 {
        return Err(error_with("money", "amount can have at most two decimals"));
    }
    Ok(())
}
