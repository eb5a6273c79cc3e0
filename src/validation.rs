//! Schema for the name/age user form.
//!
//! A [`UserDraft`] only becomes a [`NewUser`] by passing [`validate`], so the
//! controller never sees input that violates the schema.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::types::UserDraft;

pub const NAME_LENGTH: RangeInclusive<usize> = 3..=30;
pub const AGE: RangeInclusive<i64> = 18..=110;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::Age => write!(f, "Age"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: String) -> Self {
        Self { field, message }
    }

    fn required(field: Field) -> Self {
        Self::new(field, format!("{field} field is required."))
    }
}

/// Every field violation found in one draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message for a single field, as shown next to that input.
    #[cfg(test)]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A draft that satisfied the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

fn check_name(name: Option<&str>) -> Result<String, FieldError> {
    let name = name.ok_or_else(|| FieldError::required(Field::Name))?;

    let len = name.chars().count();
    if len < *NAME_LENGTH.start() {
        Err(FieldError::new(
            Field::Name,
            format!(
                "{} must be at least {} characters.",
                Field::Name,
                NAME_LENGTH.start()
            ),
        ))
    } else if len > *NAME_LENGTH.end() {
        Err(FieldError::new(
            Field::Name,
            format!(
                "{} must be at most {} characters.",
                Field::Name,
                NAME_LENGTH.end()
            ),
        ))
    } else {
        Ok(name.to_string())
    }
}

fn check_age(age: Option<i64>) -> Result<u32, FieldError> {
    let age = age.ok_or_else(|| FieldError::required(Field::Age))?;

    if age < *AGE.start() {
        return Err(FieldError::new(
            Field::Age,
            format!("{} must be at least {}.", Field::Age, AGE.start()),
        ));
    }

    match u32::try_from(age) {
        Ok(valid) if AGE.contains(&age) => Ok(valid),
        _ => Err(FieldError::new(
            Field::Age,
            format!("{} must be at most {}.", Field::Age, AGE.end()),
        )),
    }
}

pub fn validate(draft: &UserDraft) -> Result<NewUser, ValidationErrors> {
    match (check_name(draft.name.as_deref()), check_age(draft.age)) {
        (Ok(name), Ok(age)) => Ok(NewUser { name, age }),
        (name, age) => Err(ValidationErrors {
            errors: [name.err(), age.err()].into_iter().flatten().collect(),
        }),
    }
}

/// Run `on_valid` with the validated input, or return the field errors
/// without calling it.
pub fn submit<T>(
    draft: &UserDraft,
    on_valid: impl FnOnce(NewUser) -> T,
) -> Result<T, ValidationErrors> {
    validate(draft).map(on_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name_len: usize, age: i64) -> UserDraft {
        UserDraft::new("x".repeat(name_len), age)
    }

    #[test]
    fn test_name_length_boundaries() {
        assert!(validate(&draft(2, 30)).is_err());
        assert!(validate(&draft(3, 30)).is_ok());
        assert!(validate(&draft(30, 30)).is_ok());
        assert!(validate(&draft(31, 30)).is_err());
    }

    #[test]
    fn test_age_boundaries() {
        assert!(validate(&draft(5, 17)).is_err());
        assert!(validate(&draft(5, 18)).is_ok());
        assert!(validate(&draft(5, 110)).is_ok());
        assert!(validate(&draft(5, 111)).is_err());
        assert!(validate(&draft(5, -1)).is_err());
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        // three characters, six bytes
        assert!(validate(&UserDraft::new("äöü", 20)).is_ok());
    }

    #[test]
    fn test_per_field_messages() {
        let errors = validate(&UserDraft::new("Al", 200)).unwrap_err();
        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 3 characters.")
        );
        assert_eq!(errors.get(Field::Age), Some("Age must be at most 110."));
        assert_eq!(
            errors.to_string(),
            "Name must be at least 3 characters. Age must be at most 110."
        );
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = validate(&UserDraft::default()).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name field is required."));
        assert_eq!(errors.get(Field::Age), Some("Age field is required."));

        let errors = validate(&UserDraft {
            name: Some("Leanne Graham".to_string()),
            age: None,
        })
        .unwrap_err();
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.to_string(), "Age field is required.");
    }

    #[test]
    fn test_submit_skips_callback_on_violation() {
        let mut called = false;
        let result = submit(&UserDraft::new("Bob", 17), |_| called = true);
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_submit_passes_validated_input() {
        let user = submit(&UserDraft::new("Bob", 25), |user| user).unwrap();
        assert_eq!(
            user,
            NewUser {
                name: "Bob".to_string(),
                age: 25
            }
        );
    }
}
